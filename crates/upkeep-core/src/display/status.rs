//! Status messages for operation feedback.

use std::fmt;

use crate::error::UpkeepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Rejected,
    Failure,
}

/// One-line status message.
///
/// Rejected requests (a rule refused the change and nothing was modified) are
/// shown apart from infrastructure failures.
pub struct OperationStatus {
    pub message: String,
    outcome: Outcome,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            outcome: Outcome::Success,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            outcome: Outcome::Failure,
        }
    }

    /// Status for a failed operation.
    pub fn from_error(error: &UpkeepError) -> Self {
        Self {
            message: error.to_string(),
            outcome: if error.is_rejection() {
                Outcome::Rejected
            } else {
                Outcome::Failure
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.outcome {
            Outcome::Success => "Success:",
            Outcome::Rejected => "Rejected:",
            Outcome::Failure => "Error:",
        };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Operation completed".to_string());
        assert!(success.is_success());
        assert!(format!("{success}").contains("Success:"));

        let failure = OperationStatus::failure("Operation failed".to_string());
        assert!(format!("{failure}").contains("Error:"));
    }

    #[test]
    fn test_status_from_rejection() {
        let status = OperationStatus::from_error(&UpkeepError::KeyInUse {
            key: "PUMP-01".to_string(),
        });
        assert!(!status.is_success());
        assert!(status.to_string().starts_with("Rejected: Equipment key 'PUMP-01'"));
    }
}
