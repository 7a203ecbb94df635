//! Parameter structures for catalog operations.
//!
//! These structures carry requests from an interface layer (the CLI, or any
//! embedder) into the [`Catalog`](crate::catalog::Catalog) without depending
//! on a UI framework. Interface layers keep their own argument types and
//! convert them with `From` impls:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Catalog      │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, UpkeepError},
    models::Task,
    periodicity::{Frequency, FrequencySpec, Periodicity},
};

/// Parameters for creating a new maintenance plan on one equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    pub plan_key: String,
    /// Equipment the plan is first linked to
    pub equipment_key: String,
    pub periodicity: Periodicity,
    /// Ordered task list, at least one
    pub tasks: Vec<Task>,
}

/// Parameters for rewriting an existing plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlan {
    /// Current key of the plan
    pub plan_key: String,
    /// Key after the update; equal to `plan_key` when not renaming
    pub new_plan_key: String,
    pub periodicity: Periodicity,
    pub tasks: Vec<Task>,
}

/// Caller-supplied recurrence for one plan of a schedule.
///
/// Mirrors what an editor collects: the frequency may be left unset and the
/// interval may be typed as zero or negative, both of which are rejected
/// with `InvalidFrequencyConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyOverride {
    pub frequency: Option<Frequency>,
    pub occurs_every: i64,
}

impl FrequencyOverride {
    pub fn new(frequency: Frequency, occurs_every: i64) -> Self {
        Self {
            frequency: Some(frequency),
            occurs_every,
        }
    }

    /// Validates the override into a frequency descriptor.
    pub fn to_spec(self, plan_key: &str) -> Result<FrequencySpec> {
        let invalid = |reason: &str| UpkeepError::InvalidFrequencyConfig {
            plan_key: plan_key.to_string(),
            reason: reason.to_string(),
        };

        let frequency = self.frequency.ok_or_else(|| invalid("frequency is required"))?;
        if self.occurs_every < 1 {
            return Err(invalid("occurs-every must be at least 1"));
        }
        let occurs_every = u32::try_from(self.occurs_every)
            .map_err(|_| invalid("occurs-every is too large"))?;

        Ok(FrequencySpec::new(frequency, occurs_every))
    }
}

/// One selected plan for a preventive schedule, with an optional override of
/// the catalog default recurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSelection {
    pub plan_key: String,
    #[serde(default)]
    pub frequency: Option<FrequencyOverride>,
}

impl PlanSelection {
    /// Selects a plan with its catalog default recurrence.
    pub fn plan(plan_key: impl Into<String>) -> Self {
        Self {
            plan_key: plan_key.into(),
            frequency: None,
        }
    }

    /// Selects a plan with an explicit recurrence.
    pub fn with_override(plan_key: impl Into<String>, frequency: FrequencyOverride) -> Self {
        Self {
            plan_key: plan_key.into(),
            frequency: Some(frequency),
        }
    }
}

/// Parameters for creating a preventive schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchedule {
    pub asset: String,
    /// Lowest id the schedule may receive
    pub id_seed: u64,
    pub plans: Vec<PlanSelection>,
}

/// Parameters for replacing an existing preventive schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSchedule {
    pub id: u64,
    pub asset: String,
    pub plans: Vec<PlanSelection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_to_spec() {
        let spec = FrequencyOverride::new(Frequency::Weekly, 2)
            .to_spec("PL1")
            .unwrap();
        assert_eq!(spec, FrequencySpec::new(Frequency::Weekly, 2));
    }

    #[test]
    fn test_override_rejects_missing_frequency_and_low_interval() {
        let missing = FrequencyOverride {
            frequency: None,
            occurs_every: 1,
        };
        assert!(matches!(
            missing.to_spec("PL1"),
            Err(UpkeepError::InvalidFrequencyConfig { ref plan_key, .. }) if plan_key == "PL1"
        ));

        for every in [0, -3] {
            assert!(matches!(
                FrequencyOverride::new(Frequency::Daily, every).to_spec("PL1"),
                Err(UpkeepError::InvalidFrequencyConfig { .. })
            ));
        }
    }
}
