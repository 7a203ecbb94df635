//! Equipment model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::validators::{truncate_text, DESCRIPTION_MAX};

/// A physical asset that receives maintenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Unique key, always `<prefix>-<code>`
    pub key: String,

    pub prefix: String,

    pub code: String,

    /// Free text, at most 100 characters
    pub description: String,

    /// Last direct edit, or last change to a plan or schedule that references
    /// this equipment (UTC)
    #[serde(default = "Timestamp::now")]
    pub last_modified: Timestamp,
}

impl Equipment {
    /// Builds the registry key for a prefix/code pair.
    pub fn key_for(prefix: &str, code: &str) -> String {
        format!("{prefix}-{code}")
    }

    pub(crate) fn new(prefix: &str, code: &str, description: &str, now: Timestamp) -> Self {
        Self {
            key: Self::key_for(prefix, code),
            prefix: prefix.to_string(),
            code: code.to_string(),
            description: truncate_text(description, DESCRIPTION_MAX),
            last_modified: now,
        }
    }
}
