//! Preventive schedule model definition.

use serde::{Deserialize, Serialize};

use crate::periodicity::{Frequency, FrequencySpec};

const PREVENTIVE_ID_PREFIX: &str = "PR";

/// Formats a numeric schedule id as `PR` followed by seven zero-padded digits.
pub fn format_preventive_id(id: u64) -> String {
    format!("{PREVENTIVE_ID_PREFIX}{id:07}")
}

/// Recovers the numeric id by stripping the `PR` prefix and leading zeros.
pub fn parse_preventive_id(preventive_maintenance_id: &str) -> Option<u64> {
    preventive_maintenance_id
        .strip_prefix(PREVENTIVE_ID_PREFIX)?
        .parse()
        .ok()
}

/// One plan + recurrence entry of a preventive schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWork {
    /// Copy of the owning schedule's preventive maintenance id
    pub preventive_maintenance_id: String,

    /// Plan key
    pub maintenance_plan: String,

    pub frequency: Frequency,

    /// Positive interval in `frequency` units
    pub occurs_every: u32,
}

impl PlannedWork {
    pub(crate) fn new(preventive_maintenance_id: &str, plan_key: &str, spec: FrequencySpec) -> Self {
        Self {
            preventive_maintenance_id: preventive_maintenance_id.to_string(),
            maintenance_plan: plan_key.to_string(),
            frequency: spec.frequency,
            occurs_every: spec.occurs_every,
        }
    }
}

/// The single preventive maintenance record of an asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveSchedule {
    /// Unique numeric id
    pub id: u64,

    /// `PR` + zero-padded id
    pub preventive_maintenance_id: String,

    /// Derived from the asset when the schedule is written
    pub description: String,

    /// Equipment key
    pub asset: String,

    #[serde(default)]
    pub planned_work: Vec<PlannedWork>,
}

impl PreventiveSchedule {
    /// Whether any planned-work entry uses the given plan.
    pub fn references_plan(&self, plan_key: &str) -> bool {
        self.planned_work
            .iter()
            .any(|work| work.maintenance_plan == plan_key)
    }

    /// Plan keys of the planned work, in entry order.
    pub fn plan_keys(&self) -> impl Iterator<Item = &str> {
        self.planned_work
            .iter()
            .map(|work| work.maintenance_plan.as_str())
    }

    /// Numeric id as exported, derived from the preventive maintenance id.
    pub fn numeric_id(&self) -> u64 {
        parse_preventive_id(&self.preventive_maintenance_id).unwrap_or(self.id)
    }
}
