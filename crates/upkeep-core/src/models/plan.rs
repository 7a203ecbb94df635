//! Maintenance plan and task model definitions.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, UpkeepError},
    periodicity::Periodicity,
    validators::{require, truncate_text, validate_duration, DESCRIPTION_MAX},
};

/// A unit of work inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_key: String,

    /// Free text, at most 100 characters
    pub description: String,

    /// Estimated duration as `H:MM:SS`
    pub duration: String,
}

impl Task {
    /// Builds a validated task. Fields are trimmed and the description is
    /// truncated to 100 characters.
    pub fn new(task_key: &str, description: &str, duration: &str) -> Result<Self> {
        require("task_key", task_key)?;
        require("description", description)?;
        require("duration", duration)?;

        let duration = duration.trim();
        if !validate_duration(duration) {
            return Err(UpkeepError::invalid_input("duration").with_reason(format!(
                "'{duration}' for task '{}' must be H:MM:SS",
                task_key.trim()
            )));
        }

        Ok(Self {
            task_key: task_key.trim().to_string(),
            description: truncate_text(description.trim(), DESCRIPTION_MAX),
            duration: duration.to_string(),
        })
    }
}

/// A named, reusable bundle of tasks linked to one or more equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePlan {
    /// Globally unique plan key
    pub plan_key: String,

    /// Derived from the first linked equipment and the periodicity when the
    /// plan is saved
    pub description: String,

    pub periodicity: Periodicity,

    /// Ordered task list, never empty
    pub tasks: Vec<Task>,

    /// Linked equipment keys, without duplicates and never empty
    pub equipments: Vec<String>,
}

impl MaintenancePlan {
    /// Builds the stored description for a plan.
    pub fn derive_description(equipment_description: &str, periodicity: &Periodicity) -> String {
        truncate_text(
            &format!("{equipment_description} - {periodicity}"),
            DESCRIPTION_MAX,
        )
    }

    /// Whether the plan is linked to the given equipment.
    pub fn is_linked_to(&self, equipment_key: &str) -> bool {
        self.equipments.iter().any(|key| key == equipment_key)
    }

    /// Adds an equipment link, returning false if it was already present.
    pub(crate) fn link(&mut self, equipment_key: &str) -> bool {
        if self.is_linked_to(equipment_key) {
            return false;
        }
        self.equipments.push(equipment_key.to_string());
        true
    }

    /// Removes an equipment link, returning whether it was present.
    pub(crate) fn unlink(&mut self, equipment_key: &str) -> bool {
        let before = self.equipments.len();
        self.equipments.retain(|key| key != equipment_key);
        before != self.equipments.len()
    }
}

/// Serialized shape of a plan as found in snapshots.
///
/// Older snapshots store a single `equipmentKey` per plan instead of the
/// `equipments` list, and may repeat a plan key once per equipment. Records
/// are turned into [`MaintenancePlan`]s by
/// [`PlanRegistry::normalize`](crate::registry::PlanRegistry::normalize).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub plan_key: String,

    #[serde(default)]
    pub description: String,

    pub periodicity: Periodicity,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipments: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_key: Option<String>,
}

impl From<MaintenancePlan> for PlanRecord {
    fn from(plan: MaintenancePlan) -> Self {
        Self {
            plan_key: plan.plan_key,
            description: plan.description,
            periodicity: plan.periodicity,
            tasks: plan.tasks,
            equipments: Some(plan.equipments),
            equipment_key: None,
        }
    }
}
