//! Whole-document snapshot of the catalog, as stored and as exchanged by
//! import/export.

use std::collections::HashSet;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, UpkeepError},
    models::{Equipment, PlanRecord, PreventiveSchedule},
};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

const EQUIPMENT_FIELDS: [&str; 4] = ["key", "prefix", "code", "description"];

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: String,
    pub equipments: Vec<Equipment>,
    pub plans: Vec<PlanRecord>,
    pub preventives: Vec<PreventiveSchedule>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl Snapshot {
    pub fn new(
        equipments: Vec<Equipment>,
        plans: Vec<PlanRecord>,
        preventives: Vec<PreventiveSchedule>,
    ) -> Self {
        Self {
            version: default_version(),
            equipments,
            plans,
            preventives,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| UpkeepError::import_format(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validates the shape of a raw document and converts it.
    ///
    /// Any violation rejects the whole document.
    pub fn from_value(value: Value) -> Result<Self> {
        validate_shape(&value)?;
        let snapshot: Snapshot = serde_json::from_value(value)
            .map_err(|e| UpkeepError::import_format(e.to_string()))?;
        snapshot.validate_records()?;
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Snapshot version '{}' differs from '{SNAPSHOT_VERSION}', loading anyway",
                snapshot.version
            );
        }
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the record invariants the JSON shape cannot express.
    fn validate_records(&self) -> Result<()> {
        // Repeated legacy records only add links; the first one carries the tasks
        let mut seen = HashSet::new();
        for plan in &self.plans {
            if seen.insert(plan.plan_key.as_str()) && plan.tasks.is_empty() {
                return Err(UpkeepError::import_format(format!(
                    "plan '{}' has no tasks",
                    plan.plan_key
                )));
            }
        }

        for schedule in &self.preventives {
            if let Some(work) = schedule.planned_work.iter().find(|w| w.occurs_every == 0) {
                return Err(UpkeepError::import_format(format!(
                    "planned work for '{}' in {} must occur every 1 or more",
                    work.maintenance_plan, schedule.preventive_maintenance_id
                )));
            }
        }
        Ok(())
    }
}

fn array_field<'v>(document: &'v Value, field: &str) -> Result<&'v Vec<Value>> {
    document
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| UpkeepError::import_format(format!("'{field}' must be an array")))
}

fn validate_shape(document: &Value) -> Result<()> {
    if !document.is_object() {
        return Err(UpkeepError::import_format("document must be a JSON object"));
    }

    for (index, equipment) in array_field(document, "equipments")?.iter().enumerate() {
        for field in EQUIPMENT_FIELDS {
            if !equipment.get(field).is_some_and(Value::is_string) {
                return Err(UpkeepError::import_format(format!(
                    "equipment #{} is missing string field '{field}'",
                    index + 1
                )));
            }
        }
    }

    for (index, plan) in array_field(document, "plans")?.iter().enumerate() {
        if !plan.get("planKey").is_some_and(Value::is_string) {
            return Err(UpkeepError::import_format(format!(
                "plan #{} is missing string field 'planKey'",
                index + 1
            )));
        }
        let has_links = plan.get("equipments").is_some_and(Value::is_array)
            || plan.get("equipmentKey").is_some_and(Value::is_string);
        if !has_links {
            return Err(UpkeepError::import_format(format!(
                "plan #{} needs 'equipments' or 'equipmentKey'",
                index + 1
            )));
        }
    }

    array_field(document, "preventives")?;
    Ok(())
}
