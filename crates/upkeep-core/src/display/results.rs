//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create, update,
//! and delete operations with consistent messaging and resource display.

use std::fmt;

use crate::{
    catalog::{ReconcileStats, UnlinkOutcome},
    models::{Equipment, MaintenancePlan, PreventiveSchedule},
    registry::EquipmentImport,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use upkeep_core::{display::CreateResult, Catalog};
///
/// let mut catalog = Catalog::new();
/// let pump = catalog.add_equipment("PUMP", "01", "Main Pump").unwrap();
///
/// let output = CreateResult::new(pump).to_string();
/// assert!(output.starts_with("Created equipment PUMP-01"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Equipment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created equipment {}", self.resource.key)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created maintenance plan {}", self.resource.plan_key)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<PreventiveSchedule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created preventive schedule {} for {}",
            self.resource.preventive_maintenance_id, self.resource.asset
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for UpdateResult<Equipment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated equipment {}", self.resource.key)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated maintenance plan {}", self.resource.plan_key)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<PreventiveSchedule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated preventive schedule {}",
            self.resource.preventive_maintenance_id
        )?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Equipment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted equipment {} ({})",
            self.resource.key, self.resource.description
        )
    }
}

impl fmt::Display for DeleteResult<MaintenancePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted maintenance plan {}", self.resource.plan_key)
    }
}

impl fmt::Display for DeleteResult<PreventiveSchedule> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted preventive schedule {} (asset {})",
            self.resource.preventive_maintenance_id, self.resource.asset
        )
    }
}

impl fmt::Display for UnlinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlinkOutcome::Detached(plan) => {
                writeln!(
                    f,
                    "Detached maintenance plan {}; still linked to {}",
                    plan.plan_key,
                    plan.equipments.join(", ")
                )
            }
            UnlinkOutcome::PlanDeleted(plan) => writeln!(
                f,
                "Detached maintenance plan {} from its last equipment; the plan was deleted",
                plan.plan_key
            ),
        }
    }
}

impl fmt::Display for ReconcileStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Preventive reconciliation")?;
        writeln!(f)?;
        writeln!(f, "- **Created**: {}", self.created)?;
        writeln!(f, "- **Updated**: {}", self.updated)?;
        writeln!(f, "- **Skipped**: {}", self.skipped)
    }
}

impl fmt::Display for EquipmentImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} equipment, skipped {} existing",
            self.added, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_stats_display() {
        let stats = ReconcileStats {
            created: 2,
            updated: 1,
            skipped: 0,
        };
        let output = stats.to_string();
        assert!(output.contains("**Created**: 2"));
        assert!(output.contains("**Skipped**: 0"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let mut catalog = crate::Catalog::new();
        let pump = catalog.add_equipment("PUMP", "01", "Main Pump").unwrap();
        let output =
            UpdateResult::with_changes(pump, vec!["Description changed".to_string()]).to_string();
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Description changed"));
    }
}
