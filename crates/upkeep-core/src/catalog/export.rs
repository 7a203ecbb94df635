//! Tabular read-only views over the catalog.

use std::{fmt, str::FromStr};

use super::Catalog;
use crate::error::{Result, UpkeepError};

/// Entity tables that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    Equipments,
    Plans,
    Tasks,
    Preventives,
    PlannedWork,
}

impl ExportTable {
    pub const ALL: [ExportTable; 5] = [
        ExportTable::Equipments,
        ExportTable::Plans,
        ExportTable::Tasks,
        ExportTable::Preventives,
        ExportTable::PlannedWork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTable::Equipments => "equipments",
            ExportTable::Plans => "plans",
            ExportTable::Tasks => "tasks",
            ExportTable::Preventives => "preventives",
            ExportTable::PlannedWork => "planned-work",
        }
    }

    /// Column headers, in row order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ExportTable::Equipments => &["Key", "Prefix", "Code", "Description", "LastModified"],
            ExportTable::Plans => &[
                "MaintenancePlanKey",
                "Description",
                "Periodicity",
                "Equipments",
            ],
            ExportTable::Tasks => &["MaintenancePlanKey", "TaskKey", "Description", "Duration"],
            ExportTable::Preventives => &[
                "Id",
                "PreventiveMaintenanceId",
                "Description",
                "Asset",
            ],
            ExportTable::PlannedWork => &[
                "PreventiveMaintenanceId",
                "MaintenancePlan",
                "Frequency",
                "OccursEvery",
            ],
        }
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTable {
    type Err = UpkeepError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == wanted)
            .ok_or_else(|| {
                UpkeepError::invalid_input("table").with_reason(format!(
                    "'{s}' is not one of equipments, plans, tasks, preventives, planned-work"
                ))
            })
    }
}

/// Rows of one exported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRows {
    pub table: ExportTable,
    pub rows: Vec<Vec<String>>,
}

impl ExportRows {
    pub fn headers(&self) -> &'static [&'static str] {
        self.table.headers()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Catalog {
    /// Enumerates a table in canonical order.
    pub fn export_rows(&self, table: ExportTable) -> ExportRows {
        let rows = match table {
            ExportTable::Equipments => self
                .equipment
                .iter()
                .map(|eq| {
                    vec![
                        eq.key.clone(),
                        eq.prefix.clone(),
                        eq.code.clone(),
                        eq.description.clone(),
                        eq.last_modified.to_string(),
                    ]
                })
                .collect(),
            ExportTable::Plans => self
                .plans
                .iter()
                .map(|plan| {
                    vec![
                        plan.plan_key.clone(),
                        plan.description.clone(),
                        plan.periodicity.to_string(),
                        plan.equipments.join(", "),
                    ]
                })
                .collect(),
            ExportTable::Tasks => self
                .plans
                .iter()
                .flat_map(|plan| {
                    plan.tasks.iter().map(move |task| {
                        vec![
                            plan.plan_key.clone(),
                            task.task_key.clone(),
                            task.description.clone(),
                            task.duration.clone(),
                        ]
                    })
                })
                .collect(),
            ExportTable::Preventives => self
                .preventives
                .iter()
                .map(|schedule| {
                    vec![
                        schedule.numeric_id().to_string(),
                        schedule.preventive_maintenance_id.clone(),
                        schedule.description.clone(),
                        schedule.asset.clone(),
                    ]
                })
                .collect(),
            ExportTable::PlannedWork => self
                .preventives
                .iter()
                .flat_map(|schedule| schedule.planned_work.iter())
                .map(|work| {
                    vec![
                        work.preventive_maintenance_id.clone(),
                        work.maintenance_plan.clone(),
                        work.frequency.as_str().to_string(),
                        work.occurs_every.to_string(),
                    ]
                })
                .collect(),
        };

        ExportRows { table, rows }
    }
}
