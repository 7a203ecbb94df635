//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns. All output is markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Equipment, MaintenancePlan, PlannedWork, PreventiveSchedule, Task},
    periodicity::Frequency,
};

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.key)?;
        writeln!(f)?;
        writeln!(f, "- **Description**: {}", self.description)?;
        writeln!(f, "- **Prefix**: {}", self.prefix)?;
        writeln!(f, "- **Code**: {}", self.code)?;
        writeln!(f, "- **Last modified**: {}", LocalDateTime(&self.last_modified))?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** {} ({})", self.task_key, self.description, self.duration)
    }
}

impl fmt::Display for MaintenancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.plan_key, self.periodicity)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- **Equipment**: {}", self.equipments.join(", "))?;
        writeln!(f)?;

        writeln!(f, "### Tasks")?;
        writeln!(f)?;
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for PlannedWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match (self.frequency, self.occurs_every) {
            (Frequency::Daily, 1) => "day".to_string(),
            (Frequency::Weekly, 1) => "week".to_string(),
            (Frequency::Monthly, 1) => "month".to_string(),
            (Frequency::Daily, n) => format!("{n} days"),
            (Frequency::Weekly, n) => format!("{n} weeks"),
            (Frequency::Monthly, n) => format!("{n} months"),
        };
        writeln!(
            f,
            "- {}: {} every {unit}",
            self.maintenance_plan, self.frequency
        )
    }
}

impl fmt::Display for PreventiveSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.preventive_maintenance_id, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Asset**: {}", self.asset)?;
        writeln!(f, "- **Description**: {}", self.description)?;
        writeln!(f)?;

        if self.planned_work.is_empty() {
            writeln!(f, "No planned work.")?;
        } else {
            writeln!(f, "### Planned work")?;
            writeln!(f)?;
            for work in &self.planned_work {
                write!(f, "{work}")?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}
