//! Data models for equipment, maintenance plans and preventive schedules.
//!
//! Cross references between the three record kinds are always plain keys:
//! a plan lists equipment keys, a preventive schedule names its asset key and
//! the plan keys of its planned work. Display implementations live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use upkeep_core::models::{format_preventive_id, parse_preventive_id, Equipment};
//!
//! assert_eq!(Equipment::key_for("PUMP", "01"), "PUMP-01");
//! assert_eq!(format_preventive_id(42), "PR0000042");
//! assert_eq!(parse_preventive_id("PR0000042"), Some(42));
//! ```

pub mod equipment;
pub mod plan;
pub mod preventive;


pub use equipment::Equipment;
pub use plan::{MaintenancePlan, PlanRecord, Task};
pub use preventive::{format_preventive_id, parse_preventive_id, PlannedWork, PreventiveSchedule};
