//! Core library for the Upkeep maintenance planner.
//!
//! Upkeep tracks equipment, reusable maintenance plans linked to any number
//! of equipment, and one preventive schedule per asset that binds some of
//! those plans to a recurrence. This crate holds the rules that keep the
//! three consistent: key uniqueness, which renames and deletions are allowed
//! while something still references a record, and the bulk reconciliation
//! that derives preventive schedules from the plan links.
//!
//! # Layers
//!
//! - [`Catalog`]: in-memory registries plus every operation, synchronous and
//!   validate-then-mutate
//! - [`Workspace`]: a catalog bound to a [`store::SnapshotStore`], saving after
//!   every successful mutation
//! - [`Database`]: the SQLite snapshot store, opened through
//!   [`WorkspaceBuilder`]
//! - [`display`]: markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use upkeep_core::{
//!     ConflictPolicy, CreatePlan, Periodicity, Task, WorkspaceBuilder,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let mut workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some(dir.path().join("upkeep.db")))
//!     .build()?;
//!
//! workspace.add_equipment("PUMP", "01", "Main Pump")?;
//! workspace.create_plan(&CreatePlan {
//!     plan_key: "PL1".to_string(),
//!     equipment_key: "PUMP-01".to_string(),
//!     periodicity: Periodicity::Mensual,
//!     tasks: vec![Task::new("T1", "Lubricate", "0:30:00")?],
//! })?;
//!
//! let stats = workspace.reconcile_bulk(1, ConflictPolicy::Skip)?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod editing;
pub mod error;
pub mod guard;
pub mod models;
pub mod params;
pub mod periodicity;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod validators;
pub mod workspace;

// Re-export commonly used types
pub use catalog::{
    scheduler::DEFAULT_ID_SEED, Catalog, Confirm, ConflictPolicy, ExportRows, ExportTable,
    ReconcileStats, UnlinkOutcome,
};
pub use db::Database;
pub use editing::{EditingContext, PendingTasks};
pub use error::{EntityKind, Result, UpkeepError};
pub use guard::RelationshipGuard;
pub use models::{Equipment, MaintenancePlan, PlannedWork, PreventiveSchedule, Task};
pub use params::{CreatePlan, CreateSchedule, FrequencyOverride, PlanSelection, UpdatePlan, UpdateSchedule};
pub use periodicity::{Frequency, FrequencySpec, Periodicity};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use workspace::{Workspace, WorkspaceBuilder};
