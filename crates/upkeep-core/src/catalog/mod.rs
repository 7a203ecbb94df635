//! In-memory maintenance catalog.
//!
//! [`Catalog`] owns the three registries and implements every operation that
//! spans them. Each operation validates first, through the registries and the
//! [`RelationshipGuard`], and only then mutates, so a rejected request leaves
//! the catalog exactly as it was.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ equipment_ops    │   │ plan_ops         │   │ scheduler,       │
//! │ (add, rename,    │   │ (create, link,   │   │ reconcile        │
//! │  remove, import) │   │  update, unlink) │   │ (preventives)    │
//! └────────┬─────────┘   └────────┬─────────┘   └────────┬─────────┘
//!          └──────────────┬───────┴──────────────────────┘
//!                         ▼
//!              RelationshipGuard + registries
//! ```
//!
//! All operations are synchronous and run to completion before returning.

pub mod equipment_ops;
pub mod export;
pub mod plan_ops;
pub mod reconcile;
pub mod scheduler;


use log::warn;

pub use export::{ExportRows, ExportTable};
pub use plan_ops::UnlinkOutcome;
pub use reconcile::{Confirm, ConflictPolicy, ReconcileStats};

use crate::{
    error::Result,
    guard::RelationshipGuard,
    registry::{EquipmentRegistry, PlanRegistry, PreventiveRegistry},
    snapshot::Snapshot,
};

/// Equipment, plans and preventive schedules with their relationship rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub(crate) equipment: EquipmentRegistry,
    pub(crate) plans: PlanRegistry,
    pub(crate) preventives: PreventiveRegistry,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a snapshot, normalizing legacy plan shapes.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let catalog = Self {
            equipment: EquipmentRegistry::from_records(snapshot.equipments)?,
            plans: PlanRegistry::from_records(snapshot.plans),
            preventives: PreventiveRegistry::from_records(snapshot.preventives)?,
        };

        for plan in &catalog.plans {
            for key in plan.equipments.iter().filter(|k| !catalog.equipment.contains(k)) {
                warn!("Plan '{}' links unknown equipment '{key}'", plan.plan_key);
            }
        }
        for schedule in &catalog.preventives {
            if !catalog.equipment.contains(&schedule.asset) {
                warn!(
                    "Preventive {} references unknown asset '{}'",
                    schedule.preventive_maintenance_id, schedule.asset
                );
            }
        }

        Ok(catalog)
    }

    /// Produces the whole-document snapshot of the current state.
    pub fn to_snapshot(&self) -> Snapshot {
        self.clone().into_snapshot()
    }

    /// Consumes the catalog into its snapshot.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(
            self.equipment.into_records(),
            self.plans.into_plans().into_iter().map(Into::into).collect(),
            self.preventives.into_schedules(),
        )
    }

    pub fn equipment(&self) -> &EquipmentRegistry {
        &self.equipment
    }

    pub fn plans(&self) -> &PlanRegistry {
        &self.plans
    }

    pub fn preventives(&self) -> &PreventiveRegistry {
        &self.preventives
    }

    /// Relationship rules over the current plans and schedules.
    pub fn guard(&self) -> RelationshipGuard<'_> {
        RelationshipGuard::new(&self.plans, &self.preventives)
    }
}
