//! Persistent facade over the [`Catalog`].
//!
//! A [`Workspace`] owns a catalog and a [`SnapshotStore`]. Reads go straight
//! to the catalog; every mutating operation runs on the catalog first and, when
//! it succeeds, the full snapshot is handed to the store before returning.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Workspace    │    │     Catalog     │    │  SnapshotStore  │
//! │ (mutate + save) │───▶│ (rules, state)  │    │ (SQLite/memory) │
//! │                 │────────────────────────▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! A failed save is returned to the caller but the in-memory change is kept;
//! the next successful save writes it out.
//!
//! # Examples
//!
//! ```rust
//! use upkeep_core::{store::MemoryStore, ConflictPolicy, CreatePlan, Periodicity, Task, Workspace};
//!
//! let mut workspace = Workspace::open(MemoryStore::new())?;
//! workspace.add_equipment("PUMP", "01", "Main Pump")?;
//! workspace.create_plan(&CreatePlan {
//!     plan_key: "PL1".to_string(),
//!     equipment_key: "PUMP-01".to_string(),
//!     periodicity: Periodicity::Mensual,
//!     tasks: vec![Task::new("T1", "Lubricate", "0:30:00")?],
//! })?;
//!
//! let stats = workspace.reconcile_bulk(1, ConflictPolicy::Skip)?;
//! assert_eq!(stats.created, 1);
//! # Ok::<(), upkeep_core::UpkeepError>(())
//! ```

mod builder;

#[cfg(test)]
mod tests;

use log::{debug, info};

pub use builder::WorkspaceBuilder;

use crate::{
    catalog::{Catalog, Confirm, ConflictPolicy, ExportRows, ExportTable, ReconcileStats, UnlinkOutcome},
    editing::{EditingContext, PendingTasks},
    error::Result,
    models::{Equipment, MaintenancePlan, PreventiveSchedule},
    params::{CreatePlan, CreateSchedule, UpdatePlan, UpdateSchedule},
    periodicity::Periodicity,
    registry::EquipmentImport,
    snapshot::Snapshot,
    store::SnapshotStore,
};

/// A catalog bound to the store it is saved to.
pub struct Workspace<S: SnapshotStore> {
    catalog: Catalog,
    store: S,
}

impl<S: SnapshotStore> Workspace<S> {
    /// Loads the stored snapshot, or starts empty when nothing is stored.
    pub fn open(store: S) -> Result<Self> {
        let catalog = match store.load()? {
            Some(snapshot) => Catalog::from_snapshot(snapshot)?,
            None => Catalog::new(),
        };
        debug!(
            "Opened workspace with {} equipment, {} plans, {} preventives",
            catalog.equipment().len(),
            catalog.plans().len(),
            catalog.preventives().len()
        );
        Ok(Self { catalog, store })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs a catalog operation and saves when it succeeds.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let value = op(&mut self.catalog)?;
        self.persist()?;
        Ok(value)
    }

    /// Writes the current catalog to the store.
    pub fn persist(&mut self) -> Result<()> {
        debug!("Saving snapshot");
        self.store.save(&self.catalog.to_snapshot())
    }

    // Equipment

    pub fn add_equipment(&mut self, prefix: &str, code: &str, description: &str) -> Result<Equipment> {
        self.mutate(|c| c.add_equipment(prefix, code, description))
    }

    pub fn rename_equipment(
        &mut self,
        old_key: &str,
        new_prefix: &str,
        new_code: &str,
        new_description: &str,
    ) -> Result<Equipment> {
        self.mutate(|c| c.rename_equipment(old_key, new_prefix, new_code, new_description))
    }

    pub fn remove_equipment(&mut self, key: &str) -> Result<Equipment> {
        self.mutate(|c| c.remove_equipment(key))
    }

    pub fn import_equipment(&mut self, text: &str) -> Result<EquipmentImport> {
        let import = self.mutate(|c| c.import_equipment(text))?;
        info!(
            "Imported equipment: {} added, {} skipped",
            import.added, import.skipped
        );
        Ok(import)
    }

    // Plans

    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<MaintenancePlan> {
        self.mutate(|c| c.create_plan(params))
    }

    pub fn link_existing_plan(&mut self, plan_key: &str, equipment_key: &str) -> Result<bool> {
        self.mutate(|c| c.link_existing_plan(plan_key, equipment_key))
    }

    pub fn update_plan(&mut self, params: &UpdatePlan) -> Result<MaintenancePlan> {
        self.mutate(|c| c.update_plan(params))
    }

    pub fn unlink_plan_from_equipment(
        &mut self,
        plan_key: &str,
        equipment_key: &str,
    ) -> Result<UnlinkOutcome> {
        self.mutate(|c| c.unlink_plan_from_equipment(plan_key, equipment_key))
    }

    pub fn delete_plan(&mut self, plan_key: &str) -> Result<MaintenancePlan> {
        self.mutate(|c| c.delete_plan(plan_key))
    }

    pub fn save_plan(
        &mut self,
        ctx: &EditingContext,
        plan_key: &str,
        periodicity: Periodicity,
        pending: PendingTasks,
    ) -> Result<MaintenancePlan> {
        self.mutate(|c| c.save_plan(ctx, plan_key, periodicity, pending))
    }

    // Preventive schedules

    pub fn create_schedule(&mut self, params: &CreateSchedule) -> Result<PreventiveSchedule> {
        self.mutate(|c| c.create_schedule(params))
    }

    pub fn update_schedule(&mut self, params: &UpdateSchedule) -> Result<PreventiveSchedule> {
        self.mutate(|c| c.update_schedule(params))
    }

    pub fn remove_schedule(&mut self, id: u64) -> Result<PreventiveSchedule> {
        self.mutate(|c| c.remove_schedule(id))
    }

    pub fn reconcile_bulk(&mut self, id_seed: u64, policy: ConflictPolicy) -> Result<ReconcileStats> {
        self.mutate(|c| c.reconcile_bulk(id_seed, policy))
    }

    pub fn reconcile_bulk_interactive(
        &mut self,
        id_seed: u64,
        confirm: &mut dyn Confirm,
    ) -> Result<ReconcileStats> {
        self.mutate(|c| c.reconcile_bulk_interactive(id_seed, confirm))
    }

    // Import / export

    /// Replaces the whole catalog with a JSON snapshot.
    ///
    /// The document is fully validated and normalized before anything is
    /// replaced; a rejected import leaves the current state untouched.
    pub fn import_snapshot(&mut self, json: &str) -> Result<&Catalog> {
        let catalog = Catalog::from_snapshot(Snapshot::from_json(json)?)?;
        self.catalog = catalog;
        self.persist()?;
        info!(
            "Imported snapshot: {} equipment, {} plans, {} preventives",
            self.catalog.equipment().len(),
            self.catalog.plans().len(),
            self.catalog.preventives().len()
        );
        Ok(&self.catalog)
    }

    pub fn export_snapshot(&self) -> Snapshot {
        self.catalog.to_snapshot()
    }

    pub fn export_rows(&self, table: ExportTable) -> ExportRows {
        self.catalog.export_rows(table)
    }
}
