//! Tests for the workspace facade.

use super::*;
use crate::{
    error::UpkeepError,
    models::Task,
    params::PlanSelection,
    store::MemoryStore,
};

/// Store whose writes always fail.
#[derive(Default)]
struct BrokenStore;

impl SnapshotStore for BrokenStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(None)
    }

    fn save(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Err(UpkeepError::Configuration {
            message: "disk full".to_string(),
        })
    }
}

fn create_pump_plan<S: SnapshotStore>(workspace: &mut Workspace<S>) {
    workspace.add_equipment("PUMP", "01", "Main Pump").unwrap();
    workspace
        .create_plan(&CreatePlan {
            plan_key: "PL1".to_string(),
            equipment_key: "PUMP-01".to_string(),
            periodicity: Periodicity::Mensual,
            tasks: vec![Task::new("T1", "Lubricate", "0:30:00").unwrap()],
        })
        .unwrap();
}

#[test]
fn test_every_successful_mutation_is_saved() {
    let mut workspace = Workspace::open(MemoryStore::new()).unwrap();
    create_pump_plan(&mut workspace);
    assert_eq!(workspace.store().saves(), 2);

    workspace.reconcile_bulk(1, ConflictPolicy::Skip).unwrap();
    assert_eq!(workspace.store().saves(), 3);

    let stored = workspace.store().snapshot().unwrap();
    assert_eq!(stored.preventives.len(), 1);
    assert_eq!(stored, &workspace.export_snapshot());
}

#[test]
fn test_rejected_mutation_is_not_saved() {
    let mut workspace = Workspace::open(MemoryStore::new()).unwrap();
    create_pump_plan(&mut workspace);

    let err = workspace.remove_equipment("PUMP-01").unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(workspace.store().saves(), 2);
}

#[test]
fn test_failed_save_keeps_in_memory_state() {
    let mut workspace = Workspace::open(BrokenStore).unwrap();
    let err = workspace.add_equipment("PUMP", "01", "Main Pump").unwrap_err();
    assert!(!err.is_rejection());
    assert!(workspace.catalog().equipment().contains("PUMP-01"));
}

#[test]
fn test_reopen_from_store() {
    let mut workspace = Workspace::open(MemoryStore::new()).unwrap();
    create_pump_plan(&mut workspace);
    workspace
        .create_schedule(&CreateSchedule {
            asset: "PUMP-01".to_string(),
            id_seed: 5,
            plans: vec![PlanSelection::plan("PL1")],
        })
        .unwrap();

    let reopened = Workspace::open(workspace.into_store()).unwrap();
    assert_eq!(reopened.catalog().preventives().max_id(), Some(5));
    assert_eq!(
        reopened.catalog().plans().get("PL1").unwrap().equipments,
        vec!["PUMP-01"]
    );
}

#[test]
fn test_import_snapshot_is_all_or_nothing() {
    let mut workspace = Workspace::open(MemoryStore::new()).unwrap();
    create_pump_plan(&mut workspace);
    let before = workspace.catalog().clone();

    let err = workspace
        .import_snapshot(r#"{"equipments": [{"key": "X-1"}], "plans": [], "preventives": []}"#)
        .unwrap_err();
    assert!(matches!(err, UpkeepError::InvalidImportFormat { .. }));
    assert_eq!(workspace.catalog(), &before);

    let catalog = workspace
        .import_snapshot(
            r#"{
                "equipments": [
                    {"key": "FAN-07", "prefix": "FAN", "code": "07", "description": "Exhaust fan"}
                ],
                "plans": [
                    {"planKey": "PL9", "periodicity": "Semanal", "equipmentKey": "FAN-07",
                     "tasks": [{"taskKey": "T1", "description": "Clean blades", "duration": "0:20:00"}]},
                    {"planKey": "PL9", "periodicity": "Semanal", "equipments": ["FAN-07", "FAN-08"]}
                ],
                "preventives": []
            }"#,
        )
        .unwrap();
    assert_eq!(catalog.equipment().len(), 1);
    assert_eq!(catalog.plans().len(), 1);
    assert_eq!(
        catalog.plans().get("PL9").unwrap().equipments,
        vec!["FAN-07", "FAN-08"]
    );
    assert!(!workspace.catalog().equipment().contains("PUMP-01"));
}

#[test]
fn test_interactive_reconcile_through_workspace() {
    let mut workspace = Workspace::open(MemoryStore::new()).unwrap();
    create_pump_plan(&mut workspace);
    workspace.reconcile_bulk(1, ConflictPolicy::Skip).unwrap();

    let mut prompts = Vec::new();
    let mut confirm = |message: &str| {
        prompts.push(message.to_string());
        true
    };
    let stats = workspace
        .reconcile_bulk_interactive(1, &mut confirm)
        .unwrap();
    assert_eq!(stats.updated, 1);
    assert_eq!(prompts.len(), 2);
}
