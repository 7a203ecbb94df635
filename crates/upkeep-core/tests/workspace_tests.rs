mod common;

use common::{create_test_workspace, plan_on, reopen};
use upkeep_core::{
    ConflictPolicy, CreateSchedule, ExportTable, Frequency, FrequencyOverride, Periodicity,
    PlanSelection, UpkeepError,
};

#[test]
fn test_pump_scenario_persists_across_reopen() {
    let (temp_dir, mut workspace) = create_test_workspace();

    workspace
        .add_equipment("PUMP", "01", "Main Pump")
        .expect("Failed to add equipment");
    workspace
        .create_plan(&plan_on("PL1", "PUMP-01", Periodicity::Mensual))
        .expect("Failed to create plan");
    let stats = workspace
        .reconcile_bulk(1, ConflictPolicy::Skip)
        .expect("Failed to reconcile");
    assert_eq!(stats.created, 1);
    drop(workspace);

    let workspace = reopen(&temp_dir);
    let schedule = workspace
        .catalog()
        .preventives()
        .for_asset("PUMP-01")
        .expect("Schedule should persist");
    assert_eq!(schedule.id, 1);
    assert_eq!(schedule.preventive_maintenance_id, "PR0000001");
    assert_eq!(schedule.planned_work[0].maintenance_plan, "PL1");
    assert_eq!(schedule.planned_work[0].frequency, Frequency::Monthly);
    assert_eq!(schedule.planned_work[0].occurs_every, 1);
}

#[test]
fn test_removal_sequence_persists() {
    let (temp_dir, mut workspace) = create_test_workspace();
    workspace.add_equipment("PUMP", "01", "Main Pump").unwrap();
    workspace
        .create_plan(&plan_on("PL1", "PUMP-01", Periodicity::Mensual))
        .unwrap();
    workspace.reconcile_bulk(1, ConflictPolicy::Skip).unwrap();

    let err = workspace.remove_equipment("PUMP-01").unwrap_err();
    assert!(matches!(err, UpkeepError::ReferencedByPlanOrSchedule { .. }));

    workspace.remove_schedule(1).unwrap();
    let outcome = workspace
        .unlink_plan_from_equipment("PL1", "PUMP-01")
        .unwrap();
    assert!(outcome.plan_deleted());
    workspace.remove_equipment("PUMP-01").unwrap();
    drop(workspace);

    let workspace = reopen(&temp_dir);
    assert!(workspace.catalog().equipment().is_empty());
    assert!(workspace.catalog().plans().is_empty());
    assert!(workspace.catalog().preventives().is_empty());
}

#[test]
fn test_snapshot_export_import_round_trip() {
    let (_temp_dir, mut workspace) = create_test_workspace();
    workspace.add_equipment("PUMP", "01", "Main Pump").unwrap();
    workspace.add_equipment("PUMP", "02", "Backup pump").unwrap();
    workspace
        .create_plan(&plan_on("PL1", "PUMP-01", Periodicity::Quincenal))
        .unwrap();
    workspace.link_existing_plan("PL1", "PUMP-02").unwrap();
    workspace
        .create_schedule(&CreateSchedule {
            asset: "PUMP-02".to_string(),
            id_seed: 10,
            plans: vec![PlanSelection::with_override(
                "PL1",
                FrequencyOverride::new(Frequency::Daily, 3),
            )],
        })
        .unwrap();

    let json = workspace
        .export_snapshot()
        .to_json_pretty()
        .expect("Failed to serialize snapshot");

    let (_other_dir, mut other) = create_test_workspace();
    other.import_snapshot(&json).expect("Failed to import snapshot");
    assert_eq!(other.catalog(), workspace.catalog());

    let work = other.export_rows(ExportTable::PlannedWork);
    assert_eq!(work.rows, vec![vec!["PR0000010", "PL1", "Daily", "3"]]);
}

#[test]
fn test_rejected_import_keeps_stored_state() {
    let (temp_dir, mut workspace) = create_test_workspace();
    workspace.add_equipment("PUMP", "01", "Main Pump").unwrap();

    let err = workspace
        .import_snapshot(r#"{"equipments": [], "plans": "nope", "preventives": []}"#)
        .unwrap_err();
    assert!(matches!(err, UpkeepError::InvalidImportFormat { .. }));
    drop(workspace);

    let workspace = reopen(&temp_dir);
    assert!(workspace.catalog().equipment().contains("PUMP-01"));
}
