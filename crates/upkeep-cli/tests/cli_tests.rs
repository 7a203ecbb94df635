use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a test database
fn upkeep_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("upkeep").expect("Failed to find upkeep binary");
    cmd.arg("--no-color")
        .args(["--database-file", db_path.to_str().unwrap()]);
    cmd
}

/// Registers PUMP-01 with plan PL1 (Mensual) linked to it.
fn seed_pump(db_path: &Path) {
    upkeep_cmd(db_path)
        .args(["equipment", "add", "PUMP", "01", "Main Pump"])
        .assert()
        .success();
    upkeep_cmd(db_path)
        .args([
            "plan",
            "create",
            "PL1",
            "--equipment",
            "PUMP-01",
            "--task",
            "T1:Lubricate bearings:0:30:00",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_default_command_lists_equipment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No equipment found."));
}

#[test]
fn test_cli_add_and_list_equipment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "PUMP", "01", "Main Pump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created equipment PUMP-01"))
        .stdout(predicate::str::contains("- **Description**: Main Pump"));

    upkeep_cmd(&db_path)
        .args(["equipment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## PUMP-01"));
}

#[test]
fn test_cli_duplicate_equipment_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "PUMP", "01", "Main Pump"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "PUMP", "01", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("with key 'PUMP-01' already exists"));
}

#[test]
fn test_cli_edit_equipment_blocked_while_referenced() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["equipment", "edit", "PUMP-01", "--code", "02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be changed"));

    // Description-only edits keep the key and are allowed
    upkeep_cmd(&db_path)
        .args(["equipment", "edit", "PUMP-01", "--description", "Booster Pump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated equipment PUMP-01"))
        .stdout(predicate::str::contains("Description changed"));
}

#[test]
fn test_cli_import_equipment_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = temp_dir.path().join("equipment.tsv");
    fs::write(&file, "PUMP\t01\tMain Pump\nFAN\t02\tExhaust Fan\n").unwrap();

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "PUMP", "01", "Main Pump"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["equipment", "import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 equipment, skipped 1 existing"));
}

#[test]
fn test_cli_plan_create_show_and_list() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["plan", "show", "PL1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## PL1 (Mensual)"))
        .stdout(predicate::str::contains("Main Pump - Mensual"))
        .stdout(predicate::str::contains("- **T1** Lubricate bearings (0:30:00)"));

    upkeep_cmd(&db_path)
        .args(["plan", "list", "--equipment", "PUMP-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## PL1"));
}

#[test]
fn test_cli_plan_create_requires_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "PUMP", "01", "Main Pump"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["plan", "create", "PL1", "--equipment", "PUMP-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain at least one task"));
}

#[test]
fn test_cli_plan_create_rejects_bad_task_argument() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    upkeep_cmd(&db_path)
        .args([
            "plan",
            "create",
            "PL1",
            "--equipment",
            "PUMP-01",
            "--task",
            "T1:Lubricate",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY:DESCRIPTION:H:MM:SS"));
}

#[test]
fn test_cli_plan_tasks_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let tasks = temp_dir.path().join("tasks.tsv");
    fs::write(&tasks, "T1\tInspect seals\t0:15:00\nT2\tReplace filter\t1:00:00\n").unwrap();

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "FAN", "02", "Exhaust Fan"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args([
            "plan",
            "create",
            "PL9",
            "--equipment",
            "FAN-02",
            "--periodicity",
            "Semanal",
            "--tasks-file",
            tasks.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created maintenance plan PL9"))
        .stdout(predicate::str::contains("- **T2** Replace filter (1:00:00)"));
}

#[test]
fn test_cli_link_unlink_and_delete_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["equipment", "add", "FAN", "02", "Exhaust Fan"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["plan", "link", "PL1", "FAN-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked PL1 to FAN-02"));

    upkeep_cmd(&db_path)
        .args(["plan", "link", "PL1", "FAN-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already linked"));

    upkeep_cmd(&db_path)
        .args(["plan", "unlink", "PL1", "PUMP-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("still linked to FAN-02"));

    upkeep_cmd(&db_path)
        .args(["plan", "delete", "PL1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted maintenance plan PL1"));

    upkeep_cmd(&db_path)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No maintenance plans found."));
}

#[test]
fn test_cli_preventive_create_with_override() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["preventive", "create", "PUMP-01", "--plan", "PL1:weekly:2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created preventive schedule PR0000001 for PUMP-01",
        ))
        .stdout(predicate::str::contains("- PL1: Weekly every 2 weeks"));

    // The plan is now in use and cannot be deleted
    upkeep_cmd(&db_path)
        .args(["plan", "delete", "PL1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is used by preventive schedules for: PUMP-01"));
}

#[test]
fn test_cli_preventive_create_defaults_to_linked_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["preventive", "create", "PUMP-01", "--id-seed", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## PR0000040 (ID: 40)"))
        .stdout(predicate::str::contains("- PL1: Monthly every month"));
}

#[test]
fn test_cli_preventive_update_and_remove() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["preventive", "create", "PUMP-01"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["preventive", "update", "1", "--plan", "PL1:daily:3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated preventive schedule PR0000001"))
        .stdout(predicate::str::contains("- PL1: Daily every 3 days"));

    upkeep_cmd(&db_path)
        .args(["preventive", "update", "1", "--plan", "PL1:daily:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid frequency for plan 'PL1'"));

    upkeep_cmd(&db_path)
        .args(["preventive", "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted preventive schedule PR0000001"));

    upkeep_cmd(&db_path)
        .args(["preventive", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No preventive schedules found."));
}

#[test]
fn test_cli_reconcile_policies() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["preventive", "reconcile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Created**: 1"));

    upkeep_cmd(&db_path)
        .args(["preventive", "reconcile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Skipped**: 1"));

    upkeep_cmd(&db_path)
        .args(["preventive", "reconcile", "--policy", "replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Updated**: 1"));
}

#[test]
fn test_cli_reconcile_interactive_reads_answers() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["preventive", "reconcile"])
        .assert()
        .success();

    upkeep_cmd(&db_path)
        .args(["preventive", "reconcile", "--interactive"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update them? [y/N]"))
        .stdout(predicate::str::contains("- **Skipped**: 1"));
}

#[test]
fn test_cli_export_table() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["export", "tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| MaintenancePlanKey | TaskKey | Description | Duration |",
        ))
        .stdout(predicate::str::contains("| PL1 | T1 | Lubricate bearings | 0:30:00 |"));

    upkeep_cmd(&db_path)
        .args(["export", "planned-work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rows."));
}

#[test]
fn test_cli_snapshot_round_trip() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let other_db = temp_dir.path().join("other.db");
    let file = temp_dir.path().join("snapshot.json");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["snapshot", "export", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot written to"));

    upkeep_cmd(&other_db)
        .args(["snapshot", "import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 1 equipment, 1 plans, 0 preventive schedules",
        ));

    upkeep_cmd(&other_db)
        .args(["plan", "show", "PL1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Equipment**: PUMP-01"));
}

#[test]
fn test_cli_snapshot_import_rejects_bad_shape() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let file = temp_dir.path().join("bad.json");
    fs::write(&file, r#"{"equipments": []}"#).unwrap();
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["snapshot", "import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import format"));

    // Nothing was replaced
    upkeep_cmd(&db_path)
        .args(["plan", "show", "PL1"])
        .assert()
        .success();
}

#[test]
fn test_cli_snapshot_export_to_stdout() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_pump(&db_path);

    upkeep_cmd(&db_path)
        .args(["snapshot", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"planKey\": \"PL1\""))
        .stdout(predicate::str::contains("\"version\": \"1.0\""));
}
