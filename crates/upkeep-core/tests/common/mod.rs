use upkeep_core::{CreatePlan, Database, Periodicity, Task, Workspace, WorkspaceBuilder};
use tempfile::TempDir;

/// Helper function to open a workspace on a fresh database file
pub fn create_test_workspace() -> (TempDir, Workspace<Database>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .expect("Failed to open workspace");
    (temp_dir, workspace)
}

/// Reopens the database created by [`create_test_workspace`]
pub fn reopen(temp_dir: &TempDir) -> Workspace<Database> {
    WorkspaceBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .expect("Failed to reopen workspace")
}

/// Single-task plan parameters
pub fn plan_on(plan_key: &str, equipment_key: &str, periodicity: Periodicity) -> CreatePlan {
    CreatePlan {
        plan_key: plan_key.to_string(),
        equipment_key: equipment_key.to_string(),
        periodicity,
        tasks: vec![Task::new("T1", "Lubricate", "0:30:00").expect("valid task")],
    }
}
