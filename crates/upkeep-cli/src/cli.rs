//! Command-line argument definitions using clap.
//!
//! Each command has a clap-derived argument struct that stays in this crate;
//! core parameter types are built from them with `From`/`TryFrom` so clap
//! never leaks into `upkeep-core`.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workspace
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use upkeep_core::{
    validators::parse_task_lines, ConflictPolicy, CreatePlan, ExportTable, Frequency,
    FrequencyOverride, Periodicity, PlanSelection, Task, DEFAULT_ID_SEED,
};

// ============================================================================
// Value parsers
// ============================================================================

/// Parses `KEY:DESCRIPTION:H:MM:SS`. The description may itself contain
/// colons; the duration is always the last three fields.
pub fn parse_task_arg(value: &str) -> std::result::Result<Task, String> {
    let mut parts = value.rsplitn(4, ':');
    let (Some(ss), Some(mm), Some(h), Some(rest)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("'{value}' must look like KEY:DESCRIPTION:H:MM:SS"));
    };
    let Some((key, description)) = rest.split_once(':') else {
        return Err(format!("'{value}' must look like KEY:DESCRIPTION:H:MM:SS"));
    };
    Task::new(key, description, &format!("{h}:{mm}:{ss}")).map_err(|e| e.to_string())
}

/// Parses `PLAN` or `PLAN:FREQUENCY:EVERY`, e.g. `PL1:weekly:2`.
pub fn parse_plan_selection(value: &str) -> std::result::Result<PlanSelection, String> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [plan_key] if !plan_key.trim().is_empty() => Ok(PlanSelection::plan(plan_key.trim())),
        [plan_key, frequency, every] => {
            let frequency = frequency
                .parse::<Frequency>()
                .map_err(|e| e.to_string())?;
            let every: i64 = every
                .trim()
                .parse()
                .map_err(|_| format!("'{every}' is not a whole number"))?;
            Ok(PlanSelection::with_override(
                plan_key.trim(),
                FrequencyOverride::new(frequency, every),
            ))
        }
        _ => Err(format!("'{value}' must look like PLAN or PLAN:FREQUENCY:EVERY")),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Collects tasks from `--task` flags followed by the lines of `--tasks-file`.
fn collect_tasks(mut tasks: Vec<Task>, tasks_file: Option<&Path>) -> Result<Vec<Task>> {
    if let Some(path) = tasks_file {
        tasks.extend(parse_task_lines(&read_file(path)?)?);
    }
    Ok(tasks)
}

// ============================================================================
// Equipment
// ============================================================================

/// Register a new equipment
#[derive(Args)]
pub struct AddEquipmentArgs {
    /// Key prefix, e.g. PUMP
    pub prefix: String,
    /// Code within the prefix, e.g. 01
    pub code: String,
    /// Free-text description (truncated to 100 characters)
    pub description: String,
}

/// Edit an equipment's prefix, code or description
///
/// The key can only change while no plan or preventive schedule references
/// the equipment.
#[derive(Args)]
pub struct EditEquipmentArgs {
    /// Current equipment key
    pub key: String,
    #[arg(long, help = "New key prefix")]
    pub prefix: Option<String>,
    #[arg(long, help = "New code")]
    pub code: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EquipmentKeyArgs {
    /// Equipment key, e.g. PUMP-01
    pub key: String,
}

/// Bulk-add equipment from a file of `prefix<TAB>code<TAB>description` lines
#[derive(Args)]
pub struct ImportEquipmentArgs {
    pub file: PathBuf,
}

impl ImportEquipmentArgs {
    pub fn read(&self) -> Result<String> {
        read_file(&self.file)
    }
}

#[derive(Subcommand)]
pub enum EquipmentCommands {
    /// Register a new equipment
    #[command(alias = "a")]
    Add(AddEquipmentArgs),
    /// List all equipment
    #[command(aliases = ["l", "ls"])]
    List,
    /// Edit an equipment
    #[command(alias = "e")]
    Edit(EditEquipmentArgs),
    /// Delete an unreferenced equipment
    #[command(aliases = ["rm"])]
    Remove(EquipmentKeyArgs),
    /// Bulk-import equipment from a tab-separated file
    Import(ImportEquipmentArgs),
}

// ============================================================================
// Maintenance plans
// ============================================================================

/// Create a maintenance plan on one equipment
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Unique plan key
    pub plan_key: String,
    #[arg(short, long, help = "Equipment the plan is created for")]
    pub equipment: String,
    #[arg(
        short,
        long,
        default_value = "Mensual",
        help = "Periodicity label (Diario, Semanal, Quincenal, Mensual, Bimestral, Trimestral, Semestral, Anual)"
    )]
    pub periodicity: String,
    #[arg(
        short,
        long = "task",
        value_parser = parse_task_arg,
        help = "Task as KEY:DESCRIPTION:H:MM:SS (repeatable)"
    )]
    pub tasks: Vec<Task>,
    #[arg(long, help = "File of task lines: KEY<TAB>DESCRIPTION<TAB>H:MM:SS")]
    pub tasks_file: Option<PathBuf>,
}

impl TryFrom<CreatePlanArgs> for CreatePlan {
    type Error = anyhow::Error;

    fn try_from(val: CreatePlanArgs) -> Result<Self> {
        Ok(CreatePlan {
            tasks: collect_tasks(val.tasks, val.tasks_file.as_deref())?,
            plan_key: val.plan_key,
            equipment_key: val.equipment,
            periodicity: Periodicity::from(val.periodicity),
        })
    }
}

/// Rewrite a plan's key, periodicity or tasks
///
/// Options left out keep their current value. Giving any task replaces the
/// whole task list.
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// Current plan key
    pub plan_key: String,
    #[arg(long, help = "New plan key")]
    pub rename: Option<String>,
    #[arg(short, long, help = "New periodicity label")]
    pub periodicity: Option<String>,
    #[arg(
        short,
        long = "task",
        value_parser = parse_task_arg,
        help = "Task as KEY:DESCRIPTION:H:MM:SS (repeatable)"
    )]
    pub tasks: Vec<Task>,
    #[arg(long, help = "File of task lines: KEY<TAB>DESCRIPTION<TAB>H:MM:SS")]
    pub tasks_file: Option<PathBuf>,
}

impl UpdatePlanArgs {
    /// Tasks given on the command line, `None` when the list should be kept.
    pub fn replacement_tasks(&self) -> Result<Option<Vec<Task>>> {
        if self.tasks.is_empty() && self.tasks_file.is_none() {
            return Ok(None);
        }
        collect_tasks(self.tasks.clone(), self.tasks_file.as_deref()).map(Some)
    }
}

#[derive(Args)]
pub struct PlanLinkArgs {
    pub plan_key: String,
    pub equipment_key: String,
}

#[derive(Args)]
pub struct PlanKeyArgs {
    pub plan_key: String,
}

#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(short, long, help = "Only plans linked to this equipment")]
    pub equipment: Option<String>,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan on one equipment
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Link an existing plan to another equipment
    Link(PlanLinkArgs),
    /// Update a plan's key, periodicity or tasks
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Detach a plan from one equipment (deletes the plan if it was the last)
    Unlink(PlanLinkArgs),
    /// Delete a plan from every equipment
    #[command(aliases = ["d", "rm"])]
    Delete(PlanKeyArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its tasks
    #[command(alias = "s")]
    Show(PlanKeyArgs),
}

// ============================================================================
// Preventive schedules
// ============================================================================

/// Schedule an equipment
///
/// Without `--plan`, every plan linked to the equipment is scheduled at its
/// default recurrence.
#[derive(Args)]
pub struct CreatePreventiveArgs {
    /// Equipment key
    pub asset: String,
    #[arg(
        short,
        long = "plan",
        value_parser = parse_plan_selection,
        help = "Plan as PLAN or PLAN:FREQUENCY:EVERY (repeatable)"
    )]
    pub plans: Vec<PlanSelection>,
    #[arg(long, default_value_t = DEFAULT_ID_SEED, help = "Lowest id to allocate")]
    pub id_seed: u64,
}

/// Replace the asset and planned work of a preventive schedule
#[derive(Args)]
pub struct UpdatePreventiveArgs {
    /// Numeric schedule id
    pub id: u64,
    #[arg(short, long, help = "Move the schedule to another equipment")]
    pub asset: Option<String>,
    #[arg(
        short,
        long = "plan",
        value_parser = parse_plan_selection,
        required = true,
        help = "Plan as PLAN or PLAN:FREQUENCY:EVERY (repeatable)"
    )]
    pub plans: Vec<PlanSelection>,
}

#[derive(Args)]
pub struct PreventiveIdArgs {
    /// Numeric schedule id
    pub id: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Leave existing schedules untouched
    Skip,
    /// Append plans missing from existing schedules
    Merge,
    /// Rebuild existing schedules from the linked plans
    Replace,
}

impl From<PolicyArg> for ConflictPolicy {
    fn from(val: PolicyArg) -> Self {
        match val {
            PolicyArg::Skip => ConflictPolicy::Skip,
            PolicyArg::Merge => ConflictPolicy::Merge,
            PolicyArg::Replace => ConflictPolicy::Replace,
        }
    }
}

/// Generate or reconcile schedules for every equipment with linked plans
#[derive(Args, Clone, Copy)]
pub struct ReconcileArgs {
    #[arg(long, value_enum, conflicts_with = "interactive")]
    pub policy: Option<PolicyArg>,
    #[arg(long, help = "Ask how to treat equipment that already has a schedule")]
    pub interactive: bool,
    #[arg(long, default_value_t = DEFAULT_ID_SEED, help = "Lowest id to allocate")]
    pub id_seed: u64,
}

#[derive(Subcommand)]
pub enum PreventiveCommands {
    /// Create the preventive schedule of an equipment
    #[command(alias = "c")]
    Create(CreatePreventiveArgs),
    /// Replace a schedule's planned work
    #[command(alias = "u")]
    Update(UpdatePreventiveArgs),
    /// Delete a schedule
    #[command(aliases = ["rm"])]
    Remove(PreventiveIdArgs),
    /// List all schedules
    #[command(aliases = ["l", "ls"])]
    List,
    /// Bulk-generate schedules from plan links
    #[command(alias = "r")]
    Reconcile(ReconcileArgs),
}

// ============================================================================
// Export / snapshot
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Equipments,
    Plans,
    Tasks,
    Preventives,
    PlannedWork,
}

impl From<TableArg> for ExportTable {
    fn from(val: TableArg) -> Self {
        match val {
            TableArg::Equipments => ExportTable::Equipments,
            TableArg::Plans => ExportTable::Plans,
            TableArg::Tasks => ExportTable::Tasks,
            TableArg::Preventives => ExportTable::Preventives,
            TableArg::PlannedWork => ExportTable::PlannedWork,
        }
    }
}

/// Print one entity table
#[derive(Args, Clone, Copy)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub table: TableArg,
}

#[derive(Args)]
pub struct SnapshotExportArgs {
    /// JSON file to write; stdout when omitted
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct SnapshotImportArgs {
    /// JSON file to read
    pub file: PathBuf,
}

impl SnapshotImportArgs {
    pub fn read(&self) -> Result<String> {
        read_file(&self.file)
    }
}

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Write the whole catalog as JSON
    Export(SnapshotExportArgs),
    /// Replace the whole catalog with a JSON snapshot
    Import(SnapshotImportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_arg() {
        let task = parse_task_arg("T1:Lubricate: bearings:0:30:00").unwrap();
        assert_eq!(task.task_key, "T1");
        assert_eq!(task.description, "Lubricate: bearings");
        assert_eq!(task.duration, "0:30:00");

        assert!(parse_task_arg("T1:Lubricate").is_err());
        assert!(parse_task_arg("T1:Lubricate:0:99:00").is_err());
    }

    #[test]
    fn test_parse_plan_selection() {
        assert_eq!(parse_plan_selection("PL1").unwrap(), PlanSelection::plan("PL1"));
        assert_eq!(
            parse_plan_selection("PL1:weekly:2").unwrap(),
            PlanSelection::with_override("PL1", FrequencyOverride::new(Frequency::Weekly, 2))
        );
        assert!(parse_plan_selection("PL1:hourly:2").is_err());
        assert!(parse_plan_selection("PL1:weekly").is_err());
    }
}
