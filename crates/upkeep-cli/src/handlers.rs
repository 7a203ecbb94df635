//! Command handlers.
//!
//! [`Cli`] owns the opened workspace and the renderer. Each handler converts
//! its clap arguments into core parameters, runs the operation and renders
//! the markdown produced by the core display types.

use std::{
    fs,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use log::debug;
use upkeep_core::{
    display::{
        CreateResult, DeleteResult, EquipmentList, OperationStatus, Plans, Preventives,
        UpdateResult,
    },
    ConflictPolicy, CreatePlan, CreateSchedule, Database, Periodicity, UpdatePlan,
    UpdateSchedule, Workspace,
};

use crate::{
    cli::{
        EditEquipmentArgs, EquipmentCommands, ExportArgs, ListPlansArgs, PlanCommands,
        PreventiveCommands, ReconcileArgs, SnapshotCommands, UpdatePlanArgs,
    },
    renderer::TerminalRenderer,
};

/// Asks a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn ask(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

pub struct Cli {
    workspace: Workspace<Database>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workspace: Workspace<Database>, renderer: TerminalRenderer) -> Self {
        Self {
            workspace,
            renderer,
        }
    }

    // ------------------------------------------------------------------------
    // Equipment
    // ------------------------------------------------------------------------

    pub fn handle_equipment_command(mut self, command: EquipmentCommands) -> Result<()> {
        match command {
            EquipmentCommands::Add(args) => {
                let equipment =
                    self.workspace
                        .add_equipment(&args.prefix, &args.code, &args.description)?;
                self.renderer
                    .render(&CreateResult::new(equipment).to_string())
            }
            EquipmentCommands::List => self.list_equipment(),
            EquipmentCommands::Edit(args) => self.edit_equipment(args),
            EquipmentCommands::Remove(args) => {
                let removed = self.workspace.remove_equipment(&args.key)?;
                self.renderer.render(&DeleteResult::new(removed).to_string())
            }
            EquipmentCommands::Import(args) => {
                let text = args.read()?;
                let import = self.workspace.import_equipment(&text)?;
                self.renderer.render(&import.to_string())
            }
        }
    }

    pub fn list_equipment(&self) -> Result<()> {
        let list = EquipmentList(self.workspace.catalog().equipment().iter().cloned().collect());
        self.renderer.render(&list.to_string())
    }

    fn edit_equipment(&mut self, args: EditEquipmentArgs) -> Result<()> {
        let current = self
            .workspace
            .catalog()
            .equipment()
            .require(&args.key)?
            .clone();

        let prefix = args.prefix.unwrap_or_else(|| current.prefix.clone());
        let code = args.code.unwrap_or_else(|| current.code.clone());
        let description = args
            .description
            .unwrap_or_else(|| current.description.clone());

        let updated =
            self.workspace
                .rename_equipment(&current.key, &prefix, &code, &description)?;

        let mut changes = Vec::new();
        if updated.key != current.key {
            changes.push(format!("Key changed from {} to {}", current.key, updated.key));
        }
        if updated.description != current.description {
            changes.push("Description changed".to_string());
        }
        self.renderer
            .render(&UpdateResult::with_changes(updated, changes).to_string())
    }

    // ------------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------------

    pub fn handle_plan_command(mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let params = CreatePlan::try_from(args)?;
                let plan = self.workspace.create_plan(&params)?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Link(args) => {
                let message = if self
                    .workspace
                    .link_existing_plan(&args.plan_key, &args.equipment_key)?
                {
                    format!("Linked {} to {}", args.plan_key, args.equipment_key)
                } else {
                    format!(
                        "{} is already linked to {}",
                        args.plan_key, args.equipment_key
                    )
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            PlanCommands::Update(args) => self.update_plan(args),
            PlanCommands::Unlink(args) => {
                let outcome = self
                    .workspace
                    .unlink_plan_from_equipment(&args.plan_key, &args.equipment_key)?;
                self.renderer.render(&outcome.to_string())
            }
            PlanCommands::Delete(args) => {
                let removed = self.workspace.delete_plan(&args.plan_key)?;
                self.renderer.render(&DeleteResult::new(removed).to_string())
            }
            PlanCommands::List(args) => self.list_plans(&args),
            PlanCommands::Show(args) => {
                let plan = self.workspace.catalog().plans().require(&args.plan_key)?;
                self.renderer.render(&(*plan).to_string())
            }
        }
    }

    fn update_plan(&mut self, args: UpdatePlanArgs) -> Result<()> {
        let current = self
            .workspace
            .catalog()
            .plans()
            .require(&args.plan_key)?
            .clone();

        let tasks = args.replacement_tasks()?;
        let params = UpdatePlan {
            new_plan_key: args.rename.unwrap_or_else(|| current.plan_key.clone()),
            periodicity: args
                .periodicity
                .map(Periodicity::from)
                .unwrap_or_else(|| current.periodicity.clone()),
            tasks: tasks.unwrap_or_else(|| current.tasks.clone()),
            plan_key: args.plan_key,
        };
        let updated = self.workspace.update_plan(&params)?;

        let mut changes = Vec::new();
        if updated.plan_key != current.plan_key {
            changes.push(format!(
                "Key changed from {} to {}",
                current.plan_key, updated.plan_key
            ));
        }
        if updated.periodicity != current.periodicity {
            changes.push(format!("Periodicity set to {}", updated.periodicity));
        }
        if updated.tasks != current.tasks {
            changes.push(format!("Task list replaced ({} tasks)", updated.tasks.len()));
        }
        self.renderer
            .render(&UpdateResult::with_changes(updated, changes).to_string())
    }

    fn list_plans(&self, args: &ListPlansArgs) -> Result<()> {
        let catalog = self.workspace.catalog();
        let plans = match &args.equipment {
            Some(key) => {
                catalog.equipment().require(key)?;
                catalog.plans_for_equipment(key).into_iter().cloned().collect()
            }
            None => catalog.plans().iter().cloned().collect(),
        };
        self.renderer.render(&Plans(plans).to_string())
    }

    // ------------------------------------------------------------------------
    // Preventive schedules
    // ------------------------------------------------------------------------

    pub fn handle_preventive_command(mut self, command: PreventiveCommands) -> Result<()> {
        match command {
            PreventiveCommands::Create(args) => {
                let plans = if args.plans.is_empty() {
                    self.workspace.catalog().default_selections(&args.asset)?
                } else {
                    args.plans
                };
                let schedule = self.workspace.create_schedule(&CreateSchedule {
                    asset: args.asset,
                    id_seed: args.id_seed,
                    plans,
                })?;
                self.renderer.render(&CreateResult::new(schedule).to_string())
            }
            PreventiveCommands::Update(args) => {
                let asset = match args.asset {
                    Some(asset) => asset,
                    None => self
                        .workspace
                        .catalog()
                        .preventives()
                        .require(args.id)?
                        .asset
                        .clone(),
                };
                let schedule = self.workspace.update_schedule(&UpdateSchedule {
                    id: args.id,
                    asset,
                    plans: args.plans,
                })?;
                self.renderer.render(&UpdateResult::new(schedule).to_string())
            }
            PreventiveCommands::Remove(args) => {
                let removed = self.workspace.remove_schedule(args.id)?;
                self.renderer.render(&DeleteResult::new(removed).to_string())
            }
            PreventiveCommands::List => {
                let list = Preventives(
                    self.workspace
                        .catalog()
                        .preventives()
                        .iter()
                        .cloned()
                        .collect(),
                );
                self.renderer.render(&list.to_string())
            }
            PreventiveCommands::Reconcile(args) => self.reconcile(args),
        }
    }

    fn reconcile(&mut self, args: ReconcileArgs) -> Result<()> {
        let stats = if args.interactive {
            let mut confirm = ask;
            self.workspace
                .reconcile_bulk_interactive(args.id_seed, &mut confirm)?
        } else {
            let policy = args.policy.map(ConflictPolicy::from).unwrap_or_default();
            debug!("Reconciling with policy {policy}");
            self.workspace.reconcile_bulk(args.id_seed, policy)?
        };
        self.renderer.render(&stats.to_string())
    }

    // ------------------------------------------------------------------------
    // Export / snapshot
    // ------------------------------------------------------------------------

    pub fn handle_export(&self, args: ExportArgs) -> Result<()> {
        let rows = self.workspace.export_rows(args.table.into());
        self.renderer.render(&rows.to_string())
    }

    pub fn handle_snapshot_command(mut self, command: SnapshotCommands) -> Result<()> {
        match command {
            SnapshotCommands::Export(args) => {
                let json = self.workspace.export_snapshot().to_json_pretty()?;
                match args.file {
                    Some(path) => {
                        fs::write(&path, format!("{json}\n"))
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        self.renderer.render(
                            &OperationStatus::success(format!(
                                "Snapshot written to {}",
                                path.display()
                            ))
                            .to_string(),
                        )
                    }
                    None => {
                        println!("{json}");
                        Ok(())
                    }
                }
            }
            SnapshotCommands::Import(args) => {
                let json = args.read()?;
                let catalog = self.workspace.import_snapshot(&json)?;
                let message = format!(
                    "Imported {} equipment, {} plans, {} preventive schedules",
                    catalog.equipment().len(),
                    catalog.plans().len(),
                    catalog.preventives().len()
                );
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
        }
    }
}
