//! Upkeep CLI Application
//!
//! Command-line interface for the upkeep maintenance planner.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use upkeep_core::WorkspaceBuilder;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let workspace = WorkspaceBuilder::new()
        .with_database_path(database_file)
        .build()
        .context("Failed to open the upkeep database")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Upkeep started");

    let cli = Cli::new(workspace, renderer);
    match command {
        Some(Equipment { command }) => cli.handle_equipment_command(command),
        Some(Plan { command }) => cli.handle_plan_command(command),
        Some(Preventive { command }) => cli.handle_preventive_command(command),
        Some(Export(args)) => cli.handle_export(args),
        Some(Snapshot { command }) => cli.handle_snapshot_command(command),
        None => cli.list_equipment(),
    }
}
