use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    EquipmentCommands, ExportArgs, PlanCommands, PreventiveCommands, SnapshotCommands,
};

/// Maintenance planning for equipment
///
/// Upkeep keeps an equipment register, maintenance plans that can be shared
/// between equipment, and one preventive schedule per equipment. Renames and
/// deletions are refused while something still references the record, and
/// `preventive reconcile` derives schedules from the plan links in bulk.
#[derive(Parser)]
#[command(version, about, name = "upkeep")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/upkeep/upkeep.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Running without a command lists the equipment register.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage equipment
    #[command(alias = "e")]
    Equipment {
        #[command(subcommand)]
        command: EquipmentCommands,
    },
    /// Manage maintenance plans and their equipment links
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage preventive schedules
    #[command(alias = "pm")]
    Preventive {
        #[command(subcommand)]
        command: PreventiveCommands,
    },
    /// Print one entity table
    #[command(alias = "x")]
    Export(ExportArgs),
    /// Export or import the whole catalog as JSON
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },
}
