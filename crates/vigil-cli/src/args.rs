use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DocumentArgs, ExportArgs, PlanCommands, VehicleCommands};

/// Operation plan tracker for municipal guard deployments
///
/// Vigil records operation plans (event, location, schedule, staffing,
/// logistics), tracks each plan from planning to completion, checks in
/// vehicles as they arrive and prints official documents and reports. Every
/// change is kept in a cache on this machine and written to a shared store so
/// other devices see it.
#[derive(Parser)]
#[command(version, about, name = "vigil")]
pub struct Args {
    /// Path to this device's cache database. Defaults to
    /// $XDG_DATA_HOME/vigil/cache.db
    #[arg(long, global = true)]
    pub cache_file: Option<PathBuf>,

    /// Path to the shared store database. Defaults to
    /// $XDG_DATA_HOME/vigil/remote.db
    #[arg(long, global = true)]
    pub remote_file: Option<PathBuf>,

    /// How often the shared store is checked for changes, in milliseconds
    #[arg(long, global = true, default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Start with the built-in sample operations when the cache is empty
    #[arg(long, global = true)]
    pub demo_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the vigil CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage operation plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Vehicle check-in
    #[command(alias = "v")]
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommands,
    },
    /// Print the summary report of all operations
    Report,
    /// Print the official document for one operation
    Document(DocumentArgs),
    /// Export all operations to a JSON backup file
    Export(ExportArgs),
    /// Follow changes from every device until interrupted
    Watch,
}
