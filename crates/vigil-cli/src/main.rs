//! Vigil CLI Application
//!
//! Command-line interface for tracking operation plans across devices.

mod args;
mod cli;
mod commands;
mod renderer;

use std::time::Duration;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use commands::Cli;
use log::info;
use renderer::TerminalRenderer;
use vigil_core::{seed::sample_operations, SyncControllerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        cache_file,
        remote_file,
        poll_interval_ms,
        no_color,
        demo_seed,
        command,
    } = Args::parse();

    let seed = if demo_seed {
        sample_operations()
    } else {
        Vec::new()
    };

    let controller = SyncControllerBuilder::new()
        .with_cache_path(cache_file)
        .with_remote_path(remote_file)
        .with_poll_interval(Duration::from_millis(poll_interval_ms))
        .with_seed(seed)
        .build()
        .await;

    info!("Vigil started with {} remote", controller.remote_tag());

    let cli = Cli::new(controller, TerminalRenderer::new(!no_color));

    let result = match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Vehicle { command }) => cli.handle_vehicle_command(command).await,
        Some(Report) => cli.report(),
        Some(Document(args)) => cli.document(args),
        Some(Export(args)) => cli.export(args),
        Some(Watch) => cli.watch().await,
        None => cli.list_plans(),
    };

    cli.finish().await?;
    result
}
