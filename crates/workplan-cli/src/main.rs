//! Workplan CLI Application
//!
//! Command-line shell around `workplan-core`: edit the active plan, manage
//! saved snapshots, render HTML views and export to PDF or a print page.

mod args;
mod cli;
mod renderer;

use Commands::*;
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use workplan_core::StoreBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        data_dir,
        no_color,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .context("Failed to open plan store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Workplan started");

    let cli = Cli::new(store, renderer);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command),
        Some(Entity { command }) => cli.handle_entity_command(command),
        Some(Task { command }) => cli.handle_task_command(command),
        Some(Timeline) => cli.show_timeline(),
        Some(Render { command }) => cli.handle_render_command(command),
        Some(Export { command }) => cli.handle_export_command(command).await,
        None => cli.show_plan(),
    }
}
