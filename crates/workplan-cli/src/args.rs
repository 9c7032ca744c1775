use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{EntityCommands, ExportCommands, PlanCommands, RenderCommands, TaskCommands};

/// Command-line interface for Workplan
///
/// Workplan keeps a single active work plan: metadata, the issuing and
/// receiving companies, and a list of dated tasks. The plan is saved
/// automatically after every change; snapshots can be saved by hand and
/// loaded back later. Plans can be rendered to HTML, exported to a
/// paginated A4 PDF or turned into a standalone print page.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Directory holding the plan records. Defaults to
    /// $XDG_DATA_HOME/workplan/plans
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Workplan CLI
///
/// Without a command, `wp` prints an overview of the active plan.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the active plan and its saved snapshots
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Edit the issuing or receiving company
    #[command(alias = "e")]
    Entity {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Manage the tasks of the active plan
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show the plan timeline
    #[command(alias = "tl")]
    Timeline,
    /// Render a view of the plan as a standalone HTML page
    #[command(alias = "r")]
    Render {
        #[command(subcommand)]
        command: RenderCommands,
    },
    /// Export the plan to PDF or to a print page
    #[command(alias = "x")]
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
}
