//! Command definitions and handlers for the `wp` binary.
//!
//! # Parameter Wrapper Pattern
//!
//! Argument structs derive [`clap::Args`] and convert into core request types
//! (`NewTask`, `TaskPatch`, `StatusFilter`) with `From`. CLI-only concerns
//! such as short flags, help text and value parsing stay here; the core crate
//! never sees clap. Commands that edit a block the core replaces as a whole
//! (plan metadata, entities) merge their flags into the current value instead.

use std::{fmt, fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use workplan_core::{
    Notice,
    dates::{self, parse_date},
    display::{SavedPlans, Tasks, TimelineOutline},
    export::{
        CommandCapture, DirectorySink, ExportOptions, ExportPipeline, FilePrintTarget,
        PdfComposer, PlanRegions, RegionKind, export_file_name,
    },
    models::{Entity, NewTask, PlanMetadata, StatusFilter, TaskPatch, TaskPriority, TaskStatus},
    render::{DocumentView, TimelineView, standalone_page},
    storage::FileStore,
    store::PlanStore,
};

use crate::renderer::TerminalRenderer;

/// Accepts an empty value (clears the date) or an ISO `YYYY-MM-DD` date.
fn iso_date(value: &str) -> std::result::Result<String, String> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(value.to_string())
    } else {
        Err(format!("expected a date as YYYY-MM-DD, got '{value}'"))
    }
}

/// Update the active plan's metadata
///
/// Only the given fields change; pass an empty string to clear one.
#[derive(Args)]
pub struct SetPlanArgs {
    #[arg(short, long, help = "Plan title")]
    pub title: Option<String>,
    #[arg(short, long, help = "What the plan is about")]
    pub description: Option<String>,
    #[arg(short, long, help = "Who prepared the plan")]
    pub author: Option<String>,
    #[arg(short, long, value_parser = iso_date, help = "Start date (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(short, long, value_parser = iso_date, help = "End date (YYYY-MM-DD)")]
    pub end: Option<String>,
    #[arg(short, long, help = "Goals the plan should achieve")]
    pub objectives: Option<String>,
}

impl SetPlanArgs {
    /// Overlays the given flags on `current`.
    fn merge_into(self, current: PlanMetadata) -> PlanMetadata {
        PlanMetadata {
            title: self.title.unwrap_or(current.title),
            description: self.description.unwrap_or(current.description),
            author: self.author.unwrap_or(current.author),
            start_date: self.start.unwrap_or(current.start_date),
            end_date: self.end.unwrap_or(current.end_date),
            objectives: self.objectives.unwrap_or(current.objectives),
        }
    }
}

/// Load a saved plan by id
#[derive(Args)]
pub struct LoadPlanArgs {
    #[arg(help = "Identifier of the saved plan, as listed by `wp plan saved`")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the active plan
    #[command(alias = "s")]
    Show,
    /// Update title, description, author, dates or objectives
    Set(SetPlanArgs),
    /// Discard the active plan and start an empty one
    #[command(alias = "n")]
    New,
    /// Replace the active plan with the example plan
    Example,
    /// Save a snapshot of the active plan
    Save,
    /// List saved snapshots, newest first
    #[command(aliases = ["l", "ls"])]
    Saved,
    /// Make a saved snapshot the active plan
    Load(LoadPlanArgs),
}

/// Fields of a company; only the given ones change
#[derive(Args)]
pub struct EntityArgs {
    #[arg(short, long, help = "Legal or trading name")]
    pub name: Option<String>,
    #[arg(short, long, help = "Tax identifier (RUT)")]
    pub tax_id: Option<String>,
    #[arg(short, long, help = "Postal address")]
    pub address: Option<String>,
    #[arg(short, long, help = "Phone number")]
    pub phone: Option<String>,
    #[arg(short, long, help = "Contact email")]
    pub email: Option<String>,
    #[arg(short, long, help = "Contact person")]
    pub contact: Option<String>,
}

impl EntityArgs {
    fn merge_into(self, current: Entity) -> Entity {
        Entity {
            name: self.name.unwrap_or(current.name),
            tax_id: self.tax_id.unwrap_or(current.tax_id),
            address: self.address.unwrap_or(current.address),
            phone: self.phone.unwrap_or(current.phone),
            email: self.email.unwrap_or(current.email),
            contact: self.contact.unwrap_or(current.contact),
        }
    }
}

#[derive(Subcommand)]
pub enum EntityCommands {
    /// Edit the issuing company (Empresa Emisora)
    #[command(alias = "o")]
    Origin(EntityArgs),
    /// Edit the receiving company (Empresa Destinataria)
    #[command(alias = "d")]
    Destination(EntityArgs),
}

/// Add a task to the active plan
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    #[arg(short, long, default_value = "", help = "What needs to be done")]
    pub description: String,
    #[arg(short, long, default_value = "", value_parser = iso_date, help = "Start date (YYYY-MM-DD)")]
    pub start: String,
    #[arg(short, long, default_value = "", value_parser = iso_date, help = "End date (YYYY-MM-DD)")]
    pub end: String,
    #[arg(short, long, default_value = "", help = "Person responsible")]
    pub owner: String,
    #[arg(long, value_enum, default_value_t = StatusArg::Pending, help = "Initial status")]
    pub status: StatusArg,
    #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium, help = "Priority")]
    pub priority: PriorityArg,
}

impl From<AddTaskArgs> for NewTask {
    fn from(val: AddTaskArgs) -> Self {
        NewTask {
            title: val.title,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
            owner: val.owner,
            status: val.status.into(),
            priority: val.priority.into(),
        }
    }
}

/// Update a task's fields
///
/// Fields that are not given are left unchanged. An unknown id changes
/// nothing.
#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Identifier of the task to update")]
    pub id: String,
    #[arg(short, long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(short, long, value_parser = iso_date, help = "New start date (YYYY-MM-DD)")]
    pub start: Option<String>,
    #[arg(short, long, value_parser = iso_date, help = "New end date (YYYY-MM-DD)")]
    pub end: Option<String>,
    #[arg(short, long, help = "New owner")]
    pub owner: Option<String>,
    #[arg(long, value_enum, help = "New status")]
    pub status: Option<StatusArg>,
    #[arg(short, long, value_enum, help = "New priority")]
    pub priority: Option<PriorityArg>,
}

impl From<UpdateTaskArgs> for TaskPatch {
    fn from(val: UpdateTaskArgs) -> Self {
        TaskPatch {
            title: val.title,
            description: val.description,
            start_date: val.start,
            end_date: val.end,
            owner: val.owner,
            status: val.status.map(Into::into),
            priority: val.priority.map(Into::into),
        }
    }
}

/// Delete a task
#[derive(Args)]
pub struct DeleteTaskArgs {
    #[arg(help = "Identifier of the task to delete")]
    pub id: String,
}

/// List the tasks of the active plan
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(long, value_enum, help = "Only show tasks with this status")]
    pub status: Option<StatusArg>,
}

impl From<ListTasksArgs> for StatusFilter {
    fn from(val: ListTasksArgs) -> Self {
        match val.status {
            Some(status) => StatusFilter::Only(status.into()),
            None => StatusFilter::All,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Update a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Delete a task
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
}

/// Where rendered HTML goes
#[derive(Args)]
pub struct RenderArgs {
    #[arg(short, long, help = "Write to this file instead of standard output")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum RenderCommands {
    /// The full plan document
    #[command(alias = "d")]
    Document(RenderArgs),
    /// The visual timeline
    #[command(alias = "t")]
    Timeline(RenderArgs),
}

/// Export the plan as a paginated A4 PDF
#[derive(Args)]
pub struct PdfExportArgs {
    #[arg(long, help = "Leave the timeline out of the export")]
    pub no_timeline: bool,
    #[arg(long, help = "Directory to write the PDF to (defaults to the current directory)")]
    pub output_dir: Option<PathBuf>,
    #[arg(
        long,
        help = "Rasterizer command producing a BMP, e.g. \"wkhtmltoimage --quiet --format bmp\""
    )]
    pub capture_command: Option<String>,
}

/// Write a standalone print page
#[derive(Args)]
pub struct PrintExportArgs {
    #[arg(long, help = "Leave the timeline out of the print page")]
    pub no_timeline: bool,
    #[arg(short, long, help = "Output file (defaults to <plan title>.html)")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Capture, paginate and write a PDF
    Pdf(PdfExportArgs),
    /// Write a print-ready HTML page
    Print(PrintExportArgs),
}

/// Command-line representation of task status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Not started yet
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusArg::Pending => write!(f, "pending"),
            StatusArg::InProgress => write!(f, "in-progress"),
            StatusArg::Completed => write!(f, "completed"),
        }
    }
}

/// Command-line representation of task priorities
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for TaskPriority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::High => TaskPriority::High,
            PriorityArg::Medium => TaskPriority::Medium,
            PriorityArg::Low => TaskPriority::Low,
        }
    }
}

impl fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityArg::High => write!(f, "high"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::Low => write!(f, "low"),
        }
    }
}

/// Runs commands against the active plan and prints the results.
pub struct Cli {
    store: PlanStore<FileStore>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: PlanStore<FileStore>, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    /// Prints the active plan with its task summary.
    pub fn show_plan(&self) -> Result<()> {
        self.renderer.render(&self.store.plan().to_string())
    }

    pub fn handle_plan_command(mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show => self.show_plan(),
            PlanCommands::Set(args) => {
                let metadata = args.merge_into(self.store.plan().metadata());
                self.store.update_metadata(metadata);
                self.notify(&Notice::success(
                    "Plan actualizado",
                    "Los datos generales del plan se actualizaron.",
                ))
            }
            PlanCommands::New => {
                self.store.reset();
                self.notify(&Notice::success(
                    "Nuevo plan",
                    format!("Se creó un plan vacío (ID: {}).", self.store.plan().id),
                ))
            }
            PlanCommands::Example => {
                self.store.load_example(dates::today());
                self.notify(&Notice::success(
                    "Ejemplo cargado",
                    format!("Se cargó \"{}\".", self.store.plan().title),
                ))
            }
            PlanCommands::Save => match self.store.save_manual() {
                Some(entry) => self.notify(&Notice::success(
                    "Plan guardado",
                    format!("\"{}\" se guardó con ID {}.", entry.title, entry.id),
                )),
                None => {
                    self.notify(&Notice::error(
                        "Error al guardar",
                        "No se pudo guardar el plan. El plan activo no se modificó.",
                    ))?;
                    bail!("Failed to save plan")
                }
            },
            PlanCommands::Saved => {
                let saved = SavedPlans(self.store.list_saved());
                debug!("Listing {} saved plan(s)", saved.len());
                self.renderer.render(&format!("# Planes Guardados\n\n{saved}"))
            }
            PlanCommands::Load(LoadPlanArgs { id }) => {
                if self.store.load_saved(&id) {
                    self.notify(&Notice::success(
                        "Plan cargado",
                        format!("Se cargó \"{}\".", self.store.plan().title),
                    ))
                } else {
                    self.notify(&Notice::error(
                        "Plan no encontrado",
                        format!("No existe un plan guardado con ID {id}."),
                    ))?;
                    bail!("Saved plan '{id}' not found")
                }
            }
        }
    }

    pub fn handle_entity_command(mut self, command: EntityCommands) -> Result<()> {
        let (entity, label) = match command {
            EntityCommands::Origin(args) => {
                let entity = args.merge_into(self.store.plan().origin.clone());
                self.store.update_origin(entity.clone());
                (entity, "Empresa Emisora")
            }
            EntityCommands::Destination(args) => {
                let entity = args.merge_into(self.store.plan().destination.clone());
                self.store.update_destination(entity.clone());
                (entity, "Empresa Destinataria")
            }
        };
        self.renderer.render(&format!("# {label}\n\n{entity}"))
    }

    pub fn handle_task_command(mut self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let id = self.store.add_task(args.into());
                match self.store.plan().task(&id) {
                    Some(task) => self.renderer.render(&task.to_string()),
                    None => Ok(()),
                }
            }
            TaskCommands::Update(args) => {
                let id = args.id.clone();
                if self.store.plan().task(&id).is_none() {
                    return self.task_not_found(&id);
                }
                let patch = TaskPatch::from(args);
                if patch.is_empty() {
                    return self.notify(&Notice::info(
                        "Sin cambios",
                        "No se indicó ningún campo para actualizar.",
                    ));
                }
                self.store.update_task(&id, patch);
                match self.store.plan().task(&id) {
                    Some(task) => self.renderer.render(&task.to_string()),
                    None => Ok(()),
                }
            }
            TaskCommands::Delete(DeleteTaskArgs { id }) => {
                let Some(title) = self.store.plan().task(&id).map(|t| t.title.clone()) else {
                    return self.task_not_found(&id);
                };
                self.store.delete_task(&id);
                self.notify(&Notice::success(
                    "Tarea eliminada",
                    format!("Se eliminó \"{title}\"."),
                ))
            }
            TaskCommands::List(args) => {
                let tasks = Tasks(self.store.tasks_matching(args.into()));
                self.renderer.render(&format!("# Tareas\n\n{tasks}"))
            }
        }
    }

    pub fn show_timeline(&self) -> Result<()> {
        self.renderer
            .render(&TimelineOutline(self.store.plan()).to_string())
    }

    pub fn handle_render_command(&self, command: RenderCommands) -> Result<()> {
        let plan = self.store.plan();
        let title = if plan.title.trim().is_empty() {
            "Plan de Trabajo"
        } else {
            plan.title.as_str()
        };
        let (body, output) = match command {
            RenderCommands::Document(RenderArgs { output }) => {
                (DocumentView(plan).to_string(), output)
            }
            RenderCommands::Timeline(RenderArgs { output }) => {
                (TimelineView(plan).to_string(), output)
            }
        };
        let page = standalone_page(title, &body);

        match output {
            Some(path) => {
                fs::write(&path, page)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                self.notify(&Notice::success(
                    "HTML generado",
                    format!("Se escribió {}.", path.display()),
                ))
            }
            None => {
                print!("{page}");
                Ok(())
            }
        }
    }

    pub async fn handle_export_command(&self, command: ExportCommands) -> Result<()> {
        let plan = self.store.plan();
        if !plan.has_content() {
            self.notify(&Notice::warning(
                "Plan vacío",
                "Agrega un título o al menos una tarea antes de exportar.",
            ))?;
            bail!("Nothing to export");
        }
        let regions = Arc::new(PlanRegions::render(plan, RegionKind::Editor));

        let outcome = match command {
            ExportCommands::Pdf(PdfExportArgs {
                no_timeline,
                output_dir,
                capture_command,
            }) => {
                let capture = match capture_command {
                    Some(line) => CommandCapture::from_command_line(&line)?,
                    None => CommandCapture::default(),
                };
                debug!("Capturing with '{}'", capture.program());
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir().context("Failed to read current directory")?,
                };
                let pipeline =
                    ExportPipeline::new(regions, Arc::new(capture), Arc::new(PdfComposer));
                let sink = DirectorySink::new(output_dir);
                pipeline
                    .download(
                        &plan.title,
                        ExportOptions {
                            include_timeline: !no_timeline,
                        },
                        &sink,
                    )
                    .await
            }
            ExportCommands::Print(PrintExportArgs {
                no_timeline,
                output,
            }) => {
                let path = output.unwrap_or_else(|| {
                    PathBuf::from(export_file_name(&plan.title))
                        .with_extension("html")
                });
                let pipeline = ExportPipeline::new(
                    regions,
                    Arc::new(CommandCapture::default()),
                    Arc::new(PdfComposer),
                );
                let target = FilePrintTarget::new(path);
                pipeline
                    .print(
                        &plan.title,
                        ExportOptions {
                            include_timeline: !no_timeline,
                        },
                        &target,
                    )
                    .await
            }
        };

        let notice = outcome.notice();
        self.notify(&notice)?;
        if notice.is_error() {
            bail!("Export failed");
        }
        Ok(())
    }

    fn task_not_found(&self, id: &str) -> Result<()> {
        self.notify(&Notice::error(
            "Tarea no encontrada",
            format!("No existe una tarea con ID {id}."),
        ))?;
        bail!("Task '{id}' not found")
    }

    fn notify(&self, notice: &Notice) -> Result<()> {
        self.renderer.render(&notice.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_accepts_empty_and_valid() {
        assert_eq!(iso_date("").unwrap(), "");
        assert_eq!(iso_date("2024-02-29").unwrap(), "2024-02-29");
        assert!(iso_date("29/02/2024").is_err());
        assert!(iso_date("2023-02-29").is_err());
    }

    #[test]
    fn test_set_plan_merges_given_fields() {
        let current = PlanMetadata {
            title: "Old".to_string(),
            author: "Ana".to_string(),
            ..Default::default()
        };
        let args = SetPlanArgs {
            title: Some("New".to_string()),
            description: None,
            author: None,
            start: Some(String::new()),
            end: None,
            objectives: None,
        };

        let merged = args.merge_into(current);
        assert_eq!(merged.title, "New");
        assert_eq!(merged.author, "Ana");
        assert_eq!(merged.start_date, "");
    }

    #[test]
    fn test_update_args_to_patch() {
        let args = UpdateTaskArgs {
            id: "x".to_string(),
            title: None,
            description: None,
            start: None,
            end: None,
            owner: None,
            status: Some(StatusArg::Completed),
            priority: None,
        };
        let patch = TaskPatch::from(args);
        assert_eq!(patch.status, Some(TaskStatus::Completed));
        assert!(patch.title.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_list_args_to_filter() {
        assert_eq!(
            StatusFilter::from(ListTasksArgs { status: None }),
            StatusFilter::All
        );
        assert_eq!(
            StatusFilter::from(ListTasksArgs {
                status: Some(StatusArg::InProgress)
            }),
            StatusFilter::Only(TaskStatus::InProgress)
        );
    }
}
