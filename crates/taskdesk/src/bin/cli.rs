//! taskdesk CLI - personal task list in the terminal.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use uuid::Uuid;

use taskdesk::entities::{parse_task_id, StatusFilter, TaskDraft};
use taskdesk::errors::TaskDeskError;
use taskdesk::storage::{FileTaskRepository, StoreLocation, TaskRepository};
use taskdesk::{ui, AppConfig, ConfigStore, PdfExporter, TaskBoard};

#[derive(Parser)]
#[command(name = "taskdesk")]
#[command(about = "Personal task list backed by a local JSON file", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding tasks.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks
    List {
        /// Filter by completion (all, completed, not-completed)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show details of a task
    Show {
        /// Task ID or unique ID prefix
        id: String,
    },

    /// Add a new task
    Add {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },

    /// Edit an existing task
    Edit {
        /// Task ID or unique ID prefix
        #[arg(short, long)]
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// Completion flag
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Mark a task as completed
    Complete {
        /// Task ID or unique ID prefix
        id: String,
    },

    /// Mark a task as not completed
    Reopen {
        /// Task ID or unique ID prefix
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID or unique ID prefix
        #[arg(short, long)]
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the listed tasks to a PDF file
    Export {
        /// Output file (defaults to the configured export file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Filter by completion (all, completed, not-completed)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Print the location of the task store
    Path,
}

/// Resolve a full id, or an id prefix matching exactly one task
fn resolve_task_id(board: &TaskBoard, input: &str) -> Result<Uuid, TaskDeskError> {
    if let Ok(id) = parse_task_id(input) {
        return Ok(id);
    }

    let prefix = input.trim().to_lowercase().replace('-', "");
    if prefix.is_empty() {
        return Err(TaskDeskError::InvalidId {
            id: input.to_string(),
        });
    }

    let mut matches = board
        .tasks()
        .iter()
        .filter(|t| t.id.simple().to_string().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (None, _) => Err(TaskDeskError::TaskNotFound {
            task_id: input.to_string(),
        }),
        (Some(_), Some(_)) => Err(TaskDeskError::InvalidId {
            id: format!("{input} (ambiguous prefix)"),
        }),
    }
}

async fn load_config(cli: &Cli) -> Result<AppConfig, TaskDeskError> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::from_env(),
    };
    store.load_or_init().await
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Initialize tracing
    init_tracing(&config);

    if let Err(e) = run(cli, config).await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let data_dir = cli.data_dir.or(config.data_dir.clone());
    let location = StoreLocation::resolve(data_dir.as_deref());

    if let Commands::Path = cli.command {
        println!("{}", location.data_file.display());
        return Ok(());
    }

    let repository = Arc::new(FileTaskRepository::new(location));
    let mut board = TaskBoard::open(Arc::clone(&repository) as Arc<dyn TaskRepository>)
        .await
        .with_context(|| format!("Failed to open task store {}", repository.path().display()))?;
    board.set_filter(config.default_filter);

    match cli.command {
        Commands::List { filter } => {
            if let Some(f) = filter {
                board.set_filter(f.parse::<StatusFilter>()?);
            }

            let visible = board.visible_tasks();
            if visible.is_empty() {
                ui::print_info("No tasks found");
            } else {
                let table = ui::task_table(&visible);
                println!("{table}");
                println!();
                ui::print_info(&ui::list_summary(
                    visible.len(),
                    board.tasks().len(),
                    board.filter(),
                ));
            }
        }

        Commands::Show { id } => {
            let task_id = resolve_task_id(&board, &id)?;
            let task = board.find(task_id).ok_or(TaskDeskError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;
            ui::display_task_details(task);
        }

        Commands::Add {
            title,
            description,
            completed,
        } => {
            let mut draft = TaskDraft::new();
            draft.title = title;
            draft.description = description.unwrap_or_default();
            draft.is_completed = completed;

            let task = board.add(&draft).await?;
            ui::print_success(&format!("Created task {} - {}", task.id, task.title));
        }

        Commands::Edit {
            id,
            title,
            description,
            completed,
        } => {
            let task_id = resolve_task_id(&board, &id)?;
            board.select(Some(task_id));
            let mut draft = board.edit_selected().map_err(|_| TaskDeskError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;

            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(completed) = completed {
                draft.is_completed = completed;
            }

            let task = board.edit(&draft).await?;
            ui::print_success(&format!("Updated task {} - {}", task.id, task.title));
        }

        Commands::Complete { id } => {
            let task_id = resolve_task_id(&board, &id)?;
            let task = board.set_completed(task_id, true).await?;
            ui::print_success(&format!("Completed task {}", task.title));
        }

        Commands::Reopen { id } => {
            let task_id = resolve_task_id(&board, &id)?;
            let task = board.set_completed(task_id, false).await?;
            ui::print_success(&format!("Reopened task {}", task.title));
        }

        Commands::Delete { id, yes } => {
            let task_id = resolve_task_id(&board, &id)?;
            board.select(Some(task_id));
            let Some(task) = board.selected() else {
                return Err(TaskDeskError::TaskNotFound {
                    task_id: task_id.to_string(),
                }
                .into());
            };

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to delete \"{}\"?",
                        task.title
                    ))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    ui::print_warning("Delete cancelled");
                    return Ok(());
                }
            }

            let removed = board.delete_selected().await?;
            ui::print_success(&format!("Deleted task {} - {}", removed.id, removed.title));
        }

        Commands::Export { output, filter } => {
            if let Some(f) = filter {
                board.set_filter(f.parse::<StatusFilter>()?);
            }

            let path = output.unwrap_or_else(|| PathBuf::from(&config.export_file_name));
            board.export(&PdfExporter, &path).await?;
            ui::print_success(&format!(
                "Export successful! {} task(s) written to {}",
                board.visible_tasks().len(),
                path.display()
            ));
        }

        // Printed before the store is opened
        Commands::Path => {}
    }

    Ok(())
}
