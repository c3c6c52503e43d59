//! Export of the task list to a document renderer.
//!
//! Rendering itself belongs to a [`TaskExporter`] implementation; this
//! module builds the table it renders and checks the outcome. [`PdfExporter`]
//! is the stock renderer.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::entities::Task;
use crate::errors::{TaskDeskError, TaskDeskResult};

mod pdf;

pub use pdf::PdfExporter;

/// Default file name offered for exports
pub const DEFAULT_EXPORT_FILE_NAME: &str = "Tasks.pdf";

const DOCUMENT_TITLE: &str = "Task List";
const COLUMNS: [&str; 3] = ["Title", "Description", "Completed"];

/// One table row of the exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub title: String,
    pub description: String,
    pub completed: String,
}

/// Table handed to the renderer: a heading, a header row, one row per task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportDocument {
    /// Build the document for `tasks`, keeping their order
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let rows = tasks
            .into_iter()
            .map(|task| ExportRow {
                title: task.title.clone(),
                description: task.description_text().to_string(),
                completed: task.completed_label().to_string(),
            })
            .collect();

        Self {
            title: DOCUMENT_TITLE.to_string(),
            columns: COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }
}

/// Renders an [`ExportDocument`] to a file
#[async_trait]
pub trait TaskExporter: Send + Sync {
    /// Write `document` to `path`
    async fn render(&self, document: &ExportDocument, path: &Path) -> anyhow::Result<()>;
}

/// Export `tasks` through `exporter`.
///
/// Succeeds only when the renderer reports success and a file exists at
/// `path` afterwards. Failures come back as [`TaskDeskError::ExportFailed`],
/// whose message is ready to show to the user.
pub async fn export_tasks(
    exporter: &dyn TaskExporter,
    tasks: &[Task],
    path: &Path,
) -> TaskDeskResult<()> {
    let document = ExportDocument::from_tasks(tasks);
    let failed = |reason: String| TaskDeskError::ExportFailed {
        path: path.display().to_string(),
        reason,
    };

    if let Err(e) = exporter.render(&document, path).await {
        warn!(path = %path.display(), error = %e, "Task export failed");
        return Err(failed(format!("{e:#}")));
    }

    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| failed(e.to_string()))?;
    if !exists {
        return Err(failed(format!(
            "renderer did not produce {}",
            path.display()
        )));
    }

    info!(path = %path.display(), rows = document.rows.len(), "Exported tasks");
    Ok(())
}
