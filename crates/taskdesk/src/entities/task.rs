//! Task entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TaskDeskError, TaskDeskResult};

/// A single task record.
///
/// Field names are serialized in PascalCase so stores written by earlier
/// releases of the desktop app load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    /// Unique identifier, assigned at creation and never changed
    pub id: Uuid,

    /// Short title shown in lists; never blank
    pub title: String,

    /// Free-form notes
    #[serde(default)]
    pub description: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub is_completed: bool,

    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task with a fresh identifier
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, description)
    }

    /// Create a task with a caller-chosen identifier
    pub fn with_id(id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    /// Check the record invariants before it is stored
    pub fn validate(&self) -> TaskDeskResult<()> {
        if self.title.trim().is_empty() {
            return Err(TaskDeskError::InvalidTask {
                reason: format!("task {} has an empty title", self.id),
            });
        }
        Ok(())
    }

    /// Description text, empty when none was given
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Human-readable completion flag
    pub fn completed_label(&self) -> &'static str {
        if self.is_completed {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Parse a task identifier from user input
pub fn parse_task_id(input: &str) -> TaskDeskResult<Uuid> {
    Uuid::parse_str(input.trim()).map_err(|_| TaskDeskError::InvalidId {
        id: input.to_string(),
    })
}
