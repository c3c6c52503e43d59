//! Add/edit form state for a task.

use chrono::Utc;
use uuid::Uuid;

use super::Task;
use crate::errors::{TaskDeskError, TaskDeskResult};

/// Editable copy of a task's user-facing fields.
///
/// A draft created with [`TaskDraft::new`] produces a brand-new task; one
/// created with [`TaskDraft::edit`] keeps the original id and creation time.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    original: Option<Task>,
}

impl TaskDraft {
    /// Empty draft for the add flow
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing task for the edit flow
    pub fn edit(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            is_completed: task.is_completed,
            original: Some(task.clone()),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.original.is_some()
    }

    /// Id of the task being edited
    pub fn target_id(&self) -> Option<Uuid> {
        self.original.as_ref().map(|t| t.id)
    }

    /// The confirm action is only enabled for a non-blank title
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Produce the task this draft describes
    pub fn submit(&self) -> TaskDeskResult<Task> {
        if !self.can_submit() {
            return Err(TaskDeskError::InvalidTask {
                reason: "title must not be empty".to_string(),
            });
        }

        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        };

        let task = match &self.original {
            Some(original) => Task {
                title: self.title.clone(),
                description,
                is_completed: self.is_completed,
                ..original.clone()
            },
            None => Task {
                id: Uuid::new_v4(),
                title: self.title.clone(),
                description,
                is_completed: self.is_completed,
                created_at: Utc::now(),
            },
        };
        Ok(task)
    }
}
