//! Error types for the taskdesk crate.

use thiserror::Error;

/// Errors raised by the task store, the board and the front end
#[derive(Error, Debug, Clone)]
pub enum TaskDeskError {
    // Task errors
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },

    #[error("Task '{task_id}' already exists")]
    DuplicateTask { task_id: String },

    #[error("Invalid task: {reason}")]
    InvalidTask { reason: String },

    #[error("Invalid task ID format: '{id}'")]
    InvalidId { id: String },

    #[error("Invalid status filter: '{filter}'")]
    InvalidFilter { filter: String },

    #[error("No task selected")]
    NoSelection,

    // Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },

    // Export errors
    #[error("Export failed: {reason}")]
    ExportFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

impl From<std::io::Error> for TaskDeskError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TaskDeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for taskdesk operations
pub type TaskDeskResult<T> = Result<T, TaskDeskError>;
