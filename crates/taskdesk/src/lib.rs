#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # taskdesk
//!
//! A personal task list persisted to a local JSON file.
//!
//! This crate provides:
//! - The `Task` record, add/edit drafts and the completion filter
//! - A file-backed repository with async, mutually exclusive access
//! - A board that keeps the list, filter and selection in sync with storage
//! - An export boundary for handing the list to a document renderer
//! - A terminal front end (`taskdesk` binary)
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taskdesk::{FileTaskRepository, StoreLocation, TaskBoard, TaskDraft};
//!
//! let repository = Arc::new(FileTaskRepository::new(StoreLocation::resolve(None)));
//! let mut board = TaskBoard::open(repository).await?;
//!
//! let mut draft = TaskDraft::new();
//! draft.title = "Renew passport".into();
//! board.add(&draft).await?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Storage layer
pub mod storage;

// Domain facades
pub mod domain;

// Export boundary
pub mod export;

// Settings
pub mod config;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use config::{AppConfig, ConfigStore};
pub use domain::TaskBoard;
pub use entities::{StatusFilter, Task, TaskDraft};
pub use errors::{TaskDeskError, TaskDeskResult};
pub use export::{export_tasks, ExportDocument, ExportRow, PdfExporter, TaskExporter};
pub use storage::{FileTaskRepository, MutationOutcome, StoreLocation, TaskRepository};
