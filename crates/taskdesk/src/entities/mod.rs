//! Core data structures for the task list.

mod draft;
mod filter;
mod task;

pub use draft::TaskDraft;
pub use filter::StatusFilter;
pub use task::{parse_task_id, Task};
