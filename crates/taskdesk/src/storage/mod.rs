//! Storage layer for task persistence.

mod file;
pub mod paths;
mod traits;

pub use file::FileTaskRepository;
pub use paths::StoreLocation;
pub use traits::{MutationOutcome, TaskRepository};
