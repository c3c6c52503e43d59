//! Storage trait definitions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::Task;
use crate::errors::TaskDeskResult;

/// Result of an update or delete keyed by task id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A stored task matched and the change was persisted
    Applied,
    /// No stored task had that id; nothing changed
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Storage interface for the task collection.
///
/// Implementations serialize all access: no two operations observe or
/// modify the collection concurrently.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Snapshot of every task, loading the store on first use
    async fn get_all(&self) -> TaskDeskResult<Vec<Task>>;

    /// Snapshot of one task
    async fn get(&self, task_id: Uuid) -> TaskDeskResult<Option<Task>>;

    /// Append a task that already carries its unique id, then persist
    async fn add(&self, task: Task) -> TaskDeskResult<()>;

    /// Replace the task with the same id, then persist
    async fn update(&self, task: &Task) -> TaskDeskResult<MutationOutcome>;

    /// Remove every task with this id, then persist
    async fn delete(&self, task_id: Uuid) -> TaskDeskResult<MutationOutcome>;
}
