//! File-based storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::paths::StoreLocation;
use super::traits::{MutationOutcome, TaskRepository};
use crate::entities::Task;
use crate::errors::{TaskDeskError, TaskDeskResult};

/// Task repository backed by a single JSON array on disk.
///
/// The collection is read once, on first use, and kept in memory. Every
/// mutation rewrites the whole file through a temporary sibling and an
/// atomic rename. One async mutex guards both the in-memory copy and the
/// file, so operations run one at a time in arrival order.
pub struct FileTaskRepository {
    location: StoreLocation,

    /// `None` until the store has been loaded
    state: Mutex<Option<Vec<Task>>>,
}

impl FileTaskRepository {
    /// Create a repository for `location`. Nothing touches the disk until
    /// the first operation.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            state: Mutex::new(None),
        }
    }

    /// Repository at an explicit file path, without legacy migration
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreLocation::at(path))
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.location.data_file
    }

    /// Get the resolved store location
    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Return the loaded collection, loading it first if needed.
    ///
    /// Callers hold the state lock, so the load runs at most once even when
    /// several first operations race for the gate.
    async fn loaded<'g>(
        &self,
        slot: &'g mut Option<Vec<Task>>,
    ) -> TaskDeskResult<&'g mut Vec<Task>> {
        if slot.is_none() {
            let tasks = self.initialize().await?;
            *slot = Some(tasks);
        }
        Ok(slot.get_or_insert_with(Vec::new))
    }

    /// First load: create the data dir, migrate the legacy file, read the store
    async fn initialize(&self) -> TaskDeskResult<Vec<Task>> {
        let data_file = &self.location.data_file;

        if let Some(parent) = data_file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TaskDeskError::FileWriteError {
                    path: parent.display().to_string(),
                    reason: e.to_string(),
                })?;
        }

        self.migrate_legacy_file().await;

        match fs::read_to_string(data_file).await {
            Ok(content) => {
                let tasks = Self::parse_store(&content, data_file);
                debug!(path = %data_file.display(), count = tasks.len(), "Loaded task store");
                Ok(tasks)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %data_file.display(), "Creating empty task store");
                let tasks = Vec::new();
                self.write_store(&tasks).await?;
                Ok(tasks)
            }
            Err(e) => Err(TaskDeskError::FileReadError {
                path: data_file.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Copy the legacy store forward once. Failures are logged and ignored.
    async fn migrate_legacy_file(&self) {
        let Some(legacy_file) = &self.location.legacy_file else {
            return;
        };
        let data_file = &self.location.data_file;
        if legacy_file == data_file {
            return;
        }

        if fs::try_exists(data_file).await.unwrap_or(true) {
            return;
        }
        if !fs::try_exists(legacy_file).await.unwrap_or(false) {
            return;
        }

        // Copy beside the store, then rename, so a partial copy never
        // becomes the live file.
        let tmp_path = self.tmp_path();
        let migrated = match fs::copy(legacy_file, &tmp_path).await {
            Ok(_) => fs::rename(&tmp_path, data_file).await,
            Err(e) => Err(e),
        };

        match migrated {
            Ok(()) => info!(
                from = %legacy_file.display(),
                to = %data_file.display(),
                "Migrated legacy task store"
            ),
            Err(e) => {
                let _ = fs::remove_file(&tmp_path).await;
                warn!(
                    from = %legacy_file.display(),
                    error = %e,
                    "Legacy task store migration failed; starting fresh"
                );
            }
        }
    }

    /// Decode the store document. `null` and undecodable content both
    /// yield an empty collection.
    fn parse_store(content: &str, path: &Path) -> Vec<Task> {
        match serde_json::from_str::<Option<Vec<Task>>>(content) {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Unreadable task store; using an empty list"
                );
                Vec::new()
            }
        }
    }

    /// Write the full collection: temp file, fsync, rename over the store
    async fn write_store(&self, tasks: &[Task]) -> TaskDeskResult<()> {
        let path = &self.location.data_file;
        let write_error = |e: std::io::Error| TaskDeskError::FileWriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let content = serde_json::to_string_pretty(tasks)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = Self::replace_file(&tmp_path, path, content.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(write_error(e));
        }

        debug!(path = %path.display(), count = tasks.len(), "Persisted task store");
        Ok(())
    }

    /// Sibling the store is staged in before the rename
    fn tmp_path(&self) -> PathBuf {
        self.location.data_file.with_extension("json.tmp")
    }

    async fn replace_file(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(tmp_path, path).await
    }
}

#[async_trait]
impl TaskRepository for FileTaskRepository {
    fn storage_type(&self) -> &'static str {
        "file"
    }

    async fn get_all(&self) -> TaskDeskResult<Vec<Task>> {
        let mut guard = self.state.lock().await;
        let tasks = self.loaded(&mut guard).await?;
        Ok(tasks.clone())
    }

    async fn get(&self, task_id: Uuid) -> TaskDeskResult<Option<Task>> {
        let mut guard = self.state.lock().await;
        let tasks = self.loaded(&mut guard).await?;
        Ok(tasks.iter().find(|t| t.id == task_id).cloned())
    }

    async fn add(&self, task: Task) -> TaskDeskResult<()> {
        task.validate()?;

        let mut guard = self.state.lock().await;
        let tasks = self.loaded(&mut guard).await?;

        if tasks.iter().any(|t| t.id == task.id) {
            return Err(TaskDeskError::DuplicateTask {
                task_id: task.id.to_string(),
            });
        }

        let mut next = tasks.clone();
        next.push(task);
        self.write_store(&next).await?;
        *tasks = next;
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskDeskResult<MutationOutcome> {
        task.validate()?;

        let mut guard = self.state.lock().await;
        let tasks = self.loaded(&mut guard).await?;

        let Some(idx) = tasks.iter().position(|t| t.id == task.id) else {
            debug!(task_id = %task.id, "Update skipped: no such task");
            return Ok(MutationOutcome::NotFound);
        };

        let mut next = tasks.clone();
        next[idx] = Task {
            created_at: next[idx].created_at,
            ..task.clone()
        };
        self.write_store(&next).await?;
        *tasks = next;
        Ok(MutationOutcome::Applied)
    }

    async fn delete(&self, task_id: Uuid) -> TaskDeskResult<MutationOutcome> {
        let mut guard = self.state.lock().await;
        let tasks = self.loaded(&mut guard).await?;

        let mut next = tasks.clone();
        next.retain(|t| t.id != task_id);

        if next.len() == tasks.len() {
            debug!(task_id = %task_id, "Delete skipped: no such task");
            return Ok(MutationOutcome::NotFound);
        }

        self.write_store(&next).await?;
        *tasks = next;
        Ok(MutationOutcome::Applied)
    }
}
