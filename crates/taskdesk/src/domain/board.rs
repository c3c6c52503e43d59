//! Task board: the presentation-agnostic state behind the task list view.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::entities::{StatusFilter, Task, TaskDraft};
use crate::errors::{TaskDeskError, TaskDeskResult};
use crate::export::{export_tasks, TaskExporter};
use crate::storage::{MutationOutcome, TaskRepository};

/// In-memory projection of the repository plus filter and selection.
///
/// Every mutation goes to the repository first; the projection only changes
/// once the repository call has succeeded.
pub struct TaskBoard {
    repository: Arc<dyn TaskRepository>,
    tasks: Vec<Task>,
    filter: StatusFilter,
    selected: Option<Uuid>,
}

impl TaskBoard {
    /// Create an empty board; call [`TaskBoard::load`] to populate it
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            repository,
            tasks: Vec::new(),
            filter: StatusFilter::default(),
            selected: None,
        }
    }

    /// Create a board and load every task from the repository
    pub async fn open(repository: Arc<dyn TaskRepository>) -> TaskDeskResult<Self> {
        let mut board = Self::new(repository);
        board.load().await?;
        Ok(board)
    }

    /// Replace the projection with the repository contents
    pub async fn load(&mut self) -> TaskDeskResult<()> {
        self.tasks = self.repository.get_all().await?;
        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
        debug!(count = self.tasks.len(), "Board loaded");
        Ok(())
    }

    /// Every task, in repository order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing the current filter
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Look up a task in the projection
    pub fn find(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn contains(&self, task_id: Uuid) -> bool {
        self.find(task_id).is_some()
    }

    /// Select a task; an unknown id clears the selection
    pub fn select(&mut self, task_id: Option<Uuid>) {
        self.selected = task_id.filter(|id| self.contains(*id));
    }

    /// The selected task
    pub fn selected(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn can_edit(&self) -> bool {
        self.selected().is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.selected().is_some()
    }

    /// Draft for editing the selected task
    pub fn edit_selected(&self) -> TaskDeskResult<TaskDraft> {
        self.selected()
            .map(TaskDraft::edit)
            .ok_or(TaskDeskError::NoSelection)
    }

    /// Add flow: persist the drafted task, then show it
    pub async fn add(&mut self, draft: &TaskDraft) -> TaskDeskResult<Task> {
        if draft.is_edit_mode() {
            return Err(TaskDeskError::InvalidTask {
                reason: "draft is editing an existing task".to_string(),
            });
        }

        let task = draft.submit()?;
        self.repository.add(task.clone()).await?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Edit flow: persist the edited task, then replace it in the list
    pub async fn edit(&mut self, draft: &TaskDraft) -> TaskDeskResult<Task> {
        let Some(task_id) = draft.target_id() else {
            return Err(TaskDeskError::InvalidTask {
                reason: "draft is not editing a task".to_string(),
            });
        };

        let task = draft.submit()?;
        match self.repository.update(&task).await? {
            MutationOutcome::Applied => {}
            MutationOutcome::NotFound => {
                return Err(TaskDeskError::TaskNotFound {
                    task_id: task_id.to_string(),
                })
            }
        }

        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            *slot = task.clone();
        } else {
            self.tasks.push(task.clone());
        }
        Ok(task)
    }

    /// Flip the completion flag of one task
    pub async fn set_completed(
        &mut self,
        task_id: Uuid,
        completed: bool,
    ) -> TaskDeskResult<Task> {
        let task = self
            .find(task_id)
            .ok_or_else(|| TaskDeskError::TaskNotFound {
                task_id: task_id.to_string(),
            })?;

        let mut draft = TaskDraft::edit(task);
        draft.is_completed = completed;
        self.edit(&draft).await
    }

    /// Delete flow for the selected task
    pub async fn delete_selected(&mut self) -> TaskDeskResult<Task> {
        let task = self.selected().cloned().ok_or(TaskDeskError::NoSelection)?;

        self.repository.delete(task.id).await?;
        self.tasks.retain(|t| t.id != task.id);
        self.selected = None;
        Ok(task)
    }

    /// Export the visible tasks
    pub async fn export(&self, exporter: &dyn TaskExporter, path: &Path) -> TaskDeskResult<()> {
        export_tasks(exporter, &self.visible_tasks(), path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportDocument;
    use crate::storage::FileTaskRepository;
    use async_trait::async_trait;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    async fn setup() -> (TempDir, Arc<FileTaskRepository>, TaskBoard) {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(FileTaskRepository::at(temp_dir.path().join("tasks.json")));
        let board = TaskBoard::open(Arc::clone(&repository) as Arc<dyn TaskRepository>)
            .await
            .unwrap();
        (temp_dir, repository, board)
    }

    fn draft(title: &str, completed: bool) -> TaskDraft {
        let mut draft = TaskDraft::new();
        draft.title = title.to_string();
        draft.is_completed = completed;
        draft
    }

    /// Records the rows it was asked to render
    #[derive(Default)]
    struct RecordingExporter {
        titles: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TaskExporter for RecordingExporter {
        async fn render(&self, document: &ExportDocument, path: &Path) -> anyhow::Result<()> {
            let mut titles = self.titles.lock().await;
            titles.extend(document.rows.iter().map(|r| r.title.clone()));
            tokio::fs::write(path, b"%PDF-1.7").await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_add_persists_then_shows() {
        let (_temp, repository, mut board) = setup().await;

        let task = board.add(&draft("Book flights", false)).await.unwrap();

        assert_eq!(board.tasks(), &[task.clone()]);
        assert_eq!(repository.get_all().await.unwrap(), vec![task]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_draft() {
        let (_temp, repository, mut board) = setup().await;

        assert!(board.add(&TaskDraft::new()).await.is_err());
        assert!(board.tasks().is_empty());
        assert!(repository.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_projection() {
        let (_temp, _repository, mut board) = setup().await;
        board.add(&draft("Done", true)).await.unwrap();
        board.add(&draft("Open", false)).await.unwrap();

        assert_eq!(board.visible_tasks().len(), 2);

        board.set_filter(StatusFilter::Completed);
        let titles: Vec<_> = board.visible_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Done"]);

        board.set_filter(StatusFilter::NotCompleted);
        let titles: Vec<_> = board.visible_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Open"]);
    }

    #[tokio::test]
    async fn test_commands_need_selection() {
        let (_temp, _repository, mut board) = setup().await;
        let task = board.add(&draft("Pick me", false)).await.unwrap();

        assert!(!board.can_edit());
        assert!(!board.can_delete());
        assert!(matches!(
            board.delete_selected().await,
            Err(TaskDeskError::NoSelection)
        ));

        board.select(Some(task.id));
        assert!(board.can_edit());
        assert!(board.can_delete());

        board.select(Some(Uuid::new_v4()));
        assert!(board.selected().is_none());
    }

    #[tokio::test]
    async fn test_edit_selected_task() {
        let (_temp, repository, mut board) = setup().await;
        let task = board.add(&draft("Draft report", false)).await.unwrap();
        board.select(Some(task.id));

        let mut edit = board.edit_selected().unwrap();
        edit.title = "Final report".to_string();
        edit.is_completed = true;
        let edited = board.edit(&edit).await.unwrap();

        assert_eq!(edited.id, task.id);
        assert_eq!(edited.created_at, task.created_at);
        assert_eq!(board.tasks()[0].title, "Final report");
        let stored = repository.get(task.id).await.unwrap().unwrap();
        assert!(stored.is_completed);
    }

    #[tokio::test]
    async fn test_edit_of_vanished_task_reports_not_found() {
        let (_temp, repository, mut board) = setup().await;
        let task = board.add(&draft("Short-lived", false)).await.unwrap();
        repository.delete(task.id).await.unwrap();

        let err = board.edit(&TaskDraft::edit(&task)).await.unwrap_err();
        assert!(matches!(err, TaskDeskError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_completed() {
        let (_temp, repository, mut board) = setup().await;
        let task = board.add(&draft("Laundry", false)).await.unwrap();

        board.set_completed(task.id, true).await.unwrap();

        assert!(board.find(task.id).unwrap().is_completed);
        assert!(repository.get(task.id).await.unwrap().unwrap().is_completed);
    }

    #[tokio::test]
    async fn test_delete_selected() {
        let (_temp, repository, mut board) = setup().await;
        let keep = board.add(&draft("Keep", false)).await.unwrap();
        let doomed = board.add(&draft("Drop", false)).await.unwrap();
        board.select(Some(doomed.id));

        let removed = board.delete_selected().await.unwrap();

        assert_eq!(removed.id, doomed.id);
        assert!(board.selected().is_none());
        assert_eq!(board.tasks(), &[keep.clone()]);
        assert_eq!(repository.get_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn test_export_uses_visible_tasks() {
        let (temp, _repository, mut board) = setup().await;
        board.add(&draft("Done", true)).await.unwrap();
        board.add(&draft("Open", false)).await.unwrap();
        board.set_filter(StatusFilter::NotCompleted);

        let exporter = RecordingExporter::default();
        let path = temp.path().join("Tasks.pdf");
        board.export(&exporter, &path).await.unwrap();

        assert_eq!(*exporter.titles.lock().await, vec!["Open".to_string()]);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_reload_picks_up_external_changes() {
        let (_temp, repository, mut board) = setup().await;
        let task = Task::new("Added elsewhere", None);
        repository.add(task.clone()).await.unwrap();

        board.load().await.unwrap();
        assert_eq!(board.tasks(), &[task]);
    }
}
