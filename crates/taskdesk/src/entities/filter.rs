//! Status filter applied to the task list.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::errors::TaskDeskError;

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    NotCompleted,
}

impl StatusFilter {
    /// Every filter, in the order the picker offers them
    pub const ALL: [Self; 3] = [Self::All, Self::Completed, Self::NotCompleted];

    /// Whether `task` passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed,
            Self::NotCompleted => !task.is_completed,
        }
    }

    /// Keep the tasks passing this filter, preserving order
    pub fn apply<'a, I>(self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Completed => write!(f, "Completed"),
            Self::NotCompleted => write!(f, "Not Completed"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = TaskDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "not completed" | "not-completed" | "not_completed" | "open" | "pending" => {
                Ok(Self::NotCompleted)
            }
            _ => Err(TaskDeskError::InvalidFilter {
                filter: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        let mut done = Task::new("done", None);
        done.is_completed = true;
        let open = Task::new("open", None);
        vec![done, open]
    }

    #[test]
    fn test_filter_apply() {
        let tasks = sample();
        assert_eq!(StatusFilter::All.apply(&tasks).len(), 2);

        let completed = StatusFilter::Completed.apply(&tasks);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "done");

        let open = StatusFilter::NotCompleted.apply(&tasks);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "open");
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Not Completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::NotCompleted
        );
        assert_eq!(
            "not-completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::NotCompleted
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for filter in StatusFilter::ALL {
            assert_eq!(filter.to_string().parse::<StatusFilter>().unwrap(), filter);
        }
    }
}
