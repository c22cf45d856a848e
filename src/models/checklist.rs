use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// One answered "how to" question, held in memory while the user works through it.
///
/// The task list starts as the parser output. After that only subtask
/// completion, task expansion and user-added tasks change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: Uuid,
    /// The question as the user asked it, trimmed.
    pub question: String,
    pub tasks: Vec<Task>,
    /// Ids of tasks currently expanded in the UI. Purely presentational.
    #[serde(default)]
    pub expanded: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Checklist {
    pub fn new(question: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            tasks,
            expanded: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Completed and total subtask counts across all tasks.
    pub fn progress(&self) -> (usize, usize) {
        self.tasks.iter().fold((0, 0), |(done, total), task| {
            (done + task.completed_count(), total + task.subtasks.len())
        })
    }

    pub fn is_expanded(&self, task_id: Uuid) -> bool {
        self.expanded.contains(&task_id)
    }

    pub fn find_task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// Lightweight checklist listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub id: Uuid,
    pub question: String,
    pub task_count: usize,
    pub subtask_count: usize,
    pub completed_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Checklist> for ChecklistSummary {
    fn from(c: &Checklist) -> Self {
        let (completed_count, subtask_count) = c.progress();
        Self {
            id: c.id,
            question: c.question.clone(),
            task_count: c.tasks.len(),
            subtask_count,
            completed_count,
            created_at: c.created_at,
        }
    }
}

/// Input for asking a new question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskInput {
    pub question: String,
}

/// Input for parsing a raw model response without calling the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseInput {
    pub text: String,
}

/// Result of toggling a task's expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandedState {
    pub task_id: Uuid,
    pub expanded: bool,
}
