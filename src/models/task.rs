use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level unit of work in a checklist.
///
/// `text` is the header line exactly as the model wrote it, including any
/// leading `Task N:` marker. Subtasks keep the order in which their step lines
/// appeared under the header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub subtasks: Vec<Subtask>,
    /// The last `[Image: ...]` or `[Video: ...]` annotation seen for this task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            subtasks: Vec::new(),
            media: None,
        }
    }

    /// Number of subtasks marked completed.
    pub fn completed_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    pub fn find_subtask_mut(&mut self, id: Uuid) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }
}

/// A checkable step within a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    pub id: Uuid,
    /// Step description with the leading `<number>. ` marker removed.
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }

    /// Flip completion and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Input for adding an ad hoc task to an existing checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskInput {
    pub text: String,
}
