//! In-memory checklist state.
//!
//! Holds what the UI works on after a question is answered: the parsed tasks,
//! subtask completion and which tasks are expanded. Nothing is persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Task text must not be empty")]
    EmptyText,
}

/// Checklists by id, plus the order they were created in.
#[derive(Default)]
struct Checklists {
    by_id: HashMap<Uuid, Checklist>,
    order: Vec<Uuid>,
}

impl Checklists {
    fn insert(&mut self, checklist: Checklist) {
        self.order.push(checklist.id);
        self.by_id.insert(checklist.id, checklist);
    }

    fn get(&self, id: &Uuid) -> Option<&Checklist> {
        self.by_id.get(id)
    }

    fn get_mut(&mut self, id: &Uuid) -> Option<&mut Checklist> {
        self.by_id.get_mut(id)
    }

    fn remove(&mut self, id: &Uuid) -> Option<Checklist> {
        let removed = self.by_id.remove(id)?;
        self.order.retain(|other| other != id);
        Some(removed)
    }

    /// Newest first.
    fn newest_first(&self) -> impl Iterator<Item = &Checklist> {
        self.order.iter().rev().filter_map(|id| self.by_id.get(id))
    }
}

#[derive(Clone, Default)]
pub struct ChecklistStore {
    checklists: Arc<Mutex<Checklists>>,
}

impl ChecklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Checklist operations
    // ============================================================

    pub fn create_checklist(&self, question: &str, tasks: Vec<Task>) -> Checklist {
        let checklist = Checklist::new(question.trim(), tasks);
        let mut checklists = self.checklists.lock().expect("store lock poisoned");
        checklists.insert(checklist.clone());
        tracing::info!(
            id = %checklist.id,
            tasks = checklist.tasks.len(),
            "Created checklist"
        );
        checklist
    }

    pub fn get_checklist(&self, id: Uuid) -> Option<Checklist> {
        let checklists = self.checklists.lock().expect("store lock poisoned");
        checklists.get(&id).cloned()
    }

    /// All checklists, newest first. Creation order decides, even when two
    /// share a timestamp.
    pub fn list_checklists(&self) -> Vec<ChecklistSummary> {
        let checklists = self.checklists.lock().expect("store lock poisoned");
        checklists.newest_first().map(ChecklistSummary::from).collect()
    }

    pub fn delete_checklist(&self, id: Uuid) -> bool {
        let mut checklists = self.checklists.lock().expect("store lock poisoned");
        checklists.remove(&id).is_some()
    }

    // ============================================================
    // Task operations
    // ============================================================

    /// Append a user-written task with no steps. `Ok(None)` if the checklist doesn't exist.
    pub fn add_task(&self, checklist_id: Uuid, text: &str) -> Result<Option<Task>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let mut checklists = self.checklists.lock().expect("store lock poisoned");
        let Some(checklist) = checklists.get_mut(&checklist_id) else {
            return Ok(None);
        };

        let task = Task::new(text);
        checklist.tasks.push(task.clone());
        tracing::debug!(checklist = %checklist_id, task = %task.id, "Added task");
        Ok(Some(task))
    }

    /// Flip a task between expanded and collapsed, returning the new state.
    pub fn toggle_expanded(&self, checklist_id: Uuid, task_id: Uuid) -> Option<bool> {
        let mut checklists = self.checklists.lock().expect("store lock poisoned");
        let checklist = checklists.get_mut(&checklist_id)?;
        if !checklist.tasks.iter().any(|t| t.id == task_id) {
            return None;
        }

        if checklist.expanded.remove(&task_id) {
            Some(false)
        } else {
            checklist.expanded.insert(task_id);
            Some(true)
        }
    }

    // ============================================================
    // Subtask operations
    // ============================================================

    /// Flip a subtask's completion, returning the updated subtask.
    pub fn toggle_subtask(
        &self,
        checklist_id: Uuid,
        task_id: Uuid,
        subtask_id: Uuid,
    ) -> Option<Subtask> {
        let mut checklists = self.checklists.lock().expect("store lock poisoned");
        let subtask = checklists
            .get_mut(&checklist_id)?
            .find_task_mut(task_id)?
            .find_subtask_mut(subtask_id)?;

        let completed = subtask.toggle();
        tracing::debug!(subtask = %subtask_id, completed, "Toggled subtask");
        Some(subtask.clone())
    }
}
