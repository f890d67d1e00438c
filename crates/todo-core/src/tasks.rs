//! Local task mirror
//!
//! The mirror is a cache of the last successful response for the currently
//! selected user. Responses are applied verbatim, never merged.

use crate::models::Task;

#[derive(Debug, Clone, Default)]
pub struct TaskMirror {
    tasks: Vec<Task>,
}

impl TaskMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Swaps the entry with `id` for `task`. Returns false if `id` is not mirrored.
    pub fn replace_by_id(&mut self, id: &str, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The one task currently in inline-edit mode, with its own draft title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    pub task_id: String,
    pub draft_title: String,
}

impl ActiveEdit {
    pub fn begin(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            draft_title: task.title.clone(),
        }
    }

    pub fn is_for(&self, task_id: &str) -> bool {
        self.task_id == task_id
    }
}

/// Identifies one user selection. Responses tagged with an older token
/// belong to a previous selection and must not touch the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionToken(u64);

/// Currently selected user email plus a generation counter.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    email: Option<String>,
    generation: u64,
}

impl Selection {
    /// Changes the selection. Blank emails mean "no user". Returns `None` when
    /// the selection did not change.
    pub fn select(&mut self, email: Option<String>) -> Option<SelectionToken> {
        let email = email.filter(|e| !e.trim().is_empty());
        if email == self.email {
            return None;
        }
        self.email = email;
        self.generation += 1;
        Some(self.token())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn token(&self) -> SelectionToken {
        SelectionToken(self.generation)
    }

    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.token() == token
    }
}
