//! In-memory to-do list.

use chrono::{DateTime, Utc};
use mini_shop_core::TaskId;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Please enter a task!")]
    EmptyTask,

    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Ordered list of tasks. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    tasks: Vec<Task>,
}

impl TodoList {
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::EmptyTask` if `text` is blank after trimming.
    pub fn add(&mut self, text: &str) -> Result<&Task, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyTask);
        }

        self.tasks.push(Task {
            id: TaskId::new(),
            text: text.to_string(),
            created_at: Utc::now(),
        });
        self.tasks.last().ok_or(TodoError::EmptyTask)
    }

    /// Delete a task by id.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::NotFound` if no task has that id.
    pub fn remove(&mut self, id: TaskId) -> Result<Task, TodoError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        Ok(self.tasks.remove(pos))
    }

    /// Tasks in the order they were added.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_keeps_order() {
        let mut list = TodoList::new();
        list.add("  buy milk ").unwrap();
        list.add("call Ravi").unwrap();

        let texts: Vec<&str> = list.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["buy milk", "call Ravi"]);
    }

    #[test]
    fn test_add_blank_rejected() {
        let mut list = TodoList::new();
        assert_eq!(list.add("   ").unwrap_err(), TodoError::EmptyTask);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut list = TodoList::new();
        let first = list.add("one").unwrap().id;
        list.add("two").unwrap();

        assert_eq!(list.remove(first).unwrap().text, "one");
        assert_eq!(list.len(), 1);
        assert_eq!(list.remove(first), Err(TodoError::NotFound(first)));
    }
}
