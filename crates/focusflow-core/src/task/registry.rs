use tracing::info;

use super::{Task, TaskId};
use crate::error::ValidationError;

/// Ordered collection of tasks.
///
/// Registry order is creation order; the active-task fallback walks it from
/// the front.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn first_incomplete(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| !t.is_completed())
    }

    pub fn has_incomplete(&self) -> bool {
        self.first_incomplete().is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a task. Blank titles are rejected without touching the registry.
    pub fn add(&mut self, title: &str, estimated_pomodoros: u32) -> Result<&Task, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        self.next_id += 1;
        let task = Task::new(TaskId::new(self.next_id), title, estimated_pomodoros);
        info!(task_id = %task.id, title = %task.title, estimate = task.estimated_pomodoros, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replace title and estimate of a task.
    ///
    /// The change is applied to a draft copy and committed in place only once
    /// it is known to be valid.
    pub fn edit(
        &mut self,
        id: TaskId,
        title: &str,
        estimated_pomodoros: u32,
    ) -> Result<&Task, ValidationError> {
        let index = self.position(id)?;
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let mut draft = self.tasks[index].clone();
        draft.set_title(title);
        draft.set_estimate(estimated_pomodoros);
        info!(
            task_id = %id,
            estimate = draft.estimated_pomodoros,
            completed = draft.completed,
            "task updated"
        );
        self.tasks[index] = draft;
        Ok(&self.tasks[index])
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task, ValidationError> {
        let index = self.position(id)?;
        let task = self.tasks.remove(index);
        info!(task_id = %task.id, "task deleted");
        Ok(task)
    }

    /// Credit one completed work session to a task.
    ///
    /// Returns `None` when the task no longer exists.
    pub fn record_pomodoro(&mut self, id: TaskId) -> Option<&Task> {
        let index = self.position(id).ok()?;
        let task = &mut self.tasks[index];
        task.record_pomodoro();
        Some(&*task)
    }

    fn position(&self, id: TaskId) -> Result<usize, ValidationError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ValidationError::TaskNotFound(id))
    }
}
