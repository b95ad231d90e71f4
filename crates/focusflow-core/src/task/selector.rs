//! Active-task selection policy.
//!
//! The active task is a weak pointer into the registry. Whenever it is unset,
//! dangling or points at a completed task, the first incomplete task in
//! registry order takes over. Completed tasks are never selected.

use super::{Task, TaskId, TaskRegistry};

/// Whether `id` may be the active task right now.
pub fn is_selectable(tasks: &TaskRegistry, id: TaskId) -> bool {
    tasks.get(id).is_some_and(|t| !t.is_completed())
}

/// First incomplete task in registry order.
pub fn first_incomplete(tasks: &TaskRegistry) -> Option<TaskId> {
    tasks.first_incomplete().map(Task::id)
}

/// Keep `current` if it is still selectable, otherwise fall back.
pub fn resolve(tasks: &TaskRegistry, current: Option<TaskId>) -> Option<TaskId> {
    match current {
        Some(id) if is_selectable(tasks, id) => Some(id),
        _ => first_incomplete(tasks),
    }
}
