//! Tasks tracked against the Pomodoro timer.
//!
//! A [`Task`] carries an estimate of how many work sessions it needs and how
//! many it has received. `completed` is a cached projection of those two
//! counts and is refreshed at every site that changes either of them.

pub mod registry;
pub mod selector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

pub use registry::TaskRegistry;

/// Identifier of a task within a [`TaskRegistry`].
///
/// Allocated in creation order and never reused, so ids also sort by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// A unit of work credited with completed Pomodoros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    estimated_pomodoros: u32,
    completed_pomodoros: u32,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh task. Estimates below one are raised to one.
    pub(crate) fn new(id: TaskId, title: impl Into<String>, estimated_pomodoros: u32) -> Self {
        Self {
            id,
            title: title.into(),
            estimated_pomodoros: estimated_pomodoros.max(1),
            completed_pomodoros: 0,
            completed: false,
            created_at: Utc::now(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn estimated_pomodoros(&self) -> u32 {
        self.estimated_pomodoros
    }

    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 0.0 .. 100.0 progress towards the estimate.
    pub fn progress_pct(&self) -> f64 {
        if self.estimated_pomodoros == 0 {
            return 0.0;
        }
        (self.completed_pomodoros as f64 / self.estimated_pomodoros as f64 * 100.0).min(100.0)
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            title: self.title.clone(),
            estimated_pomodoros: self.estimated_pomodoros,
            completed_pomodoros: self.completed_pomodoros,
            completed: self.completed,
            progress_pct: self.progress_pct(),
        }
    }

    // ── Mutations (registry only) ────────────────────────────────────

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Clamp to the progress already made, and never below one.
    pub(crate) fn set_estimate(&mut self, estimate: u32) {
        self.estimated_pomodoros = estimate.max(self.completed_pomodoros).max(1);
        self.refresh_completed();
    }

    pub(crate) fn record_pomodoro(&mut self) {
        self.completed_pomodoros = self.completed_pomodoros.saturating_add(1);
        self.refresh_completed();
    }

    fn refresh_completed(&mut self) {
        self.completed = self.completed_pomodoros >= self.estimated_pomodoros;
    }
}

/// Render-ready view of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub estimated_pomodoros: u32,
    pub completed_pomodoros: u32,
    pub completed: bool,
    pub progress_pct: f64,
}
