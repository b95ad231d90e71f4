use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::focus::FocusLevel;
use crate::task::{TaskId, TaskSummary};
use crate::timer::Phase;

/// Every state change in the session produces an Event.
/// The shell renders them; `PhaseCompleted` doubles as the completion-sound
/// signal and is emitted exactly once per phase boundary crossed by a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        time_left_secs: u32,
        task_id: Option<TaskId>,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// The timer stopped on its own, e.g. no task is left to work on.
    TimerStopped {
        reason: String,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        time_left_secs: u32,
        cycles: u32,
        at: DateTime<Utc>,
    },
    BreakSkipped {
        cycles: u32,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    DurationChanged {
        phase: Phase,
        minutes: u32,
        /// Set when the idle clock was reset to the new duration.
        time_left_secs: Option<u32>,
        at: DateTime<Utc>,
    },
    DistractionRecorded {
        score: u8,
        distractions: u32,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: TaskId,
        title: String,
        estimated_pomodoros: u32,
        at: DateTime<Utc>,
    },
    TaskUpdated {
        task_id: TaskId,
        title: String,
        estimated_pomodoros: u32,
        completed: bool,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: TaskId,
        at: DateTime<Utc>,
    },
    TaskProgressed {
        task_id: TaskId,
        completed_pomodoros: u32,
        estimated_pomodoros: u32,
        completed: bool,
        at: DateTime<Utc>,
    },
    ActiveTaskChanged {
        from: Option<TaskId>,
        to: Option<TaskId>,
        at: DateTime<Utc>,
    },
    /// A message for the user attached to a change that was still applied.
    Notice {
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        is_active: bool,
        phase: Phase,
        time_left_secs: u32,
        work_minutes: u32,
        break_minutes: u32,
        cycles: u32,
        active_task_id: Option<TaskId>,
        focus_score: u8,
        focus_level: FocusLevel,
        distractions: u32,
        tasks: Vec<TaskSummary>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the shell should play the completion sound for this event.
    pub fn is_completion_signal(&self) -> bool {
        matches!(self, Event::PhaseCompleted { .. })
    }
}
