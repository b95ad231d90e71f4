//! The session: timer, task registry, active task and focus metrics.
//!
//! [`Session`] is the only owner of that state. Hosts call its commands one
//! at a time and render the returned events; nothing is shared or global.
//!
//! Every command either commits fully or returns a [`ValidationError`] with
//! the session untouched. Two intents deliberately apply their effect and
//! still carry a message, reported as an [`Event::Notice`]: a pause while the
//! timer is idle with nothing to work on, and skipping a break when no task
//! is left.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::events::Event;
use crate::focus::FocusMetrics;
use crate::storage::Config;
use crate::task::{selector, Task, TaskId, TaskRegistry};
use crate::timer::{Phase, PhaseChange, TimerEngine};

/// Result of a user intent that may be refused.
pub type Outcome = Result<Vec<Event>, ValidationError>;

#[derive(Debug, Clone, Default)]
pub struct Session {
    timer: TimerEngine,
    tasks: TaskRegistry,
    active_task_id: Option<TaskId>,
    focus: FocusMetrics,
}

impl Session {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            timer: TimerEngine::new(work_minutes, break_minutes),
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timer.work_minutes, config.timer.break_minutes)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        self.active_task_id
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active_task_id.and_then(|id| self.tasks.get(id))
    }

    pub fn focus(&self) -> &FocusMetrics {
        &self.focus
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            is_active: self.timer.is_active(),
            phase: self.timer.phase(),
            time_left_secs: self.timer.time_left_secs(),
            work_minutes: self.timer.work_minutes(),
            break_minutes: self.timer.break_minutes(),
            cycles: self.timer.cycles(),
            active_task_id: self.active_task_id,
            focus_score: self.focus.score(),
            focus_level: self.focus.level(),
            distractions: self.focus.distractions(),
            tasks: self.tasks.iter().map(Task::summary).collect(),
            at: Utc::now(),
        }
    }

    // ── Timer commands ───────────────────────────────────────────────

    /// Start the timer on the active task, picking one if needed.
    ///
    /// Refused when there is no task, or none left to work on.
    pub fn start(&mut self) -> Outcome {
        if self.timer.is_active() {
            return Ok(Vec::new());
        }
        self.check_availability()?;

        let mut events = Vec::new();
        self.reselect(&mut events);
        self.timer.start();
        info!(phase = ?self.timer.phase(), task = ?self.active_task_id, "timer started");
        events.push(Event::TimerStarted {
            phase: self.timer.phase(),
            time_left_secs: self.timer.time_left_secs(),
            task_id: self.active_task_id,
            at: Utc::now(),
        });
        Ok(events)
    }

    /// Pause intent. Always counts as a distraction and leaves the timer
    /// stopped.
    pub fn pause(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.focus.record_distraction();
        events.push(Event::DistractionRecorded {
            score: self.focus.score(),
            distractions: self.focus.distractions(),
            at: Utc::now(),
        });

        if self.timer.stop() {
            info!(score = self.focus.score(), "timer paused");
            events.push(self.paused_event());
        } else if let Err(reason) = self.check_availability() {
            events.push(notice(&reason));
        }
        events
    }

    /// The single start/pause button.
    ///
    /// Stopping during a break is not a distraction.
    pub fn toggle(&mut self) -> Outcome {
        if !self.timer.is_active() {
            return self.start();
        }
        match self.timer.phase() {
            Phase::Work => Ok(self.pause()),
            Phase::Break => {
                self.timer.stop();
                info!("timer stopped during break");
                Ok(vec![self.paused_event()])
            }
        }
    }

    pub fn reset(&mut self) -> Vec<Event> {
        self.timer.reset();
        info!("timer reset");
        vec![Event::TimerReset {
            time_left_secs: self.timer.time_left_secs(),
            at: Utc::now(),
        }]
    }

    /// Deliver one clock tick. Ignored while the timer is stopped.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(change) = self.timer.tick() {
            info!(completed = ?change.completed, next = ?change.next, "phase completed");
            events.push(Event::PhaseCompleted {
                completed: change.completed,
                next: change.next,
                time_left_secs: change.time_left_secs,
                cycles: change.cycles,
                at: Utc::now(),
            });
            self.finish_phase(change, &mut events);
        }
        events
    }

    /// End the current break early. Does nothing during a work phase.
    ///
    /// Unlike a break that runs out, the timer stops when no task is left.
    pub fn skip_break(&mut self) -> Vec<Event> {
        let Some(change) = self.timer.skip_break() else {
            return Vec::new();
        };
        info!(cycles = change.cycles, "break skipped");
        let mut events = vec![Event::BreakSkipped {
            cycles: change.cycles,
            time_left_secs: change.time_left_secs,
            at: Utc::now(),
        }];
        self.finish_phase(change, &mut events);

        if self.active_task_id.is_none() {
            let reason = ValidationError::AllTasksCompleted;
            if self.timer.stop() {
                events.push(Event::TimerStopped {
                    reason: reason.to_string(),
                    at: Utc::now(),
                });
            }
            events.push(notice(&reason));
        }
        events
    }

    pub fn set_work_duration(&mut self, minutes: u32) -> Vec<Event> {
        if minutes == 0 {
            return Vec::new();
        }
        let reset = self.timer.set_work_minutes(minutes);
        self.duration_changed(Phase::Work, minutes, reset)
    }

    pub fn set_break_duration(&mut self, minutes: u32) -> Vec<Event> {
        if minutes == 0 {
            return Vec::new();
        }
        let reset = self.timer.set_break_minutes(minutes);
        self.duration_changed(Phase::Break, minutes, reset)
    }

    // ── Task commands ────────────────────────────────────────────────

    /// Add a task. It becomes active when nothing workable was active.
    pub fn add_task(&mut self, title: &str, estimated_pomodoros: u32) -> Outcome {
        let task = self.tasks.add(title, estimated_pomodoros)?;
        let task_id = task.id();
        let mut events = vec![Event::TaskAdded {
            task_id,
            title: task.title().to_string(),
            estimated_pomodoros: task.estimated_pomodoros(),
            at: Utc::now(),
        }];

        let keeps_current = self
            .active_task_id
            .is_some_and(|id| selector::is_selectable(&self.tasks, id));
        if !keeps_current {
            self.set_active(Some(task_id), &mut events);
        }
        Ok(events)
    }

    pub fn edit_task(&mut self, id: TaskId, title: &str, estimated_pomodoros: u32) -> Outcome {
        let task = self.tasks.edit(id, title, estimated_pomodoros)?;
        let mut events = vec![Event::TaskUpdated {
            task_id: id,
            title: task.title().to_string(),
            estimated_pomodoros: task.estimated_pomodoros(),
            completed: task.is_completed(),
            at: Utc::now(),
        }];
        self.reselect(&mut events);
        Ok(events)
    }

    pub fn delete_task(&mut self, id: TaskId) -> Outcome {
        self.tasks.remove(id)?;
        let mut events = vec![Event::TaskDeleted {
            task_id: id,
            at: Utc::now(),
        }];
        self.reselect(&mut events);
        Ok(events)
    }

    /// Make `id` the active task. Completed tasks are refused.
    pub fn set_active_task(&mut self, id: TaskId) -> Outcome {
        let task = self.tasks.get(id).ok_or(ValidationError::TaskNotFound(id))?;
        if task.is_completed() {
            return Err(ValidationError::TaskAlreadyCompleted);
        }
        let mut events = Vec::new();
        self.set_active(Some(id), &mut events);
        Ok(events)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn check_availability(&self) -> Result<(), ValidationError> {
        if self.tasks.is_empty() {
            return Err(ValidationError::NoTasks);
        }
        if !self.tasks.has_incomplete() {
            return Err(ValidationError::AllTasksCompleted);
        }
        Ok(())
    }

    /// Credit a finished work phase, then repair the active task.
    fn finish_phase(&mut self, change: PhaseChange, events: &mut Vec<Event>) {
        if change.completed == Phase::Work {
            if let Some(task) = self
                .active_task_id
                .and_then(|id| self.tasks.record_pomodoro(id))
            {
                info!(
                    task_id = %task.id(),
                    done = task.completed_pomodoros(),
                    estimate = task.estimated_pomodoros(),
                    "pomodoro credited"
                );
                events.push(Event::TaskProgressed {
                    task_id: task.id(),
                    completed_pomodoros: task.completed_pomodoros(),
                    estimated_pomodoros: task.estimated_pomodoros(),
                    completed: task.is_completed(),
                    at: Utc::now(),
                });
            }
        }
        self.reselect(events);
    }

    fn reselect(&mut self, events: &mut Vec<Event>) {
        let next = selector::resolve(&self.tasks, self.active_task_id);
        self.set_active(next, events);
    }

    fn set_active(&mut self, next: Option<TaskId>, events: &mut Vec<Event>) {
        if next == self.active_task_id {
            return;
        }
        debug!(from = ?self.active_task_id, to = ?next, "active task changed");
        events.push(Event::ActiveTaskChanged {
            from: self.active_task_id,
            to: next,
            at: Utc::now(),
        });
        self.active_task_id = next;
    }

    fn paused_event(&self) -> Event {
        Event::TimerPaused {
            phase: self.timer.phase(),
            time_left_secs: self.timer.time_left_secs(),
            at: Utc::now(),
        }
    }

    fn duration_changed(&self, phase: Phase, minutes: u32, reset: bool) -> Vec<Event> {
        vec![Event::DurationChanged {
            phase,
            minutes,
            time_left_secs: reset.then(|| self.timer.time_left_secs()),
            at: Utc::now(),
        }]
    }
}

fn notice(reason: &ValidationError) -> Event {
    Event::Notice {
        message: reason.to_string(),
        at: Utc::now(),
    }
}
