//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads - the caller delivers one `tick()` per elapsed second, normally
//! from a [`ClockDriver`](super::ClockDriver).
//!
//! ## State Transitions
//!
//! ```text
//!            start                 tick (time_left <= 1)
//! Paused ──────────> Running ───────────────────────────> Running
//!   ^    <──────────   |  Work -> Break -> Work (cycles += 1)
//!   |   stop/reset     |
//!   +------------------+
//! ```
//!
//! The engine knows nothing about tasks; crediting a finished work phase is
//! left to [`Session`](crate::Session).

use serde::{Deserialize, Serialize};

use super::phase::Phase;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// A phase boundary crossed by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub completed: Phase,
    pub next: Phase,
    /// Seconds on the clock for the phase just entered.
    pub time_left_secs: u32,
    pub cycles: u32,
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    work_minutes: u32,
    break_minutes: u32,
    phase: Phase,
    /// Remaining seconds in the current phase.
    time_left_secs: u32,
    is_active: bool,
    /// Completed break phases.
    cycles: u32,
}

impl TimerEngine {
    /// Create a paused engine at the start of a work phase.
    ///
    /// Durations below one minute are raised to one.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_minutes = work_minutes.max(1);
        Self {
            work_minutes,
            break_minutes: break_minutes.max(1),
            phase: Phase::Work,
            time_left_secs: minutes_to_secs(work_minutes),
            is_active: false,
            cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_work_session(&self) -> bool {
        self.phase == Phase::Work
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Full length of `phase` in seconds.
    pub fn phase_duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => minutes_to_secs(self.work_minutes),
            Phase::Break => minutes_to_secs(self.break_minutes),
        }
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.phase_duration_secs(self.phase);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / total as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `false` when the timer was already running.
    pub fn start(&mut self) -> bool {
        let was_active = self.is_active;
        self.is_active = true;
        !was_active
    }

    /// Returns `false` when the timer was already stopped.
    pub fn stop(&mut self) -> bool {
        let was_active = self.is_active;
        self.is_active = false;
        was_active
    }

    /// Back to a paused, full-length work phase. Cycles are kept.
    pub fn reset(&mut self) {
        self.is_active = false;
        self.phase = Phase::Work;
        self.time_left_secs = self.phase_duration_secs(Phase::Work);
    }

    /// Advance one second. Returns the boundary crossed, if any.
    ///
    /// A tick delivered while stopped is ignored. The last second of a phase
    /// is never counted down to zero; the tick that finds `time_left <= 1`
    /// moves straight into the next phase with a full clock.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.is_active {
            return None;
        }
        if self.time_left_secs > 1 {
            self.time_left_secs -= 1;
            return None;
        }
        Some(self.advance())
    }

    /// End the current break early. Returns `None` outside a break.
    pub fn skip_break(&mut self) -> Option<PhaseChange> {
        match self.phase {
            Phase::Break => Some(self.advance()),
            Phase::Work => None,
        }
    }

    /// Store a new work duration. Returns `true` when the clock was reset to it.
    pub fn set_work_minutes(&mut self, minutes: u32) -> bool {
        if minutes == 0 {
            return false;
        }
        self.work_minutes = minutes;
        self.sync_idle_clock(Phase::Work)
    }

    /// Store a new break duration. Returns `true` when the clock was reset to it.
    pub fn set_break_minutes(&mut self, minutes: u32) -> bool {
        if minutes == 0 {
            return false;
        }
        self.break_minutes = minutes;
        self.sync_idle_clock(Phase::Break)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn sync_idle_clock(&mut self, edited: Phase) -> bool {
        if self.phase != edited || self.is_active {
            return false;
        }
        self.time_left_secs = self.phase_duration_secs(edited);
        true
    }

    fn advance(&mut self) -> PhaseChange {
        let completed = self.phase;
        if completed == Phase::Break {
            self.cycles += 1;
        }
        self.phase = completed.next();
        self.time_left_secs = self.phase_duration_secs(self.phase);
        PhaseChange {
            completed,
            next: self.phase,
            time_left_secs: self.time_left_secs,
            cycles: self.cycles,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}
