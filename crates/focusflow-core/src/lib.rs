//! # FocusFlow Core Library
//!
//! This library provides the core logic for the FocusFlow Pomodoro timer:
//! alternating work and break phases, a task list credited with finished
//! work phases, and a focus score that drops every time the user pauses.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine; one `tick()` per second
//! - **Clock Driver**: Cancellable tokio task that produces those ticks while
//!   the timer runs
//! - **Task Registry**: Ordered tasks plus the active-task selection policy
//! - **Session**: Single owner of all state; every user intent is a method
//!   returning the [`Event`]s it produced
//! - **Storage**: TOML-based configuration of user preferences
//!
//! ## Key Components
//!
//! - [`Session`]: Command/query interface for any host (CLI, GUI, tests)
//! - [`TimerEngine`]: Core timer state machine
//! - [`ClockDriver`]: Periodic tick source
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod focus;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use focus::{FocusLevel, FocusMetrics};
pub use session::{Outcome, Session};
pub use storage::Config;
pub use task::{Task, TaskId, TaskRegistry, TaskSummary};
pub use timer::{format_clock, ClockDriver, ClockTick, Phase, PhaseChange, TimerEngine};
