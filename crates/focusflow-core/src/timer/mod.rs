mod clock;
mod engine;
mod phase;

pub use clock::{ClockDriver, ClockTick, DEFAULT_TICK_PERIOD};
pub use engine::{PhaseChange, TimerEngine, DEFAULT_BREAK_MINUTES, DEFAULT_WORK_MINUTES};
pub use phase::{format_clock, Phase};
