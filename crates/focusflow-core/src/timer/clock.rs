//! Periodic tick source for the timer engine.
//!
//! The driver is a tokio task that sends one [`ClockTick`] per period into
//! the session's event channel. It is armed while the session is running and
//! aborted whenever it stops; dropping the [`ClockDriver`] aborts it as well.
//!
//! Ticks are never in flight concurrently: each tick carries an
//! acknowledgement that fires when the tick is dropped, and the driver waits
//! for it before it starts waiting for the next period.
//!
//! Aborting the task cannot recall a tick already sitting in the channel, so
//! every tick is stamped with the arm generation that produced it. Consumers
//! check [`ClockDriver::is_current`] and drop anything older.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed period. Dropping it marks the tick as committed.
#[derive(Debug)]
pub struct ClockTick {
    generation: u64,
    ack: Option<oneshot::Sender<()>>,
}

impl Drop for ClockTick {
    fn drop(&mut self) {
        if let Some(ack) = self.ack.take() {
            let _ = ack.send(());
        }
    }
}

/// Cancellable handle over the periodic tick task.
#[derive(Debug)]
pub struct ClockDriver {
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ClockDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            generation: 0,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether `tick` was produced by the current arming. Ticks queued before
    /// the last disarm are stale and must not advance the timer.
    pub fn is_current(&self, tick: &ClockTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }

    /// Start ticking into `ticks`. No-op while already armed.
    ///
    /// The first tick arrives one full period after arming.
    pub fn arm(&mut self, ticks: &mpsc::Sender<ClockTick>) {
        if self.is_armed() {
            return;
        }
        self.generation += 1;
        let generation = self.generation;
        let ticks = ticks.clone();
        let period = self.period;
        debug!(?period, generation, "clock armed");
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (ack, committed) = oneshot::channel();
                let tick = ClockTick {
                    generation,
                    ack: Some(ack),
                };
                if ticks.send(tick).await.is_err() {
                    break;
                }
                if committed.await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop ticking. No further ticks are sent once this returns, and any
    /// tick still queued stops being current.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("clock disarmed");
        }
    }

    /// Arm or disarm to match the session's run flag.
    pub fn follow(&mut self, is_active: bool, ticks: &mpsc::Sender<ClockTick>) {
        if is_active {
            self.arm(ticks);
        } else {
            self.disarm();
        }
    }
}

impl Default for ClockDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.disarm();
    }
}
