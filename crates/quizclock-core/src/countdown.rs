//! Background countdown driver.
//!
//! A [`Countdown`] spawns a task that emits one tick per period over a
//! bounded channel. Dropping the countdown aborts the task, so a discarded
//! session can never be ticked by a stale timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Real-time cadence of the countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const TICK_BUFFER: usize = 16;

/// A running countdown. Stops when dropped.
#[derive(Debug)]
pub struct Countdown {
    ticks: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking. The first tick arrives one full `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(TICK_BUFFER);
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "countdown started");
        Self { ticks, handle }
    }

    /// Wait for the next tick. `None` once the driver has stopped.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Whether the background task is still scheduled.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("countdown stopped");
    }
}
