//! Periodic elapsed-time ticker
//!
//! Emits the time elapsed since an origin at a fixed interval until stopped.
//! The ticker is a handle owning a spawned task: it must be stopped (or
//! dropped, which stops it) to end emissions.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration as StdDuration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::domain::recording::{ElapsedTime, DEFAULT_TICK_INTERVAL_MS};

/// Callback receiving each elapsed-time update
pub type TickCallback = Arc<dyn Fn(ElapsedTime) + Send + Sync>;

/// Cancellable periodic timer. At most one emission task runs per ticker.
pub struct DurationTicker {
    period: StdDuration,
    task: Option<JoinHandle<()>>,
    /// Cleared under lock on stop; the task only emits while holding it,
    /// so no callback runs once `stop` has returned.
    active: Arc<StdMutex<bool>>,
}

impl DurationTicker {
    /// Create a stopped ticker with the given period
    pub fn new(period: StdDuration) -> Self {
        Self {
            period: period.max(StdDuration::from_millis(1)),
            task: None,
            active: Arc::new(StdMutex::new(false)),
        }
    }

    /// Whether an emission task is scheduled
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Begin emitting `now - origin` every period, first emission one period
    /// after `origin`.
    ///
    /// Calling `start` while already running has no effect and returns `false`;
    /// the existing emission task keeps its origin and callback.
    pub fn start(&mut self, origin: Instant, on_tick: TickCallback) -> bool {
        if self.is_running() {
            return false;
        }

        let active = Arc::new(StdMutex::new(true));
        self.active = Arc::clone(&active);

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(origin + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let guard = active.lock().unwrap_or_else(|e| e.into_inner());
                if !*guard {
                    break;
                }
                on_tick(ElapsedTime::from_std(
                    Instant::now().saturating_duration_since(origin),
                ));
            }
        }));
        true
    }

    /// Stop emitting. Safe to call repeatedly and on a ticker never started.
    pub fn stop(&mut self) {
        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = false;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for DurationTicker {
    fn default() -> Self {
        Self::new(StdDuration::from_millis(DEFAULT_TICK_INTERVAL_MS))
    }
}

impl Drop for DurationTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
