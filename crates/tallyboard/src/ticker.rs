//! Periodic ticker abstraction and lifecycle.
//!
//! Each autonomous dashboard component (simulator, notifier, clock) is a
//! [`Ticker`] driven by its own repeating timer. Timers are owned, never
//! ambient: the [`Dashboard`] spawns them and cancels every one of them on
//! shutdown through cloneable [`TickerHandle`]s, so no timer outlives its
//! owner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::view::View;

/// A view shared between the UI thread and the ticker tasks.
pub type SharedView = Arc<Mutex<dyn View>>;

/// A periodically invoked dashboard component.
#[async_trait::async_trait]
pub trait Ticker: Send {
    /// Name of this ticker (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Run one tick. Runs to completion; must not block the thread.
    async fn tick(&mut self);
}

/// A handle to cancel a running ticker.
///
/// This is a lightweight, cloneable handle that can signal the ticker's task
/// to stop from any other task.
#[derive(Debug, Clone)]
pub struct TickerHandle {
    name: &'static str,
    stop_signal: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl TickerHandle {
    /// Create a new ticker handle.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stop_signal: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// The ticker's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signal the ticker to stop.
    ///
    /// Takes effect immediately; the task does not wait out its current
    /// period.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Check if the stop signal has been sent.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }

    /// Wait until the stop signal is sent.
    pub async fn stopped(&self) {
        self.notify.notified().await;
    }
}

/// Owns every periodic component of a running dashboard.
///
/// Lifecycle: construct, spawn tickers, then [`shutdown`](Self::shutdown).
/// Dropping without shutdown leaves the stop signals unsent, so callers are
/// expected to shut down explicitly.
#[derive(Debug, Default)]
pub struct Dashboard {
    handles: Vec<TickerHandle>,
    tasks: Vec<tokio::task::JoinHandle<()>>,
}

impl Dashboard {
    /// Create an empty dashboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a ticker on its own repeating timer.
    ///
    /// The first tick fires after one full `period`. Missed ticks are
    /// skipped, not bunched.
    pub fn spawn(&mut self, mut ticker: Box<dyn Ticker>, period: Duration) -> TickerHandle {
        let handle = TickerHandle::new(ticker.name());
        let task_handle = handle.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately on first tick; consume it so the
            // first real tick lands one period after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if task_handle.should_stop() {
                            break;
                        }
                        ticker.tick().await;
                    }
                    () = task_handle.stopped() => break,
                }
            }
            debug!("ticker '{}' stopped", task_handle.name());
        });

        self.handles.push(handle.clone());
        self.tasks.push(task);
        handle
    }

    /// Number of spawned tickers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Check if any tickers are still running (haven't been signaled to stop).
    #[must_use]
    pub fn any_running(&self) -> bool {
        self.handles.iter().any(|h| !h.should_stop())
    }

    /// Signal every ticker to stop.
    pub fn stop_all(&self) {
        for handle in &self.handles {
            handle.stop();
        }
    }

    /// Stop every ticker and wait for the tasks to finish.
    pub async fn shutdown(self) {
        self.stop_all();
        for task in self.tasks {
            let _ = task.await;
        }
        debug!("dashboard shut down");
    }
}
