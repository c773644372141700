//! The notification emitter.
//!
//! On each tick the emitter selects one event string uniformly at random from
//! its catalog and passes it, unformatted, to a single outbound [`Reporter`]
//! hook. The hook's behavior (render a toast, update a badge counter, write a
//! log line) is the collaborator's business; a failing hook is caught and
//! logged and never breaks the timer loop.

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::rng::RandomSource;
use crate::ticker::Ticker;

/// An outbound hook receiving one human-readable event string per call.
pub trait Reporter: Send {
    /// Report the event. Fire-and-forget from the emitter's perspective.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the emitter logs the failure and continues.
    fn report(&mut self, event: &str) -> anyhow::Result<()>;
}

/// The default reporter: writes the event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, event: &str) -> anyhow::Result<()> {
        info!("notification: {event}");
        Ok(())
    }
}

/// Emits synthetic notification events on a fixed period.
pub struct NotificationEmitter {
    events: Catalog,
    reporter: Box<dyn Reporter>,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for NotificationEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationEmitter")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl NotificationEmitter {
    /// Create an emitter from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if `events` is empty.
    pub fn new(
        events: Vec<String>,
        reporter: Box<dyn Reporter>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Ok(Self {
            events: Catalog::new("notifications", events)?,
            reporter,
            rng,
        })
    }

    /// Create an emitter from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification catalog in the configuration
    /// is empty.
    pub fn from_config(
        config: &Config,
        reporter: Box<dyn Reporter>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        Self::new(config.catalogs.notifications.clone(), reporter, rng)
    }

    /// Run one tick: pick an event and hand it to the reporter.
    pub fn tick(&mut self) {
        let event = self.events.pick(self.rng.as_mut()).to_string();
        if let Err(err) = self.reporter.report(&event) {
            warn!("notification hook failed for '{event}': {err:#}");
        }
    }
}

#[async_trait::async_trait]
impl Ticker for NotificationEmitter {
    fn name(&self) -> &'static str {
        "notifier"
    }

    async fn tick(&mut self) {
        Self::tick(self);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::rng::SequenceRandom;

    /// Records every reported event.
    struct RecordingReporter {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Reporter for RecordingReporter {
        fn report(&mut self, event: &str) -> anyhow::Result<()> {
            self.events.lock().unwrap().push(event.to_string());
            Ok(())
        }
    }

    /// Fails on every call.
    struct FailingReporter;

    impl Reporter for FailingReporter {
        fn report(&mut self, _event: &str) -> anyhow::Result<()> {
            anyhow::bail!("toast renderer is gone")
        }
    }

    fn events() -> Vec<String> {
        vec![
            "Attendance threshold reached".to_string(),
            "Device heartbeat missed".to_string(),
        ]
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let result = NotificationEmitter::new(
            vec![],
            Box::new(LogReporter),
            Box::new(SequenceRandom::new(vec![0])),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("notifications"));
    }

    #[test]
    fn test_tick_reports_catalog_entry() {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let reporter = RecordingReporter {
            events: Arc::clone(&recorded),
        };
        let mut emitter = NotificationEmitter::new(
            events(),
            Box::new(reporter),
            Box::new(SequenceRandom::new(vec![1, 0])),
        )
        .unwrap();

        emitter.tick();
        emitter.tick();

        let recorded = recorded.lock().unwrap();
        assert_eq!(
            recorded.as_slice(),
            ["Device heartbeat missed", "Attendance threshold reached"]
        );
    }

    #[test]
    fn test_tick_passes_event_through_unformatted() {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let reporter = RecordingReporter {
            events: Arc::clone(&recorded),
        };
        let catalog = events();
        let mut emitter = NotificationEmitter::new(
            catalog.clone(),
            Box::new(reporter),
            Box::new(SequenceRandom::new(vec![0])),
        )
        .unwrap();

        emitter.tick();
        assert!(catalog.contains(&recorded.lock().unwrap()[0]));
    }

    #[test]
    fn test_failing_hook_does_not_break_ticks() {
        let mut emitter = NotificationEmitter::new(
            events(),
            Box::new(FailingReporter),
            Box::new(SequenceRandom::new(vec![0, 1])),
        )
        .unwrap();

        // Must not panic or propagate
        emitter.tick();
        emitter.tick();
    }

    #[test]
    fn test_log_reporter_accepts_events() {
        let mut reporter = LogReporter;
        assert!(reporter.report("Sync completed").is_ok());
    }

    #[tokio::test]
    async fn test_ticker_impl_delegates() {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let reporter = RecordingReporter {
            events: Arc::clone(&recorded),
        };
        let mut emitter = NotificationEmitter::new(
            events(),
            Box::new(reporter),
            Box::new(SequenceRandom::new(vec![0])),
        )
        .unwrap();

        assert_eq!(Ticker::name(&emitter), "notifier");
        Ticker::tick(&mut emitter).await;
        assert_eq!(recorded.lock().unwrap().len(), 1);
    }
}
