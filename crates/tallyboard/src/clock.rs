//! The live clock display.
//!
//! A ticker that writes the formatted current local time into the view's
//! clock slot. Formatting is delegated to chrono; the format string is
//! configuration and is validated at load time.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ticker::{SharedView, Ticker};

/// Format the current local time with the given chrono format string.
#[must_use]
pub fn format_local_time(format: &str) -> String {
    Local::now().format(format).to_string()
}

/// Check that a chrono format string is well-formed.
///
/// # Errors
///
/// Returns a validation error if the format string contains an invalid
/// specifier.
pub fn validate_time_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::config_validation(format!(
            "invalid time format: {format}"
        )));
    }
    Ok(())
}

/// Ticker writing the current time into the clock slot.
pub struct ClockTicker {
    view: SharedView,
    format: String,
}

impl std::fmt::Debug for ClockTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockTicker")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl ClockTicker {
    /// Create a clock ticker with the given format string.
    #[must_use]
    pub fn new(view: SharedView, format: impl Into<String>) -> Self {
        Self {
            view,
            format: format.into(),
        }
    }
}

#[async_trait::async_trait]
impl Ticker for ClockTicker {
    fn name(&self) -> &'static str {
        "clock"
    }

    async fn tick(&mut self) {
        let text = format_local_time(&self.format);
        match self.view.lock() {
            Ok(mut view) => match view.clock_slot() {
                Some(slot) => slot.set_text(&text),
                None => debug!("clock slot absent, skipping time update"),
            },
            Err(_) => debug!("view lock poisoned, skipping clock tick"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::view::MemoryView;

    #[test]
    fn test_format_local_time_produces_output() {
        let text = format_local_time("%H:%M:%S");
        assert_eq!(text.len(), 8);
        assert_eq!(text.matches(':').count(), 2);
    }

    #[test]
    fn test_validate_time_format_accepts_valid() {
        assert!(validate_time_format("%H:%M:%S").is_ok());
        assert!(validate_time_format("%Y-%m-%d %H:%M").is_ok());
    }

    #[test]
    fn test_validate_time_format_rejects_invalid() {
        assert!(validate_time_format("%Q").is_err());
    }

    #[tokio::test]
    async fn test_clock_ticker_writes_slot() {
        let view = Arc::new(Mutex::new(MemoryView::new()));
        let shared: SharedView = view.clone();
        let mut ticker = ClockTicker::new(shared, "%H:%M:%S");

        ticker.tick().await;

        let guard = view.lock().unwrap();
        assert_eq!(guard.clock_text().map(str::len), Some(8));
    }

    #[tokio::test]
    async fn test_clock_ticker_skips_absent_slot() {
        let view = Arc::new(Mutex::new(MemoryView::new().without_clock()));
        let shared: SharedView = view.clone();
        let mut ticker = ClockTicker::new(shared, "%H:%M:%S");

        // Must not panic
        ticker.tick().await;
    }
}
