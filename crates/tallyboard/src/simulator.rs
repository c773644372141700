//! The periodic simulator.
//!
//! On each tick the simulator updates one randomly chosen metric slot and
//! prepends one randomly chosen activity to the bounded feed, evicting and
//! relabeling as needed. Each step degrades to a silent skip when the view
//! lacks the element it writes to; the metric step and the feed step are
//! independent of each other.

use tracing::debug;

use crate::catalog::{Catalog, MetricSpec};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::ActivityFeed;
use crate::rng::RandomSource;
use crate::ticker::{SharedView, Ticker};
use crate::view::View;

/// Drives the simulated metric and activity updates.
pub struct PeriodicSimulator {
    feed: ActivityFeed,
    activities: Catalog,
    captions: Vec<String>,
    metrics: Vec<MetricSpec>,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for PeriodicSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicSimulator")
            .field("feed", &self.feed)
            .field("activities", &self.activities)
            .field("captions", &self.captions)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl PeriodicSimulator {
    /// Create a simulator from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] if the metric registry is empty. The
    /// activity catalog enforces its own non-emptiness.
    pub fn new(
        activities: Catalog,
        captions: Vec<String>,
        metrics: Vec<MetricSpec>,
        capacity: usize,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        if metrics.is_empty() {
            return Err(Error::empty_catalog("metrics"));
        }
        Ok(Self {
            feed: ActivityFeed::new(capacity),
            activities,
            captions,
            metrics,
            rng,
        })
    }

    /// Create a simulator from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any catalog in the configuration is empty.
    pub fn from_config(config: &Config, rng: Box<dyn RandomSource>) -> Result<Self> {
        Self::new(
            Catalog::new("activities", config.catalogs.activities.clone())?,
            config.catalogs.aging_captions.clone(),
            config.catalogs.metrics.clone(),
            config.simulator.feed_capacity,
            rng,
        )
    }

    /// The current feed state.
    #[must_use]
    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    /// Run one tick against the given view.
    ///
    /// Performs the metric update, then the feed update. Either step is
    /// skipped (with a debug log, never an error) when the view lacks the
    /// corresponding element.
    pub fn tick(&mut self, view: &mut dyn View) {
        self.update_metric(view);
        self.update_feed(view);
    }

    fn update_metric(&mut self, view: &mut dyn View) {
        let spec = &self.metrics[self.rng.pick_index(self.metrics.len())];
        let text = spec.formatter.format(self.rng.as_mut());
        match view.metric_slot(&spec.slot) {
            Some(slot) => slot.set_text(&text),
            None => debug!("metric slot '{}' absent, skipping update", spec.slot),
        }
    }

    fn update_feed(&mut self, view: &mut dyn View) {
        let Some(surface) = view.activity_feed() else {
            debug!("activity feed absent, skipping update");
            return;
        };

        let text = self.activities.pick(self.rng.as_mut()).to_string();
        if let Some(evicted) = self.feed.push(text) {
            debug!("evicted activity entry: {}", evicted.text);
        }
        self.feed.relabel(&self.captions);
        surface.render(self.feed.entries());
    }
}

/// Ticker adapter running a [`PeriodicSimulator`] against a shared view.
pub struct SimulatorTicker {
    simulator: PeriodicSimulator,
    view: SharedView,
}

impl std::fmt::Debug for SimulatorTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatorTicker")
            .field("simulator", &self.simulator)
            .finish_non_exhaustive()
    }
}

impl SimulatorTicker {
    /// Create a ticker driving the given simulator.
    #[must_use]
    pub fn new(simulator: PeriodicSimulator, view: SharedView) -> Self {
        Self { simulator, view }
    }
}

#[async_trait::async_trait]
impl Ticker for SimulatorTicker {
    fn name(&self) -> &'static str {
        "simulator"
    }

    async fn tick(&mut self) {
        match self.view.lock() {
            Ok(mut view) => self.simulator.tick(&mut *view),
            Err(_) => debug!("view lock poisoned, skipping simulator tick"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricFormatter;
    use crate::feed::JUST_NOW;
    use crate::rng::SequenceRandom;
    use crate::view::MemoryView;

    fn activities(entries: &[&str]) -> Catalog {
        Catalog::new(
            "activities",
            entries.iter().map(ToString::to_string).collect(),
        )
        .unwrap()
    }

    fn captions(labels: &[&str]) -> Vec<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    fn one_metric() -> Vec<MetricSpec> {
        vec![MetricSpec::new(
            "present-today",
            MetricFormatter::Ratio { den: 50 },
        )]
    }

    fn simulator(rng: SequenceRandom) -> PeriodicSimulator {
        PeriodicSimulator::new(
            activities(&["Employee checked in", "Daily report generated"]),
            captions(&["2 mins ago", "5 mins ago", "12 mins ago", "25 mins ago"]),
            one_metric(),
            5,
            Box::new(rng),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_metric_registry() {
        let result = PeriodicSimulator::new(
            activities(&["a"]),
            vec![],
            vec![],
            5,
            Box::new(SequenceRandom::new(vec![0])),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("metrics"));
    }

    #[test]
    fn test_tick_updates_metric_slot() {
        // metric index 0, ratio value 45, activity index 0
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 0]));
        let mut view = MemoryView::new().with_metric_slot("present-today");

        sim.tick(&mut view);
        assert_eq!(view.metric_text("present-today"), Some("45/50"));
    }

    #[test]
    fn test_tick_inserts_fresh_catalog_entry() {
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 1]));
        let mut view = MemoryView::new().with_metric_slot("present-today");

        sim.tick(&mut view);

        let head = &view.feed_entries()[0];
        assert_eq!(head.display_age, JUST_NOW);
        assert_eq!(head.text, "Daily report generated");
    }

    #[test]
    fn test_feed_length_bounded_over_many_ticks() {
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 1]));
        let mut view = MemoryView::new().with_metric_slot("present-today");

        for _ in 0..20 {
            sim.tick(&mut view);
            assert!(sim.feed().len() <= sim.feed().capacity());
        }
        assert_eq!(view.feed_entries().len(), 5);
    }

    #[test]
    fn test_missing_metric_slot_is_silently_skipped() {
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 0]));
        let mut view = MemoryView::new(); // no metric slots

        sim.tick(&mut view);
        // Feed update still happened
        assert_eq!(view.feed_entries().len(), 1);
    }

    #[test]
    fn test_missing_feed_leaves_metric_update_unaffected() {
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 0]));
        let mut view = MemoryView::new()
            .with_metric_slot("present-today")
            .without_feed();

        sim.tick(&mut view);
        assert_eq!(view.metric_text("present-today"), Some("45/50"));
        assert!(sim.feed().is_empty());
    }

    #[test]
    fn test_relabeling_across_ticks() {
        let mut sim = simulator(SequenceRandom::new(vec![0, 45, 0]));
        let mut view = MemoryView::new().with_metric_slot("present-today");

        sim.tick(&mut view);
        sim.tick(&mut view);
        sim.tick(&mut view);

        let entries = view.feed_entries();
        assert_eq!(entries[0].display_age, JUST_NOW);
        assert_eq!(entries[1].display_age, "2 mins ago");
        assert_eq!(entries[2].display_age, "5 mins ago");
    }

    #[test]
    fn test_capacity_two_end_to_end() {
        // Catalog ["A", "B"], capacity 2, metric picks interleaved.
        let sim = PeriodicSimulator::new(
            activities(&["A", "B"]),
            captions(&["2 mins ago"]),
            one_metric(),
            2,
            // Per tick: metric index, metric value, activity index.
            Box::new(SequenceRandom::new(vec![0, 1, 0, 0, 2, 1, 0, 3, 0])),
        );
        let mut sim = sim.unwrap();
        let mut view = MemoryView::new().with_metric_slot("present-today");

        sim.tick(&mut view);
        assert_eq!(view.feed_entries()[0].text, "A");
        assert_eq!(view.feed_entries()[0].display_age, JUST_NOW);

        sim.tick(&mut view);
        assert_eq!(view.feed_entries()[0].text, "B");
        assert_eq!(view.feed_entries()[1].text, "A");
        assert_eq!(view.feed_entries()[1].display_age, "2 mins ago");

        sim.tick(&mut view);
        let entries = view.feed_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "A");
        assert_eq!(entries[0].display_age, JUST_NOW);
        assert_eq!(entries[1].text, "B");
        assert_eq!(entries[1].display_age, "2 mins ago");
    }

    #[tokio::test]
    async fn test_simulator_ticker_drives_shared_view() {
        use std::sync::{Arc, Mutex};

        let sim = simulator(SequenceRandom::new(vec![0, 45, 0]));
        let view = Arc::new(Mutex::new(
            MemoryView::new().with_metric_slot("present-today"),
        ));
        let shared: SharedView = view.clone();
        let mut ticker = SimulatorTicker::new(sim, shared);

        ticker.tick().await;

        let guard = view.lock().unwrap();
        assert_eq!(guard.feed_entries().len(), 1);
    }
}
