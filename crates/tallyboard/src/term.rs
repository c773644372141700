//! Terminal view: the rendered-view contract over `tallyboard-term`.
//!
//! Adapts the terminal rendering primitives to the [`View`] trait. The
//! terminal view carries every fixed element; only metric slots and nav
//! links vary with configuration.

use std::collections::HashMap;

use tallyboard_term::{TermLinkBar, TermList, TermSlot};

use crate::config::Config;
use crate::feed::ActivityEntry;
use crate::view::{FeedSurface, NavSurface, TextSlot, View};

impl TextSlot for TermSlot {
    fn set_text(&mut self, text: &str) {
        self.update(text);
    }
}

impl FeedSurface for TermList {
    fn render(&mut self, entries: &[ActivityEntry]) {
        let lines = entries
            .iter()
            .map(|entry| format!("[{}] {}", entry.display_age, entry.text))
            .collect();
        self.render_lines(lines);
    }
}

impl NavSurface for TermLinkBar {
    fn targets(&self) -> Vec<String> {
        Self::targets(self)
    }

    fn set_link_active(&mut self, target: &str, active: bool) {
        self.set_active(target, active);
    }
}

/// A complete terminal-rendered dashboard view.
#[derive(Debug)]
pub struct TermView {
    metrics: HashMap<String, TermSlot>,
    clock: TermSlot,
    heading: TermSlot,
    auth: TermSlot,
    feed: TermList,
    nav: TermLinkBar,
}

impl TermView {
    /// Build a terminal view with the metric slots and nav links from the
    /// given configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let metrics = config
            .catalogs
            .metrics
            .iter()
            .map(|spec| (spec.slot.clone(), TermSlot::new(spec.slot.clone())))
            .collect();

        let mut nav = TermLinkBar::new();
        for link in &config.display.nav_links {
            nav.push_link(link.target.clone(), link.label.clone());
        }

        Self {
            metrics,
            clock: TermSlot::new("time"),
            heading: TermSlot::new("section"),
            auth: TermSlot::new("session"),
            feed: TermList::new("Recent activity"),
            nav,
        }
    }
}

impl View for TermView {
    fn metric_slot(&mut self, id: &str) -> Option<&mut dyn TextSlot> {
        self.metrics.get_mut(id).map(|slot| slot as &mut dyn TextSlot)
    }

    fn clock_slot(&mut self) -> Option<&mut dyn TextSlot> {
        Some(&mut self.clock)
    }

    fn heading_slot(&mut self) -> Option<&mut dyn TextSlot> {
        Some(&mut self.heading)
    }

    fn auth_slot(&mut self) -> Option<&mut dyn TextSlot> {
        Some(&mut self.auth)
    }

    fn activity_feed(&mut self) -> Option<&mut dyn FeedSurface> {
        Some(&mut self.feed)
    }

    fn nav(&mut self) -> Option<&mut dyn NavSurface> {
        Some(&mut self.nav)
    }
}
