//! The rendered-view contract.
//!
//! The core never talks to a concrete UI directly. It goes through the
//! [`View`] trait, whose accessors return `Option`: an absent view element
//! degrades gracefully (the feature is skipped), and that policy lives in the
//! type rather than in ad-hoc null checks.
//!
//! [`MemoryView`] is an in-memory implementation for tests and headless runs,
//! in the same spirit as an in-memory database for storage tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::feed::ActivityEntry;

/// A named region of the view holding a short display string.
pub trait TextSlot {
    /// Overwrite the slot's display string wholesale.
    fn set_text(&mut self, text: &str);
}

/// The view region that displays the activity feed.
pub trait FeedSurface {
    /// Replace the rendered feed with the given entries, newest first.
    fn render(&mut self, entries: &[ActivityEntry]);
}

/// The view region that displays navigation links.
pub trait NavSurface {
    /// Targets of all navigation links, in display order.
    fn targets(&self) -> Vec<String>;

    /// Mark the link with the given target as active or inactive.
    ///
    /// Unknown targets are ignored.
    fn set_link_active(&mut self, target: &str, active: bool);
}

/// A navigation link: a section target plus its visible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Section identifier the link points at.
    pub target: String,
    /// Visible label text.
    pub label: String,
}

impl NavLink {
    /// Create a new navigation link.
    #[must_use]
    pub fn new(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
        }
    }
}

/// The rendered view as the core sees it.
///
/// Every accessor is optional: a view may omit any element, and callers must
/// skip the corresponding update without treating the absence as an error.
pub trait View: Send {
    /// The metric slot with the given identifier, if present.
    fn metric_slot(&mut self, id: &str) -> Option<&mut dyn TextSlot>;

    /// The current-time slot, if present.
    fn clock_slot(&mut self) -> Option<&mut dyn TextSlot>;

    /// The page heading slot, if present.
    fn heading_slot(&mut self) -> Option<&mut dyn TextSlot>;

    /// The authentication-state slot, if present.
    fn auth_slot(&mut self) -> Option<&mut dyn TextSlot>;

    /// The activity feed surface, if present.
    fn activity_feed(&mut self) -> Option<&mut dyn FeedSurface>;

    /// The navigation surface, if present.
    fn nav(&mut self) -> Option<&mut dyn NavSurface>;
}

/// A plain string slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    text: String,
}

impl MemorySlot {
    /// The slot's current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextSlot for MemorySlot {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// An in-memory feed surface that records the last rendered entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    entries: Vec<ActivityEntry>,
}

impl MemoryFeed {
    /// The last rendered entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }
}

impl FeedSurface for MemoryFeed {
    fn render(&mut self, entries: &[ActivityEntry]) {
        self.entries = entries.to_vec();
    }
}

/// An in-memory navigation surface.
#[derive(Debug, Clone, Default)]
pub struct MemoryNav {
    links: Vec<(NavLink, bool)>,
}

impl MemoryNav {
    /// Create a nav surface with the given links, all inactive.
    #[must_use]
    pub fn new(links: Vec<NavLink>) -> Self {
        Self {
            links: links.into_iter().map(|link| (link, false)).collect(),
        }
    }

    /// Whether the link with the given target is currently active.
    #[must_use]
    pub fn is_active(&self, target: &str) -> bool {
        self.links
            .iter()
            .any(|(link, active)| link.target == target && *active)
    }
}

impl NavSurface for MemoryNav {
    fn targets(&self) -> Vec<String> {
        self.links.iter().map(|(link, _)| link.target.clone()).collect()
    }

    fn set_link_active(&mut self, target: &str, active: bool) {
        for (link, state) in &mut self.links {
            if link.target == target {
                *state = active;
            }
        }
    }
}

/// An in-memory view for tests and headless runs.
///
/// Freshly constructed, it carries clock, heading, and auth slots, an empty
/// feed surface, and no metric slots or nav links. Builder methods add or
/// remove elements to model partial views.
#[derive(Debug, Default)]
pub struct MemoryView {
    metrics: HashMap<String, MemorySlot>,
    clock: Option<MemorySlot>,
    heading: Option<MemorySlot>,
    auth: Option<MemorySlot>,
    feed: Option<MemoryFeed>,
    nav: Option<MemoryNav>,
}

impl MemoryView {
    /// Create a view with all fixed elements present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
            clock: Some(MemorySlot::default()),
            heading: Some(MemorySlot::default()),
            auth: Some(MemorySlot::default()),
            feed: Some(MemoryFeed::default()),
            nav: Some(MemoryNav::default()),
        }
    }

    /// Add a metric slot with the given identifier.
    #[must_use]
    pub fn with_metric_slot(mut self, id: impl Into<String>) -> Self {
        self.metrics.insert(id.into(), MemorySlot::default());
        self
    }

    /// Add a navigation link.
    #[must_use]
    pub fn with_nav_link(mut self, target: impl Into<String>, label: impl Into<String>) -> Self {
        self.nav
            .get_or_insert_with(MemoryNav::default)
            .links
            .push((NavLink::new(target, label), false));
        self
    }

    /// Remove the activity feed surface.
    #[must_use]
    pub fn without_feed(mut self) -> Self {
        self.feed = None;
        self
    }

    /// Remove the clock slot.
    #[must_use]
    pub fn without_clock(mut self) -> Self {
        self.clock = None;
        self
    }

    /// Remove the navigation surface.
    #[must_use]
    pub fn without_nav(mut self) -> Self {
        self.nav = None;
        self
    }

    /// The text of the given metric slot, if the slot exists.
    #[must_use]
    pub fn metric_text(&self, id: &str) -> Option<&str> {
        self.metrics.get(id).map(MemorySlot::text)
    }

    /// The clock slot's text, if the slot exists.
    #[must_use]
    pub fn clock_text(&self) -> Option<&str> {
        self.clock.as_ref().map(MemorySlot::text)
    }

    /// The heading slot's text, if the slot exists.
    #[must_use]
    pub fn heading_text(&self) -> Option<&str> {
        self.heading.as_ref().map(MemorySlot::text)
    }

    /// The auth slot's text, if the slot exists.
    #[must_use]
    pub fn auth_text(&self) -> Option<&str> {
        self.auth.as_ref().map(MemorySlot::text)
    }

    /// The last rendered feed entries (empty if no feed surface exists).
    #[must_use]
    pub fn feed_entries(&self) -> &[ActivityEntry] {
        self.feed.as_ref().map_or(&[], MemoryFeed::entries)
    }

    /// Whether the nav link with the given target is active.
    #[must_use]
    pub fn nav_is_active(&self, target: &str) -> bool {
        self.nav.as_ref().is_some_and(|nav| nav.is_active(target))
    }
}

impl View for MemoryView {
    fn metric_slot(&mut self, id: &str) -> Option<&mut dyn TextSlot> {
        self.metrics.get_mut(id).map(|slot| slot as &mut dyn TextSlot)
    }

    fn clock_slot(&mut self) -> Option<&mut dyn TextSlot> {
        self.clock.as_mut().map(|slot| slot as &mut dyn TextSlot)
    }

    fn heading_slot(&mut self) -> Option<&mut dyn TextSlot> {
        self.heading.as_mut().map(|slot| slot as &mut dyn TextSlot)
    }

    fn auth_slot(&mut self) -> Option<&mut dyn TextSlot> {
        self.auth.as_mut().map(|slot| slot as &mut dyn TextSlot)
    }

    fn activity_feed(&mut self) -> Option<&mut dyn FeedSurface> {
        self.feed.as_mut().map(|feed| feed as &mut dyn FeedSurface)
    }

    fn nav(&mut self) -> Option<&mut dyn NavSurface> {
        self.nav.as_mut().map(|nav| nav as &mut dyn NavSurface)
    }
}
