//! The bounded activity feed.
//!
//! An ordered sequence of [`ActivityEntry`], newest first, bounded to a fixed
//! capacity. Insertion always occurs at the head; eviction always removes the
//! tail. An entry's `display_age` is rewritten in place as it ages past the
//! head position; its text is immutable after creation.

/// Age caption assigned to a freshly inserted entry.
pub const JUST_NOW: &str = "Just now";

/// One record in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Human-readable age label, e.g. `"Just now"` or `"2 mins ago"`.
    pub display_age: String,
    /// Description of the activity. Immutable after creation.
    pub text: String,
}

impl ActivityEntry {
    /// Create a fresh entry labeled [`JUST_NOW`].
    #[must_use]
    pub fn fresh(text: impl Into<String>) -> Self {
        Self {
            display_age: JUST_NOW.to_string(),
            text: text.into(),
        }
    }
}

/// A bounded, newest-first feed of activity entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFeed {
    entries: Vec<ActivityEntry>,
    capacity: usize,
}

impl ActivityFeed {
    /// Create an empty feed with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Capacity is validated as configuration
    /// before a feed is ever constructed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "feed capacity must be greater than 0");
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The feed's fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries. Never exceeds [`capacity`](Self::capacity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Insert a fresh entry at the head, evicting the tail entry if the
    /// feed would exceed its capacity.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, text: impl Into<String>) -> Option<ActivityEntry> {
        self.entries.insert(0, ActivityEntry::fresh(text));
        if self.entries.len() > self.capacity {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Rewrite the `display_age` of every entry except the head, in position
    /// order, from the given caption table.
    ///
    /// Entries beyond the table's length keep their previous caption. A pure
    /// function of position: relabeling twice with the same feed state
    /// produces the same captions.
    pub fn relabel(&mut self, captions: &[String]) {
        for (entry, caption) in self.entries.iter_mut().skip(1).zip(captions) {
            entry.display_age.clone_from(caption);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captions(labels: &[&str]) -> Vec<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_push_inserts_at_head_labeled_just_now() {
        let mut feed = ActivityFeed::new(5);
        feed.push("first");
        feed.push("second");

        assert_eq!(feed.entries()[0].text, "second");
        assert_eq!(feed.entries()[0].display_age, JUST_NOW);
        assert_eq!(feed.entries()[1].text, "first");
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut feed = ActivityFeed::new(5);
        for i in 0..20 {
            feed.push(format!("entry {i}"));
            assert!(feed.len() <= feed.capacity());
        }
        assert_eq!(feed.len(), 5);
    }

    #[test]
    fn test_eviction_is_strict_fifo() {
        let mut feed = ActivityFeed::new(5);
        for i in 1..=5 {
            assert!(feed.push(format!("entry {i}")).is_none());
        }

        // The sixth insert evicts the entry from the first push.
        let evicted = feed.push("entry 6").expect("tail should be evicted");
        assert_eq!(evicted.text, "entry 1");
        assert!(!feed.entries().iter().any(|e| e.text == "entry 1"));
    }

    #[test]
    fn test_relabel_skips_head() {
        let mut feed = ActivityFeed::new(5);
        feed.push("old");
        feed.push("new");
        feed.relabel(&captions(&["2 mins ago", "5 mins ago"]));

        assert_eq!(feed.entries()[0].display_age, JUST_NOW);
        assert_eq!(feed.entries()[1].display_age, "2 mins ago");
    }

    #[test]
    fn test_relabel_beyond_table_keeps_previous_caption() {
        let mut feed = ActivityFeed::new(5);
        for i in 0..5 {
            feed.push(format!("entry {i}"));
        }
        feed.relabel(&captions(&["2 mins ago"]));

        assert_eq!(feed.entries()[1].display_age, "2 mins ago");
        // Positions past the table are untouched.
        assert_eq!(feed.entries()[2].display_age, JUST_NOW);
        assert_eq!(feed.entries()[4].display_age, JUST_NOW);
    }

    #[test]
    fn test_relabel_is_idempotent() {
        let mut feed = ActivityFeed::new(5);
        feed.push("a");
        feed.push("b");
        feed.push("c");

        let table = captions(&["2 mins ago", "5 mins ago"]);
        feed.relabel(&table);
        let first = feed.clone();
        feed.relabel(&table);
        assert_eq!(feed, first);
    }

    #[test]
    fn test_relabel_empty_feed_is_noop() {
        let mut feed = ActivityFeed::new(5);
        feed.relabel(&captions(&["2 mins ago"]));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_capacity_two_worked_example() {
        let mut feed = ActivityFeed::new(2);
        let table = captions(&["2 mins ago"]);

        feed.push("A");
        feed.relabel(&table);
        assert_eq!(feed.entries()[0], ActivityEntry::fresh("A"));

        feed.push("B");
        feed.relabel(&table);
        assert_eq!(feed.entries()[0].text, "B");
        assert_eq!(feed.entries()[1].text, "A");
        assert_eq!(feed.entries()[1].display_age, "2 mins ago");

        let evicted = feed.push("A").expect("oldest entry evicted");
        feed.relabel(&table);
        assert_eq!(evicted.text, "A");
        assert_eq!(feed.entries()[0].text, "A");
        assert_eq!(feed.entries()[0].display_age, JUST_NOW);
        assert_eq!(feed.entries()[1].text, "B");
        assert_eq!(feed.entries()[1].display_age, "2 mins ago");
    }

    #[test]
    #[should_panic(expected = "feed capacity must be greater than 0")]
    fn test_zero_capacity_rejected() {
        let _ = ActivityFeed::new(0);
    }
}
