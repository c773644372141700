//! Terminal rendering primitives for tallyboard.
//!
//! Plain-stdout building blocks the dashboard core composes into its
//! rendered view: labeled value slots, a titled list, and a link bar.
//! Every write is echoed to stdout and retained, so tests can assert on
//! what was rendered.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

/// A labeled slot holding one short display value.
///
/// Each update prints the label and the new value on its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSlot {
    label: String,
    value: String,
}

impl TermSlot {
    /// Create an empty slot with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
        }
    }

    /// The slot's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The slot's current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Overwrite the value and echo the update to stdout.
    pub fn update(&mut self, value: &str) {
        self.value = value.to_string();
        println!("{:>18}  {}", self.label, self.value);
    }
}

/// A titled list rendered as a block of indented lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermList {
    title: String,
    lines: Vec<String>,
}

impl TermList {
    /// Create an empty list with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// The list's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The most recently rendered lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the list contents and echo the block to stdout.
    pub fn render_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        println!("{}:", self.title);
        for line in &self.lines {
            println!("  - {line}");
        }
    }
}

/// A bar of links, at most one of which is marked active at a time by the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermLinkBar {
    links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Link {
    target: String,
    label: String,
    active: bool,
}

impl TermLinkBar {
    /// Create an empty link bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link, initially inactive.
    pub fn push_link(&mut self, target: impl Into<String>, label: impl Into<String>) {
        self.links.push(Link {
            target: target.into(),
            label: label.into(),
            active: false,
        });
    }

    /// Targets of all links, in display order.
    #[must_use]
    pub fn targets(&self) -> Vec<String> {
        self.links.iter().map(|link| link.target.clone()).collect()
    }

    /// Whether the link with the given target is active.
    #[must_use]
    pub fn is_active(&self, target: &str) -> bool {
        self.links
            .iter()
            .any(|link| link.target == target && link.active)
    }

    /// Set the active flag of the link with the given target.
    ///
    /// Unknown targets are ignored. Activating a link echoes it to stdout.
    pub fn set_active(&mut self, target: &str, active: bool) {
        for link in &mut self.links {
            if link.target == target {
                if active && !link.active {
                    println!("=> {}", link.label);
                }
                link.active = active;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let slot = TermSlot::new("Present today");
        assert_eq!(slot.label(), "Present today");
        assert_eq!(slot.value(), "");
    }

    #[test]
    fn test_slot_update_overwrites() {
        let mut slot = TermSlot::new("Attendance rate");
        slot.update("84%");
        assert_eq!(slot.value(), "84%");

        slot.update("91%");
        assert_eq!(slot.value(), "91%");
    }

    #[test]
    fn test_list_render_replaces_lines() {
        let mut list = TermList::new("Recent activity");
        list.render_lines(vec!["first".to_string()]);
        list.render_lines(vec!["second".to_string(), "first".to_string()]);

        assert_eq!(list.lines().len(), 2);
        assert_eq!(list.lines()[0], "second");
        assert_eq!(list.title(), "Recent activity");
    }

    #[test]
    fn test_link_bar_targets_in_order() {
        let mut bar = TermLinkBar::new();
        bar.push_link("#dashboard", "Dashboard");
        bar.push_link("#reports", "Reports");

        assert_eq!(bar.targets(), vec!["#dashboard", "#reports"]);
    }

    #[test]
    fn test_link_bar_activation() {
        let mut bar = TermLinkBar::new();
        bar.push_link("#dashboard", "Dashboard");
        bar.push_link("#reports", "Reports");

        bar.set_active("#reports", true);
        assert!(bar.is_active("#reports"));
        assert!(!bar.is_active("#dashboard"));

        bar.set_active("#reports", false);
        assert!(!bar.is_active("#reports"));
    }

    #[test]
    fn test_link_bar_unknown_target_ignored() {
        let mut bar = TermLinkBar::new();
        bar.push_link("#dashboard", "Dashboard");

        bar.set_active("#missing", true);
        assert!(!bar.is_active("#missing"));
        assert!(!bar.is_active("#dashboard"));
    }
}
