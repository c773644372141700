//! Navigation and auth glue.
//!
//! Click delegation: a click target carrying a recognized role marker maps to
//! a [`UiEvent`]; anything else is ignored. Dispatching an event mutates the
//! session store and the view only. Navigation loads no content; it is a
//! highlight and heading update.

use tracing::debug;

use crate::error::Result;
use crate::session::Auth;
use crate::view::{NavSurface, View};

/// Role marker for the login button.
pub const ROLE_LOGIN: &str = "login-button";

/// Role marker for the logout button.
pub const ROLE_LOGOUT: &str = "logout-button";

/// Role marker (class) for navigation links.
pub const ROLE_NAV_LINK: &str = "nav-link";

/// A recognized UI interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The login button was clicked.
    Login,
    /// The logout button was clicked.
    Logout,
    /// A navigation link was clicked.
    Navigate {
        /// Section identifier the link points at.
        target: String,
        /// The link's visible label text.
        label: String,
    },
}

/// Classify a click by its role marker.
///
/// Navigation clicks require both a target and a label; anything else about
/// the click is ignored. Returns `None` for unrecognized roles, which callers
/// must treat as "do nothing".
#[must_use]
pub fn classify_click(role: &str, target: Option<&str>, label: Option<&str>) -> Option<UiEvent> {
    match role {
        ROLE_LOGIN => Some(UiEvent::Login),
        ROLE_LOGOUT => Some(UiEvent::Logout),
        ROLE_NAV_LINK => match (target, label) {
            (Some(target), Some(label)) => Some(UiEvent::Navigate {
                target: target.to_string(),
                label: label.to_string(),
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Dispatch a recognized UI event against the view and auth state.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub fn dispatch(event: &UiEvent, view: &mut dyn View, auth: &mut Auth) -> Result<()> {
    match event {
        UiEvent::Login => {
            auth.login()?;
            refresh_auth_state(view, auth)?;
        }
        UiEvent::Logout => {
            auth.logout()?;
            refresh_auth_state(view, auth)?;
        }
        UiEvent::Navigate { target, label } => {
            navigate(view, target, label);
        }
    }
    Ok(())
}

/// Recompute the active navigation item and update the page heading.
///
/// Active state is an exact match of each link's target against the requested
/// section identifier. Absent nav or heading elements degrade to a skip.
pub fn navigate(view: &mut dyn View, target: &str, label: &str) {
    match view.nav() {
        Some(nav) => activate_section(nav, target),
        None => debug!("navigation surface absent, skipping highlight update"),
    }
    match view.heading_slot() {
        Some(heading) => heading.set_text(label),
        None => debug!("heading slot absent, skipping heading update"),
    }
}

/// Mark exactly the links whose target equals `requested` as active.
pub fn activate_section(nav: &mut dyn NavSurface, requested: &str) {
    for target in nav.targets() {
        let active = target == requested;
        nav.set_link_active(&target, active);
    }
}

/// Re-evaluate the displayed authentication state.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub fn refresh_auth_state(view: &mut dyn View, auth: &Auth) -> Result<()> {
    let status = auth.status()?;
    match view.auth_slot() {
        Some(slot) => slot.set_text(&status.to_string()),
        None => debug!("auth slot absent, skipping status update"),
    }
    Ok(())
}
