//! `tallyboard` - Attendance dashboard core with simulated live updates
//!
//! This library provides the dashboard core: a periodic metric/activity
//! simulator, a notification emitter, a live clock, and navigation/auth glue,
//! all rendered through an injected view contract.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod nav;
pub mod notify;
pub mod rng;
pub mod session;
pub mod simulator;
pub mod term;
pub mod ticker;
pub mod view;

pub use catalog::{Catalog, MetricFormatter, MetricSpec};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{ActivityEntry, ActivityFeed};
pub use logging::init_logging;
pub use notify::{NotificationEmitter, Reporter};
pub use session::{Auth, AuthStatus, SessionStore};
pub use simulator::PeriodicSimulator;
pub use ticker::{Dashboard, Ticker, TickerHandle};
pub use view::View;
