//! Configuration management for tallyboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.
//!
//! The catalogs (activities, notifications, aging captions, metric registry)
//! are configuration data, not code: deployments swap them without touching
//! the simulator.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{MetricFormatter, MetricSpec};
use crate::clock::validate_time_format;
use crate::error::{Error, Result};
use crate::session::DEFAULT_TOKEN_KEY;
use crate::view::NavLink;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "tallyboard";

/// Default session store file name.
const SESSION_FILE_NAME: &str = "session.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TALLYBOARD_`)
/// 2. TOML config file at `~/.config/tallyboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Periodic simulator configuration.
    pub simulator: SimulatorConfig,
    /// Notification emitter configuration.
    pub notifier: NotifierConfig,
    /// Display configuration (clock, navigation).
    pub display: DisplayConfig,
    /// Session store configuration.
    pub session: SessionConfig,
    /// Catalog contents.
    pub catalogs: CatalogConfig,
}

/// Periodic simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Interval between simulator ticks in milliseconds.
    pub tick_interval_ms: u64,
    /// Maximum number of entries in the activity feed.
    pub feed_capacity: usize,
}

/// Notification emitter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Interval between notification ticks in milliseconds.
    pub interval_ms: u64,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Interval between clock updates in milliseconds.
    pub clock_interval_ms: u64,
    /// chrono format string for the clock display.
    pub time_format: String,
    /// Navigation links, in display order.
    pub nav_links: Vec<NavLink>,
}

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path to the session store file.
    /// Defaults to `~/.local/share/tallyboard/session.db`
    pub store_path: Option<PathBuf>,
    /// Key the session token is stored under.
    pub token_key: String,
}

/// Catalog contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Activity descriptions sampled by the simulator.
    pub activities: Vec<String>,
    /// Event strings sampled by the notification emitter.
    pub notifications: Vec<String>,
    /// Ordered age captions applied to non-head feed entries.
    pub aging_captions: Vec<String>,
    /// Metric registry: view slot plus formatter.
    pub metrics: Vec<MetricSpec>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30_000,
            feed_capacity: 5,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval_ms: 45_000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clock_interval_ms: 1_000,
            time_format: "%H:%M:%S".to_string(),
            nav_links: default_nav_links(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: None, // Will be resolved to default at runtime
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            activities: default_activities(),
            notifications: default_notifications(),
            aging_captions: default_aging_captions(),
            metrics: default_metrics(),
        }
    }
}

/// Default activity descriptions.
fn default_activities() -> Vec<String> {
    [
        "Employee checked in",
        "Attendance record synced",
        "New device came online",
        "Daily report generated",
        "Late arrival flagged",
    ]
    .map(String::from)
    .to_vec()
}

/// Default notification events.
fn default_notifications() -> Vec<String> {
    [
        "Attendance threshold reached",
        "Device heartbeat missed",
        "Sync completed",
        "New enrollment pending",
    ]
    .map(String::from)
    .to_vec()
}

/// Default ordered aging captions.
fn default_aging_captions() -> Vec<String> {
    ["2 mins ago", "5 mins ago", "12 mins ago", "25 mins ago"]
        .map(String::from)
        .to_vec()
}

/// Default metric registry.
fn default_metrics() -> Vec<MetricSpec> {
    vec![
        MetricSpec::new("present-today", MetricFormatter::Ratio { den: 50 }),
        MetricSpec::new("attendance-rate", MetricFormatter::Percent { min: 70, max: 99 }),
        MetricSpec::new("devices-online", MetricFormatter::Count { min: 3, max: 8 }),
    ]
}

/// Default navigation links.
fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("#dashboard", "Dashboard"),
        NavLink::new("#reports", "Reports"),
        NavLink::new("#devices", "Devices"),
        NavLink::new("#settings", "Settings"),
    ]
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `TALLYBOARD_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("TALLYBOARD_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// Empty catalogs and zero intervals are configuration errors raised
    /// here, once, rather than per tick.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.simulator.tick_interval_ms == 0 {
            return Err(Error::config_validation(
                "simulator.tick_interval_ms must be greater than 0",
            ));
        }
        if self.notifier.interval_ms == 0 {
            return Err(Error::config_validation(
                "notifier.interval_ms must be greater than 0",
            ));
        }
        if self.display.clock_interval_ms == 0 {
            return Err(Error::config_validation(
                "display.clock_interval_ms must be greater than 0",
            ));
        }
        if self.simulator.feed_capacity == 0 {
            return Err(Error::config_validation(
                "simulator.feed_capacity must be greater than 0",
            ));
        }

        if self.catalogs.activities.is_empty() {
            return Err(Error::empty_catalog("activities"));
        }
        if self.catalogs.notifications.is_empty() {
            return Err(Error::empty_catalog("notifications"));
        }
        if self.catalogs.metrics.is_empty() {
            return Err(Error::empty_catalog("metrics"));
        }
        for spec in &self.catalogs.metrics {
            spec.formatter.validate()?;
        }

        validate_time_format(&self.display.time_format)?;

        Ok(())
    }

    /// Get the session store path, resolving defaults if not set.
    #[must_use]
    pub fn session_store_path(&self) -> PathBuf {
        self.session
            .store_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(SESSION_FILE_NAME))
    }

    /// Get the simulator tick interval as a Duration.
    #[must_use]
    pub fn simulator_interval(&self) -> Duration {
        Duration::from_millis(self.simulator.tick_interval_ms)
    }

    /// Get the notifier interval as a Duration.
    #[must_use]
    pub fn notifier_interval(&self) -> Duration {
        Duration::from_millis(self.notifier.interval_ms)
    }

    /// Get the clock interval as a Duration.
    #[must_use]
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.display.clock_interval_ms)
    }
}
