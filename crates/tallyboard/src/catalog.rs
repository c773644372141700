//! Catalogs and metric formatters.
//!
//! A catalog is a fixed, ordered list of candidate strings sampled uniformly
//! at random per tick. Catalogs must be non-empty; emptiness is a
//! configuration error raised once at construction, never per tick.
//!
//! The metric registry pairs a view slot identifier with a formatter that
//! produces a short display string (for example `"45/50"` or `"84%"`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rng::RandomSource;

/// A non-empty, ordered list of candidate strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    entries: Vec<String>,
}

impl Catalog {
    /// Create a catalog from the given entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] if `entries` is empty.
    pub fn new(name: impl Into<String>, entries: Vec<String>) -> Result<Self> {
        let name = name.into();
        if entries.is_empty() {
            return Err(Error::empty_catalog(name));
        }
        Ok(Self { name, entries })
    }

    /// The catalog's name, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty entry lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the catalog contains the given string.
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Pick one entry uniformly at random.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> &str {
        &self.entries[rng.pick_index(self.entries.len())]
    }
}

/// How a metric slot's display string is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricFormatter {
    /// A fraction of a fixed denominator, rendered as `"n/den"`.
    Ratio {
        /// The fixed denominator.
        den: u32,
    },
    /// A percentage in `min..=max`, rendered as `"n%"`.
    Percent {
        /// Lower bound (inclusive).
        min: u32,
        /// Upper bound (inclusive).
        max: u32,
    },
    /// A bare count in `min..=max`.
    Count {
        /// Lower bound (inclusive).
        min: u32,
        /// Upper bound (inclusive).
        max: u32,
    },
}

impl MetricFormatter {
    /// Produce a fresh display string using the given random source.
    pub fn format(&self, rng: &mut dyn RandomSource) -> String {
        match self {
            Self::Ratio { den } => format!("{}/{den}", rng.pick_u32(0, *den)),
            Self::Percent { min, max } => format!("{}%", rng.pick_u32(*min, *max)),
            Self::Count { min, max } => rng.pick_u32(*min, *max).to_string(),
        }
    }

    /// Validate the formatter's parameters.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero denominator or an inverted range.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Ratio { den } => {
                if *den == 0 {
                    return Err(Error::config_validation(
                        "ratio metric denominator must be greater than 0",
                    ));
                }
            }
            Self::Percent { min, max } | Self::Count { min, max } => {
                if min > max {
                    return Err(Error::config_validation(format!(
                        "metric range min ({min}) cannot be greater than max ({max})"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A registry entry pairing a view slot identifier with its formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Identifier of the view slot this metric writes to.
    pub slot: String,
    /// Formatter producing the display string.
    pub formatter: MetricFormatter,
}

impl MetricSpec {
    /// Create a new metric spec.
    #[must_use]
    pub fn new(slot: impl Into<String>, formatter: MetricFormatter) -> Self {
        Self {
            slot: slot.into(),
            formatter,
        }
    }
}
