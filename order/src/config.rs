//! Configuration management for the box office.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::session::QuantityPolicy;
use crate::types::QUANTITY_HINT_MAX;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default chrono format for the concert date line ("Thursday, June 26")
pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file; the bundled bands are used when unset
    pub catalog_path: Option<PathBuf>,
    /// Order form configuration
    pub order: OrderConfig,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

/// Order form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Hard limit on tickets per type (default: none)
    pub quantity_cap: Option<u32>,
    /// Maximum advertised on each quantity input (default: 99)
    pub quantity_hint_max: u32,
    /// chrono format for the concert date (default: `%A, %B %-d`)
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            catalog_path: lookup("BOX_OFFICE_CATALOG_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            order: OrderConfig {
                quantity_cap: lookup("BOX_OFFICE_QUANTITY_CAP").and_then(|s| s.trim().parse().ok()),
                quantity_hint_max: lookup("BOX_OFFICE_QUANTITY_HINT_MAX")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(QUANTITY_HINT_MAX),
                date_format: lookup("BOX_OFFICE_LOCALE_DATE_FORMAT")
                    .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl OrderConfig {
    /// Quantity policy enforced by the session
    #[must_use]
    pub const fn quantity_policy(&self) -> QuantityPolicy {
        QuantityPolicy::from_cap(self.quantity_cap)
    }
}
