//! # Pool Sizing Configuration
//!
//! Sizing data lives in external TOML files, loaded once at startup. A config
//! file carries one `[pools.<name>]` section per pool; the application maps
//! section names to entity types when it builds its registry.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PoolError, PoolResult};

/// Sizing settings for a single pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Number of instances constructed up front into the free stack.
    pub initial_size: usize,
    /// Optional hard cap on the total slot count. `None` means the pool
    /// grows without bound, which is the reference behavior.
    pub max_size: Option<usize>,
}

/// Named pool sizing sections parsed from a TOML file.
///
/// # Example
///
/// ```toml
/// [pools.projectile]
/// initial_size = 64
/// max_size = 1024
///
/// [pools.impact_marker]
/// initial_size = 16
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PoolsConfig {
    /// Sizing sections keyed by pool name.
    #[serde(default)]
    pub pools: HashMap<String, PoolSettings>,
}

impl PoolsConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the file cannot be read or
    /// does not parse as valid configuration.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> PoolResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PoolError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the text does not parse.
    pub fn from_toml_str(raw: &str) -> PoolResult<Self> {
        toml::from_str(raw).map_err(|e| PoolError::InvalidConfig(e.to_string()))
    }

    /// Looks up the settings for a named pool.
    ///
    /// # Arguments
    ///
    /// * `name` - The `[pools.<name>]` section name
    #[must_use]
    pub fn settings(&self, name: &str) -> Option<&PoolSettings> {
        self.pools.get(name)
    }

    /// Looks up the settings for a named pool, falling back to defaults
    /// (no pre-warm, unbounded growth) if the section is absent.
    ///
    /// # Arguments
    ///
    /// * `name` - The `[pools.<name>]` section name
    #[must_use]
    pub fn settings_or_default(&self, name: &str) -> PoolSettings {
        self.pools.get(name).copied().unwrap_or_default()
    }
}
