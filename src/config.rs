//! This module handles the shell's notification settings, including loading
//! and saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_hub::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Make unspecified-duration toasts linger twice as long
//! config.default_duration_ms = Some(10_000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastHub";

/// Auto-expiry applied to notifications that did not specify a duration.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Bound on the diagnostics event ring (see [`crate::diagnostics`]).
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default auto-expiry in milliseconds for toasts that did not specify
    /// one. `0` means unspecified-duration toasts never auto-expire.
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    /// Capacity of the diagnostics event ring.
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: Some(DEFAULT_DURATION_MS),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_CAPACITY),
        }
    }
}

impl Config {
    /// Effective default expiry for notifications that did not specify one.
    ///
    /// Returns `None` when the configured default is `0`, meaning such
    /// notifications stay until explicitly dismissed.
    #[must_use]
    pub fn default_duration(&self) -> Option<Duration> {
        match self.default_duration_ms.unwrap_or(DEFAULT_DURATION_MS) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Effective diagnostics ring capacity.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> usize {
        self.diagnostics_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_CAPACITY)
            .max(1)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
