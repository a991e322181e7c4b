//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working database, recreated by the walkthrough.
    pub database: PathBuf,
    /// Second database inspected at the end of the walkthrough.
    pub inspect: InspectConfig,
}

/// Inspection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Pre-existing database file to inspect.
    pub database: PathBuf,
    /// Table to aggregate.
    pub table: Option<String>,
    /// Column to group the table by.
    pub group_by: Option<String>,
    /// Column to sum within each group.
    pub sum: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("demo.db"),
            inspect: InspectConfig::default(),
        }
    }
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("eia.db"),
            table: None,
            group_by: None,
            sum: None,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coursedb")
}

/// Path of the configuration file.
pub fn config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = config_path();

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e),
            },
            Err(e) => tracing::warn!("Cannot read config {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}
