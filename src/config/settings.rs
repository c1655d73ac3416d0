use serde::Deserialize;

use crate::utils::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STORE_PATH, DEFAULT_STORE_PREFIX};

/// ================================
/// Full configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Token store
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// YAML file backing the key-value store
    #[serde(default = "default_store_path")]
    pub path: String,
    /// first segment of every stored key: `<prefix>.<provider>.<field>`
    #[serde(default = "default_store_prefix")]
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            prefix: default_store_prefix(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::default())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

fn default_store_prefix() -> String {
    DEFAULT_STORE_PREFIX.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
