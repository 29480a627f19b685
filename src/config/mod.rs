//! Configuration management.
//!
//! Configuration is read from a TOML file and can be overridden with
//! environment variables prefixed with `PHEED`, using `__` between the
//! section and the key.
//!
//! # Configuration File Format
//!
//! ```toml
//! [http]
//! timeout_seconds = 30
//! connect_timeout_seconds = 10
//! user_agent = "pheed/0.1.0"
//!
//! [aps]
//! base_url = "https://journals.aps.org"
//! default_journal = "PRL"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```
//!
//! # Environment Overrides
//!
//! ```bash
//! export PHEED__HTTP__TIMEOUT_SECONDS=60
//! export PHEED__APS__DEFAULT_JOURNAL=PRB
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "pheed.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// APS source settings
    #[serde(default)]
    pub aps: ApsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// APS source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApsConfig {
    /// Root of the APS journals site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Journal used when none is given on the command line
    #[serde(default = "default_journal")]
    pub default_journal: String,
}

impl Default for ApsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_journal: default_journal(),
        }
    }
}

fn default_base_url() -> String {
    crate::sources::aps::APS_BASE_URL.to_string()
}

fn default_journal() -> String {
    "PRL".to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Get the configuration from environment overrides and defaults
pub fn get_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(environment())
        .build()?;
    Ok(settings.try_deserialize()?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PHEED")
        .separator("__")
        .try_parsing(true)
}

/// Find a configuration file in the default locations
///
/// Looks for `./pheed.toml`, then `<config dir>/pheed/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir())
}

fn find_config_file_in(working_dir: &Path, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    let local = working_dir.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    config_dir
        .map(|dir| dir.join("pheed").join("config.toml"))
        .filter(|path| path.is_file())
}
