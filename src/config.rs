//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug run mode: verbose logging and request tracing
    #[serde(default)]
    pub debug: bool,

    /// Maximum concurrent WebSocket sessions
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_connections() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            max_connections: default_max_connections(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Sample data generation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// RNG seed; the same seed always yields the same tables
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// First day of the time series
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Number of days in the time series
    #[serde(default = "default_periods")]
    pub periods: usize,

    /// Number of rows in the box-plot table
    #[serde(default = "default_box_samples")]
    pub box_samples: usize,
}

fn default_seed() -> u64 {
    42
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn default_periods() -> usize {
    365
}

fn default_box_samples() -> usize {
    200
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            start_date: default_start_date(),
            periods: default_periods(),
            box_samples: default_box_samples(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("graphboard").join("config.toml")),
            Some(PathBuf::from("/etc/graphboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GRAPHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("GRAPHBOARD_PORT") {
            self.server.port = port;
        }
        if let Ok(debug) = std::env::var("GRAPHBOARD_DEBUG") {
            self.server.debug = parse_flag(&debug);
        }

        if let Some(seed) = env_parse("GRAPHBOARD_SEED") {
            self.data.seed = seed;
        }

        if let Ok(level) = std::env::var("GRAPHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GRAPHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Parse an env var; an unparsable value is logged and ignored
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %value, "Ignoring unparsable environment override");
            None
        }
    }
}

/// Interpret an env flag; anything but "false"/"0"/"" counts as set
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Graphboard Configuration
#
# Environment variables override these settings:
# - GRAPHBOARD_HOST
# - GRAPHBOARD_PORT
# - GRAPHBOARD_DEBUG
# - GRAPHBOARD_SEED
# - GRAPHBOARD_LOG_LEVEL
# - GRAPHBOARD_LOG_FORMAT

[server]
# Address to bind to
host = "127.0.0.1"

# Port to serve the dashboard on
port = 8050

# Debug mode: verbose logging and request tracing
debug = false

# Maximum concurrent WebSocket sessions
max_connections = 1000

[data]
# Seed for the sample data generator
seed = 42

# First day of the time series
start_date = "2023-01-01"

# Number of days in the time series
periods = 365

# Number of samples in the box-plot table
box_samples = 200

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
