use crate::quote::DEFAULT_CAPACITY;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Port used when neither `QUOTADAY_PORT` nor `--port` is provided.
pub const DEFAULT_PORT: u16 = 80;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Quotaday server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// Maximum number of quotations held by the quote book.
    pub capacity: usize,
    /// Whether the quote book starts with the built-in example quotations.
    pub seed_examples: bool,
    /// Optional file receiving a copy of the log output.
    pub log_file: Option<PathBuf>,
}

/// Values supplied on the command line that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Listening port override.
    pub port: Option<u16>,
    /// Quote book capacity override.
    pub capacity: Option<usize>,
    /// Disable example seeding when `true`.
    pub no_examples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            capacity: DEFAULT_CAPACITY,
            seed_examples: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            port: load("QUOTADAY_PORT")
                .map(|value| parse_value("QUOTADAY_PORT", &value))
                .transpose()?
                .unwrap_or(defaults.port),
            capacity: load("QUOTADAY_CAPACITY")
                .map(|value| parse_capacity("QUOTADAY_CAPACITY", &value))
                .transpose()?
                .unwrap_or(defaults.capacity),
            seed_examples: load("QUOTADAY_SEED_EXAMPLES")
                .map(|value| parse_flag("QUOTADAY_SEED_EXAMPLES", &value))
                .transpose()?
                .unwrap_or(defaults.seed_examples),
            log_file: load("QUOTADAY_LOG_FILE").map(PathBuf::from),
        })
    }

    /// Apply command-line overrides on top of the environment-derived values.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(capacity) = overrides.capacity {
            if capacity == 0 {
                return Err(ConfigError::InvalidValue("--capacity".into()));
            }
            self.capacity = capacity;
        }
        if overrides.no_examples {
            self.seed_examples = false;
        }
        Ok(self)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn parse_capacity(key: &str, value: &str) -> Result<usize, ConfigError> {
    match parse_value(key, value)? {
        0 => Err(ConfigError::InvalidValue(key.to_string())),
        capacity => Ok(capacity),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from `.env` and the environment, apply overrides, and install it in the
/// global cache.
///
/// A configuration installed earlier in the process is kept.
pub fn init_config(overrides: &Overrides) -> Result<(), ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?.with_overrides(overrides)?;
    if CONFIG.set(config).is_err() {
        tracing::debug!("Configuration already initialized");
    }
    Ok(())
}
