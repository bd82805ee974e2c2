//! Runtime configuration for the server and maintenance binaries.
//!
//! Values start from built-in defaults and are overridden from the process
//! environment. Only the database URL has no default.

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while assembling configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set to a value that cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-oriented multi-line output.
    #[default]
    Pretty,
    /// Single-line output without source locations.
    Compact,
    /// One JSON object per line.
    Json,
}

impl TryFrom<&str> for LogFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err("expected pretty, compact, or json".to_owned()),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_owned(),
            format: LogFormat::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL (`DATABASE_URL`).
    pub database_url: String,
    /// Address the HTTP server listens on (`IBWT_BIND_ADDRESS`).
    pub bind_address: SocketAddr,
    /// Maximum pooled database connections (`IBWT_DB_POOL_SIZE`).
    pub pool_size: u32,
    /// Logging settings (`IBWT_LOG_LEVEL`, `IBWT_LOG_FORMAT`).
    pub log: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a variable
    /// holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a variable
    /// holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = read("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_address = parse_or(
            read("IBWT_BIND_ADDRESS"),
            "IBWT_BIND_ADDRESS",
            DEFAULT_BIND_ADDRESS,
        )?;

        let pool_size: u32 = parse_or(
            read("IBWT_DB_POOL_SIZE"),
            "IBWT_DB_POOL_SIZE",
            &DEFAULT_POOL_SIZE.to_string(),
        )?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "IBWT_DB_POOL_SIZE",
                value: pool_size.to_string(),
                reason: "pool size must be at least 1".to_owned(),
            });
        }

        let mut log = LoggingConfig::default();
        if let Some(level) = read("IBWT_LOG_LEVEL") {
            log.level = level;
        }
        if let Some(format) = read("IBWT_LOG_FORMAT") {
            log.format = LogFormat::try_from(format.as_str()).map_err(|reason| {
                ConfigError::Invalid {
                    key: "IBWT_LOG_FORMAT",
                    value: format.clone(),
                    reason,
                }
            })?;
        }

        Ok(Self {
            database_url,
            bind_address,
            pool_size,
            log,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_owned());
    raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: err.to_string(),
    })
}
