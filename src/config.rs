//! Environment-driven application configuration.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (default: `postgres://localhost/taskdb`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default: `5`)
//! - `DATABASE_CONNECT_TIMEOUT_SECS`: pool checkout timeout (default: `30`)
//! - `HOST`: server host address (default: `0.0.0.0`)
//! - `PORT`: server port (default: `8000`)
//! - `LOG_LEVEL`: tracing level used when `RUST_LOG` is unset (default: `info`)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::task::adapters::postgres::PoolSettings;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/taskdb";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `STORAGE_MODE` holds an unrecognized value.
    #[error("invalid STORAGE_MODE '{0}', expected 'postgres' or 'in_memory'")]
    InvalidStorageMode(String),

    /// A numeric variable could not be parsed or is out of range.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidNumber {
        /// Environment variable name.
        variable: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// `LOG_LEVEL` is not a known tracing level.
    #[error("invalid LOG_LEVEL '{0}', expected one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// `PostgreSQL` via a pooled Diesel connection.
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::InMemory => f.write_str("in_memory"),
        }
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// Pool checkout timeout.
    pub connect_timeout: Duration,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Default tracing level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or(defaults.storage_mode);
        let pool_size = parse_positive::<u32>(read("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE")?
            .unwrap_or(defaults.pool_size);
        let connect_timeout = parse_positive::<u64>(
            read("DATABASE_CONNECT_TIMEOUT_SECS"),
            "DATABASE_CONNECT_TIMEOUT_SECS",
        )?
        .map_or(defaults.connect_timeout, Duration::from_secs);
        let port = read("PORT")
            .map(|value| parse_number::<u16>(value, "PORT"))
            .transpose()?
            .unwrap_or(defaults.port);
        let log_level = read("LOG_LEVEL")
            .map(|value| validate_log_level(&value))
            .transpose()?
            .unwrap_or(defaults.log_level);

        Ok(Self {
            storage_mode,
            database_url: read("DATABASE_URL").unwrap_or(defaults.database_url),
            pool_size,
            connect_timeout,
            host: read("HOST").unwrap_or(defaults.host),
            port,
            log_level,
        })
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the connection pool settings.
    #[must_use]
    pub const fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_size: self.pool_size,
            connection_timeout: self.connect_timeout,
        }
    }
}

fn parse_number<T>(value: String, variable: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|err| ConfigError::InvalidNumber {
            variable,
            reason: err.to_string(),
            value,
        })
}

fn parse_positive<T>(value: Option<String>, variable: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: fmt::Display,
{
    let Some(raw) = value else {
        return Ok(None);
    };
    let parsed = parse_number::<T>(raw.clone(), variable)?;
    if parsed == T::default() {
        return Err(ConfigError::InvalidNumber {
            variable,
            value: raw,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(Some(parsed))
}

fn validate_log_level(value: &str) -> Result<String, ConfigError> {
    let level = value.to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ConfigError::InvalidLogLevel(value.to_owned()))
    }
}
