//! Process configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/bulandipe";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which document store backs the API.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend `{other}` (expected postgres or memory)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `DATABASE_URL`: connection string of the document store.
    pub database_url: String,
    pub store_backend: StoreBackend,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: load(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?,
            database_url: load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            store_backend: load(&lookup, "STORE_BACKEND", "postgres")?,
            db_max_connections: load(
                &lookup,
                "DB_MAX_CONNECTIONS",
                &DEFAULT_DB_MAX_CONNECTIONS.to_string(),
            )?,
        })
    }
}

fn load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}
