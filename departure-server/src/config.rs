//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::library::{DepartureOrder, ParseOrderError};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("invalid value for DEPARTURE_ORDER: {0}")]
    DepartureOrder(#[from] ParseOrderError),
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Rejseplanen REST base URL; `None` serves the bundled fixtures
    pub base_url: Option<String>,
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Root directory for static files
    pub static_dir: PathBuf,
    /// Order of returned departures
    pub departure_order: DepartureOrder,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `REJSEPLANEN_BASE_URL` | unset (stub provider) |
    /// | `BIND_ADDR` | `127.0.0.1:8000` |
    /// | `STATIC_DIR` | `static` |
    /// | `DEPARTURE_ORDER` | `provider` (or `chronological`) |
    /// | `REQUEST_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let departure_order = match get("DEPARTURE_ORDER") {
            Some(value) => value.parse::<DepartureOrder>()?,
            None => DepartureOrder::Provider,
        };

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                message: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: get("REJSEPLANEN_BASE_URL"),
            bind_addr,
            static_dir: get("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            departure_order,
            timeout_secs,
        })
    }
}
