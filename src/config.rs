use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Logical name of the table every calculation is appended to.
pub const TABLE_NAME: &str = "ROICalculations";

/// Secret looked up in the vault when no direct connection string is given.
pub const DEFAULT_SECRET_NAME: &str = "TableStorageConnectionString";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ROI_ROUTE: &str = "/api/roi";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { key, reason: reason.into() }
    }
}

/// Shape of a successful ROI response for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

impl ResponseFormat {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(ResponseFormat::Text),
            "json" => Ok(ResponseFormat::Json),
            other => Err(ConfigError::invalid(
                "RESPONSE_FORMAT",
                format!("'{}' (expected 'text' or 'json')", other),
            )),
        }
    }
}

/// Whether a failed write fails the calculation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    Disabled,
    /// Store failures are logged and the calculation is still returned.
    BestEffort,
    /// Store failures turn the response into a 500.
    Required,
}

impl PersistenceMode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "disabled" | "off" | "none" => Ok(PersistenceMode::Disabled),
            "best_effort" => Ok(PersistenceMode::BestEffort),
            "required" => Ok(PersistenceMode::Required),
            other => Err(ConfigError::invalid(
                "PERSISTENCE_MODE",
                format!("'{}' (expected 'disabled', 'best_effort' or 'required')", other),
            )),
        }
    }

    pub fn is_enabled(self) -> bool {
        self != PersistenceMode::Disabled
    }
}

/// Where the record store connection string comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    Direct(String),
    SecretStore {
        vault_url: Url,
        secret_name: String,
        access_token: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub roi_route: String,
    pub response_format: ResponseFormat,
    pub persistence: PersistenceMode,
    pub connection: Option<ConnectionSource>,
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            roi_route: DEFAULT_ROI_ROUTE.to_string(),
            response_format: ResponseFormat::Text,
            persistence: PersistenceMode::BestEffort,
            connection: None,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = get("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| ConfigError::invalid("LISTEN_ADDR", format!("{}", e)))?;

        let roi_route = get("ROI_ROUTE").unwrap_or_else(|| DEFAULT_ROI_ROUTE.to_string());
        if !roi_route.starts_with('/') || roi_route.len() < 2 {
            return Err(ConfigError::invalid("ROI_ROUTE", "must be an absolute path like /api/roi"));
        }
        let roi_route = roi_route.trim_end_matches('/').to_string();

        let response_format = match get("RESPONSE_FORMAT") {
            Some(raw) => ResponseFormat::parse(&raw)?,
            None => ResponseFormat::Text,
        };

        let mut persistence = match get("PERSISTENCE_MODE") {
            Some(raw) => PersistenceMode::parse(&raw)?,
            None => PersistenceMode::BestEffort,
        };

        let connection = if let Some(conn) = get("STORAGE_CONNECTION_STRING") {
            Some(ConnectionSource::Direct(conn))
        } else if let Some(raw_url) = get("KEY_VAULT_URL") {
            let vault_url = Url::parse(&raw_url)
                .map_err(|e| ConfigError::invalid("KEY_VAULT_URL", e.to_string()))?;
            Some(ConnectionSource::SecretStore {
                vault_url,
                secret_name: get("KEY_VAULT_SECRET_NAME")
                    .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string()),
                access_token: get("KEY_VAULT_ACCESS_TOKEN"),
            })
        } else {
            None
        };

        if connection.is_none() && persistence.is_enabled() {
            tracing::warn!(
                "No STORAGE_CONNECTION_STRING or KEY_VAULT_URL configured; persistence disabled"
            );
            persistence = PersistenceMode::Disabled;
        }

        let timeout_secs = match get("STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("STORE_TIMEOUT_SECS", e.to_string()))?,
            None => DEFAULT_STORE_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::invalid("STORE_TIMEOUT_SECS", "must be greater than zero"));
        }

        Ok(Self {
            listen_addr,
            roi_route,
            response_format,
            persistence,
            connection,
            store_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
