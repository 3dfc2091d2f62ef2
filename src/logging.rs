use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("LOKI_ENABLED is true but LOKI_URL is not set")]
    MissingLokiUrl,
    #[error("invalid LOKI_URL: {0}")]
    InvalidLokiUrl(#[from] url::ParseError),
    #[cfg(feature = "loki")]
    #[error("loki layer: {0}")]
    Loki(#[from] tracing_loki::Error),
    #[error("subscriber already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_url: Option<url::Url>,
    pub service_name: String,
    pub environment: String,
    pub filter: String,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loki is only wired up when `LOKI_ENABLED=true`; a URL on its own is
    /// ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let loki_enabled = lookup("LOKI_ENABLED")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let loki_url = if loki_enabled {
            let raw = lookup("LOKI_URL").ok_or(LoggingError::MissingLokiUrl)?;
            Some(url::Url::parse(raw.trim())?)
        } else {
            None
        };

        Ok(Self {
            loki_url,
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "roi-calculator".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        })
    }

    /// A malformed `RUST_LOG` falls back to `info` instead of aborting startup.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    #[cfg(feature = "loki")]
    if let Some(loki_url) = &config.loki_url {
        let (loki_layer, task) = tracing_loki::builder()
            .label("service", &config.service_name)?
            .label("environment", &config.environment)?
            .build_url(loki_url.clone())?;

        tracing_subscriber::registry()
            .with(config.env_filter())
            .with(tracing_subscriber::fmt::layer())
            .with(loki_layer)
            .try_init()?;

        // Ships buffered events to Loki in the background.
        tokio::spawn(task);
        tracing::info!(service = %config.service_name, "Logging to console and Loki at {}", loki_url);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    if config.loki_url.is_some() {
        tracing::warn!("LOKI_URL set but this build has no `loki` feature; console only");
    }
    tracing::info!(service = %config.service_name, env = %config.environment, "Console logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn logging_from(pairs: &[(&str, &str)]) -> Result<LoggingConfig, LoggingError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggingConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_console_only() {
        let config = logging_from(&[]).unwrap();
        assert!(config.loki_url.is_none());
        assert_eq!(config.service_name, "roi-calculator");
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn test_loki_requires_a_valid_url() {
        assert!(matches!(
            logging_from(&[("LOKI_ENABLED", "true")]),
            Err(LoggingError::MissingLokiUrl)
        ));
        assert!(matches!(
            logging_from(&[("LOKI_ENABLED", "true"), ("LOKI_URL", "not a url")]),
            Err(LoggingError::InvalidLokiUrl(_))
        ));

        let config =
            logging_from(&[("LOKI_ENABLED", "TRUE"), ("LOKI_URL", "http://localhost:3100")]).unwrap();
        assert_eq!(config.loki_url.unwrap().port(), Some(3100));
    }

    #[test]
    fn test_loki_url_ignored_when_disabled() {
        let config = logging_from(&[("LOKI_URL", "http://localhost:3100")]).unwrap();
        assert!(config.loki_url.is_none());
    }

    #[test]
    fn test_bad_filter_falls_back_to_info() {
        let config = logging_from(&[("RUST_LOG", "roi=notalevel")]).unwrap();
        assert_eq!(
            config.env_filter().max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::INFO)
        );
    }
}
