use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("secret '{0}' not found")]
    NotFound(String),

    #[error("secret store rejected credentials")]
    Unauthorized,

    #[error("secret lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Resolves named secrets from an external secret-management service.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError>;
}
