use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::ConnectionSource;
use crate::external::key_vault::KeyVaultClient;
use crate::external::secret_provider::{SecretError, SecretProvider};

enum Source {
    Direct(String),
    Secret {
        name: String,
        provider: Arc<dyn SecretProvider>,
    },
}

/// Resolves the record store connection string.
///
/// A secret-backed value is fetched once and cached for the life of the
/// process. `invalidate` drops the cached value so the next `resolve`
/// fetches it again, e.g. after the store rejects the credentials.
pub struct ConnectionResolver {
    source: Source,
    cached: RwLock<Option<String>>,
    timeout: Duration,
}

impl ConnectionResolver {
    pub fn from_source(source: &ConnectionSource, timeout: Duration) -> Result<Self, SecretError> {
        let source = match source {
            ConnectionSource::Direct(conn) => Source::Direct(conn.clone()),
            ConnectionSource::SecretStore { vault_url, secret_name, access_token } => {
                let client = KeyVaultClient::new(vault_url.clone(), access_token.clone(), timeout)?;
                Source::Secret {
                    name: secret_name.clone(),
                    provider: Arc::new(client),
                }
            }
        };

        Ok(Self {
            source,
            cached: RwLock::new(None),
            timeout,
        })
    }

    pub fn from_secret_provider(
        secret_name: impl Into<String>,
        provider: Arc<dyn SecretProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            source: Source::Secret {
                name: secret_name.into(),
                provider,
            },
            cached: RwLock::new(None),
            timeout,
        }
    }

    pub async fn resolve(&self) -> Result<String, SecretError> {
        let (name, provider) = match &self.source {
            Source::Direct(conn) => return Ok(conn.clone()),
            Source::Secret { name, provider } => (name, provider),
        };

        if let Some(conn) = self.cached.read().await.as_ref() {
            return Ok(conn.clone());
        }

        // Holding the write lock across the fetch keeps concurrent first
        // requests from each hitting the vault.
        let mut cached = self.cached.write().await;
        if let Some(conn) = cached.as_ref() {
            return Ok(conn.clone());
        }

        let conn = tokio::time::timeout(self.timeout, provider.get_secret(name))
            .await
            .map_err(|_| SecretError::Timeout(self.timeout))??;

        info!("Resolved record store connection string from secret '{}'", name);
        *cached = Some(conn.clone());
        Ok(conn)
    }

    pub async fn invalidate(&self) {
        if matches!(self.source, Source::Secret { .. }) {
            info!("Invalidating cached record store connection string");
            *self.cached.write().await = None;
        }
    }
}
