use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::external::secret_provider::{SecretError, SecretProvider};

const API_VERSION: &str = "7.4";

/// Reads secrets over the Key Vault REST API
/// (`GET {vault}/secrets/{name}?api-version=7.4`).
pub struct KeyVaultClient {
    client: reqwest::Client,
    vault_url: Url,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SecretBundle {
    value: Option<String>,
}

impl KeyVaultClient {
    pub fn new(
        vault_url: Url,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SecretError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SecretError::Network(e.to_string()))?;

        Ok(Self {
            client,
            vault_url,
            access_token,
        })
    }

    fn secret_url(&self, name: &str) -> String {
        format!(
            "{}/secrets/{}",
            self.vault_url.as_str().trim_end_matches('/'),
            name
        )
    }
}

#[async_trait]
impl SecretProvider for KeyVaultClient {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        let url = self.secret_url(name);
        debug!("Fetching secret '{}' from {}", name, self.vault_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("api-version", API_VERSION)]);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SecretError::Network(e.to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Key Vault rejected credentials for secret '{}'", name);
                return Err(SecretError::Unauthorized);
            }
            StatusCode::NOT_FOUND => return Err(SecretError::NotFound(name.to_string())),
            status if !status.is_success() => {
                return Err(SecretError::BadResponse(format!(
                    "Key Vault returned status: {}",
                    status
                )));
            }
            _ => {}
        }

        let bundle: SecretBundle = resp
            .json()
            .await
            .map_err(|e| SecretError::Parse(e.to_string()))?;

        bundle
            .value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SecretError::Parse(format!("secret '{}' has no value", name)))
    }
}
