use anyhow::Context;

use super::constants::{self, headers, GRAPH_DEFAULT_SCOPE};
use super::models::{AccessToken, TokenResponse};
use crate::config::{Credentials, GraphConfig};

/// Exchanges application credentials for a Graph access token
pub struct TokenProvider {
    http_client: reqwest::Client,
    login_base_url: String,
}

impl TokenProvider {
    pub fn new(config: &GraphConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            login_base_url: config.login_base_url.clone(),
        }
    }

    /// Run the client-credentials grant. Every call goes to the network; nothing is cached.
    ///
    /// A non-success response is returned as an error carrying the status and body,
    /// since nothing downstream can proceed without a token.
    pub async fn acquire(&self, credentials: &Credentials) -> anyhow::Result<AccessToken> {
        let token_url = constants::token_endpoint(&self.login_base_url, &credentials.tenant_id);

        log::info!(
            "Requesting token for client {} in tenant {}",
            credentials.client_id,
            credentials.tenant_id
        );

        let response = self
            .http_client
            .post(&token_url)
            .header("Content-Type", headers::CONTENT_TYPE_FORM)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("scope", GRAPH_DEFAULT_SCOPE),
                ("client_secret", credentials.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .with_context(|| format!("Token request to {} failed", token_url))?;

        let status = response.status();
        log::debug!("Token request status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to get token: {} {}", status.as_u16(), error_text);
        }

        let token_data: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let access_token = token_data
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow::anyhow!("No access token in response"))?;

        log::info!(
            "Acquired {} token (expires in {}s)",
            token_data.token_type.as_deref().unwrap_or("bearer"),
            token_data.expires_in.unwrap_or(0)
        );

        Ok(AccessToken::new(access_token, token_data.expires_in))
    }
}
