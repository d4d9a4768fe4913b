use super::auth::TokenProvider;
use super::client::{build_http_client, GraphClient};
use crate::config::GraphConfig;

/// Turns a `GraphConfig` into an authenticated `GraphClient`
pub struct ClientManager {
    config: GraphConfig,
    http_client: reqwest::Client,
}

impl ClientManager {
    pub fn new(config: GraphConfig) -> Self {
        Self::with_http_client(config, build_http_client())
    }

    pub fn with_http_client(config: GraphConfig, http_client: reqwest::Client) -> Self {
        Self { config, http_client }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Validate credentials, acquire a token and hand back a ready client
    pub async fn authenticate(&self) -> anyhow::Result<GraphClient> {
        self.config.validate()?;

        let provider = TokenProvider::new(&self.config, self.http_client.clone());
        let token = provider.acquire(&self.config.credentials).await?;

        Ok(GraphClient::new(&self.config, self.http_client.clone(), token))
    }
}
