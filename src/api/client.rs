use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

use super::constants::{self, headers};
use super::models::{AccessToken, GraphError, ODataPage, ResourceRecord};
use super::operations::BatchRequest;
use super::query::ListQuery;
use crate::config::GraphConfig;

/// Why a $batch envelope did not come back with a success status
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeFailure {
    /// Envelope status, `None` when the request never got a response
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for EnvelopeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Microsoft Graph client bound to one access token
#[derive(Clone)]
pub struct GraphClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: AccessToken,
}

/// Shared HTTP client with connection pooling
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("graph-bulk/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build tuned HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        })
}

impl GraphClient {
    pub fn new(config: &GraphConfig, http_client: reqwest::Client, access_token: AccessToken) -> Self {
        Self {
            base_url: config.graph_base_url.clone(),
            http_client,
            access_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every page of a collection listing.
    ///
    /// Follows `@odata.nextLink` until the service stops sending one. A failed page
    /// fails the whole listing; a partial list is never returned.
    pub async fn list_all<T: DeserializeOwned>(&self, query: &ListQuery) -> anyhow::Result<Vec<T>> {
        let mut url = Some(query.to_url(&self.base_url));
        let mut items = Vec::new();
        let mut page = 0;

        while let Some(current) = url.take() {
            page += 1;
            log::debug!("Fetching {} page {}: {}", query.collection, page, current);

            let response = self
                .http_client
                .get(&current)
                .bearer_auth(self.access_token.as_str())
                .header("Accept", headers::CONTENT_TYPE_JSON)
                .send()
                .await
                .with_context(|| format!("Failed to fetch {}", query.collection))?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                let detail = serde_json::from_str::<GraphError>(&error_text)
                    .ok()
                    .and_then(|e| e.error.message)
                    .unwrap_or(error_text);
                anyhow::bail!(
                    "Failed to fetch {}: {} {}",
                    query.collection,
                    status.as_u16(),
                    detail
                );
            }

            let data: ODataPage<T> = response
                .json()
                .await
                .with_context(|| format!("Invalid {} page {} from Graph", query.collection, page))?;

            items.extend(data.value);

            if let Some(next) = &data.next_link {
                if !self.is_graph_url(next) {
                    anyhow::bail!(
                        "Refusing to follow {} nextLink outside {}: {}",
                        query.collection,
                        self.base_url,
                        next
                    );
                }
            }
            url = data.next_link;
        }

        log::info!("Listed {} {} across {} page(s)", items.len(), query.collection, page);
        Ok(items)
    }

    /// Whether `url` points under this client's Graph version root
    fn is_graph_url(&self, url: &str) -> bool {
        url.strip_prefix(self.base_url.as_str())
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }

    /// List directory objects as loosely typed records
    pub async fn list_records(&self, query: &ListQuery) -> anyhow::Result<Vec<ResourceRecord>> {
        self.list_all(query).await
    }

    /// POST one envelope to `$batch`, returning the raw body on envelope success
    pub async fn send_batch(&self, request: &BatchRequest) -> Result<String, EnvelopeFailure> {
        let url = constants::batch_endpoint(&self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token.as_str())
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(request)
            .send()
            .await
            .map_err(|e| EnvelopeFailure {
                status: None,
                message: format!("Batch request failed: {}", e),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| EnvelopeFailure {
            status: Some(status.as_u16()),
            message: format!("Failed to read batch response: {}", e),
        })?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(EnvelopeFailure {
                status: Some(status.as_u16()),
                message: text,
            })
        }
    }
}
