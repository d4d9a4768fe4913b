use anyhow::Result;
use std::fmt;

use crate::api::constants::{GRAPH_BASE_URL, LOGIN_BASE_URL};

/// Client-credentials identity of the application registration
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Everything needed to talk to the identity platform and Graph for one run
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub credentials: Credentials,
    pub login_base_url: String,
    pub graph_base_url: String,
}

impl GraphConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            login_base_url: LOGIN_BASE_URL.to_string(),
            graph_base_url: GRAPH_BASE_URL.to_string(),
        }
    }

    pub fn with_login_base_url(mut self, url: impl Into<String>) -> Self {
        self.login_base_url = trim_base(url.into());
        self
    }

    pub fn with_graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = trim_base(url.into());
        self
    }

    /// Reject missing credentials before any request goes out
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("tenant id", &self.credentials.tenant_id),
            ("client id", &self.credentials.client_id),
            ("client secret", &self.credentials.client_secret),
        ];

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing credentials: {} (set them via flags or ENTRA_* environment variables)",
                missing.join(", ")
            );
        }

        Ok(())
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
