use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Bearer token for one run; never refreshed
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            value: value.into(),
            expires_in,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Lifetime in seconds as reported by the token endpoint
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Token endpoint success payload
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

/// A user, subscription or other directory object as listed by Graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ResourceRecord {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// One page of a collection listing
#[derive(Debug, Deserialize)]
pub struct ODataPage<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Graph error envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct GraphError {
    pub error: GraphErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pull `error.message` out of a Graph error body, if it has one
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}
