//! Core Operation types for Graph $batch sub-requests

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::api::constants::{headers, methods};

/// A single sub-request inside a $batch envelope.
///
/// Serializes to exactly the shape Graph expects in `requests[]`. The id is a
/// fresh UUID and only serves to pair the sub-response with this request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    id: String,
    method: String,
    url: String,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
}

/// Result of executing an Operation
#[derive(Debug, Clone)]
pub struct OperationResult {
    /// The operation that was executed
    pub operation: Operation,
    /// Whether the sub-response carried a 2xx status
    pub success: bool,
    /// Response body (the created object for creates, usually empty for deletes)
    pub data: Option<Value>,
    /// Remote error message if the operation failed
    pub error: Option<String>,
    /// HTTP status code of the sub-response, if there was one
    pub status_code: Option<u16>,
    /// Sub-response headers
    pub headers: HashMap<String, String>,
}

impl Operation {
    /// Build an operation with a fresh correlation id
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Option<Value>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), method, url, body)
    }

    /// Build an operation with a caller-chosen correlation id
    pub fn with_id(
        id: impl Into<String>,
        method: impl Into<String>,
        url: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        let mut request_headers = BTreeMap::new();
        request_headers.insert("Content-Type".to_string(), headers::CONTENT_TYPE_JSON.to_string());

        Self {
            id: id.into(),
            method: method.into(),
            url: url.into(),
            headers: request_headers,
            body,
        }
    }

    /// POST a new object into a collection, e.g. `/users`
    pub fn create(collection: &str, data: Value) -> Self {
        Self::new(methods::POST, format!("/{}", collection), Some(data))
    }

    /// DELETE an object by id, e.g. `/users/{id}`
    pub fn delete(collection: &str, id: &str) -> Self {
        Self::new(methods::DELETE, format!("/{}/{}", collection, id), None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path relative to the Graph version root
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl OperationResult {
    /// Create a new successful result
    pub fn success(operation: Operation, status_code: u16, data: Option<Value>) -> Self {
        Self {
            operation,
            success: true,
            data,
            error: None,
            status_code: Some(status_code),
            headers: HashMap::new(),
        }
    }

    /// Create a new error result
    pub fn error(operation: Operation, error: String, status_code: Option<u16>) -> Self {
        Self {
            operation,
            success: false,
            data: None,
            error: Some(error),
            status_code,
            headers: HashMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Check if this result represents a successful operation
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Check if this result represents a failed operation
    pub fn is_error(&self) -> bool {
        !self.success
    }

    /// Id of the created or deleted object, when the response names it
    pub fn object_id(&self) -> Option<&str> {
        self.data.as_ref()?.get("id")?.as_str()
    }
}
