//! Graph $batch response parser
//!
//! Sub-responses may come back in any order, so results are paired with
//! their requests by id, never by position.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::api::models::error_message;
use crate::api::operations::{Operation, OperationResult};

/// Parsed batch response
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub responses: Vec<BatchResponseItem>,
}

/// Individual response item from a batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponseItem {
    pub id: String,
    pub status: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl BatchResponseItem {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parser for batch responses
pub struct BatchResponseParser;

impl BatchResponseParser {
    /// Parse a batch response body into one result per operation, in operation order
    pub fn parse(response_text: &str, operations: &[Operation]) -> anyhow::Result<Vec<OperationResult>> {
        let response: BatchResponse = serde_json::from_str(response_text)
            .map_err(|e| anyhow::anyhow!("Invalid batch response: {}", e))?;
        Ok(Self::correlate(response, operations))
    }

    /// Pair every operation with the sub-response carrying its id
    pub fn correlate(response: BatchResponse, operations: &[Operation]) -> Vec<OperationResult> {
        let mut by_id: HashMap<String, BatchResponseItem> = HashMap::with_capacity(response.responses.len());

        for item in response.responses {
            if by_id.contains_key(&item.id) {
                log::warn!("Duplicate sub-response for request id {}; keeping the first", item.id);
                continue;
            }
            by_id.insert(item.id.clone(), item);
        }

        let results: Vec<OperationResult> = operations
            .iter()
            .map(|operation| match by_id.remove(operation.id()) {
                Some(item) => Self::to_result(operation.clone(), item),
                None => OperationResult::error(
                    operation.clone(),
                    "No sub-response for this request (missing from batch response)".to_string(),
                    None,
                ),
            })
            .collect();

        for unknown in by_id.keys() {
            log::warn!("Ignoring sub-response with unknown request id {}", unknown);
        }

        results
    }

    fn to_result(operation: Operation, item: BatchResponseItem) -> OperationResult {
        let success = item.is_success();
        let status = item.status;
        let headers = item.headers;

        if success {
            OperationResult::success(operation, status, item.body).with_headers(headers)
        } else {
            let message = item
                .body
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            OperationResult::error(operation, message, Some(status)).with_headers(headers)
        }
    }
}
