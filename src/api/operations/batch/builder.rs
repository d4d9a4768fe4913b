//! Graph $batch request builder
//!
//! Builds the JSON envelope `{"requests": [...]}` for up to
//! `MAX_BATCH_SIZE` operations.

use serde::Serialize;
use std::collections::HashSet;

use crate::api::constants::MAX_BATCH_SIZE;
use crate::api::operations::Operation;

/// A ready-to-send $batch envelope
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    requests: Vec<Operation>,
}

impl BatchRequest {
    pub fn operations(&self) -> &[Operation] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Builder for creating Graph $batch requests
#[derive(Debug)]
pub struct BatchRequestBuilder {
    max_size: usize,
    requests: Vec<Operation>,
}

impl BatchRequestBuilder {
    pub fn new() -> Self {
        Self {
            max_size: MAX_BATCH_SIZE,
            requests: Vec::new(),
        }
    }

    /// Lower the per-envelope limit; values above the Graph ceiling are clamped
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.min(MAX_BATCH_SIZE);
        self
    }

    pub fn add_operation(mut self, operation: &Operation) -> Self {
        self.requests.push(operation.clone());
        self
    }

    pub fn add_operations(mut self, operations: &[Operation]) -> Self {
        self.requests.extend_from_slice(operations);
        self
    }

    /// Validate and produce the envelope
    pub fn build(self) -> anyhow::Result<BatchRequest> {
        if self.requests.is_empty() {
            anyhow::bail!("Batch request must contain at least one operation");
        }

        if self.requests.len() > self.max_size {
            anyhow::bail!(
                "Batch request holds {} operations, limit is {}",
                self.requests.len(),
                self.max_size
            );
        }

        let mut seen = HashSet::with_capacity(self.requests.len());
        for operation in &self.requests {
            if !seen.insert(operation.id()) {
                anyhow::bail!("Duplicate request id '{}' in batch", operation.id());
            }
        }

        Ok(BatchRequest {
            requests: self.requests,
        })
    }
}

impl Default for BatchRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
