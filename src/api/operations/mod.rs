//! Graph batch operations
//!
//! This module provides the operation descriptor, the $batch envelope
//! builder and parser, and the chunked executor that ties them together.

pub mod batch;
pub mod executor;
pub mod operation;

pub use batch::{BatchRequest, BatchRequestBuilder, BatchResponse, BatchResponseItem, BatchResponseParser};
pub use executor::{
    partition, BatchConfig, BatchExecutor, BatchProgress, BatchReport, BatchSummary, ChunkOutcome,
    ChunkReport, NoProgress,
};
pub use operation::{Operation, OperationResult};
