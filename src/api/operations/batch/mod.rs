//! Batch operations module for the Graph JSON $batch endpoint
//!
//! Provides envelope building and sub-response correlation

pub mod builder;
pub mod parser;

pub use builder::{BatchRequest, BatchRequestBuilder};
pub use parser::{BatchResponse, BatchResponseItem, BatchResponseParser};
