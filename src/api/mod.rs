//! Microsoft Graph API Module
//!
//! Client-credentials authentication, paginated collection listing, and
//! chunked `$batch` execution with bounded retry.

pub mod auth;
pub mod client;
pub mod constants;
pub mod manager;
pub mod models;
pub mod operations;
pub mod query;
pub mod resilience;

pub use auth::TokenProvider;
pub use client::{EnvelopeFailure, GraphClient};
pub use manager::ClientManager;
pub use models::{AccessToken, ResourceRecord};
pub use operations::{
    BatchConfig, BatchExecutor, BatchProgress, BatchReport, BatchSummary, ChunkOutcome, ChunkReport,
    NoProgress, Operation, OperationResult,
};
pub use query::{Filter, ListQuery};
pub use resilience::{DelayStrategy, RetryPolicy};
