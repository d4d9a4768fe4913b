//! Retry handling for envelope-level failures

pub mod retry;

pub use retry::{DelayStrategy, Retried, RetryPolicy};
