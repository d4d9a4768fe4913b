//! Chunked $batch execution with bounded retry
//!
//! Operations are split into contiguous chunks of at most `batch_size`,
//! each chunk goes out as one envelope, and a failed envelope is retried
//! according to the `RetryPolicy`. A chunk that still fails is abandoned;
//! per-item failures inside a successful envelope never stop the run.

use std::time::Duration;

use super::batch::{BatchRequestBuilder, BatchResponseParser};
use super::operation::{Operation, OperationResult};
use crate::api::client::{EnvelopeFailure, GraphClient};
use crate::api::constants::MAX_BATCH_SIZE;
use crate::api::resilience::RetryPolicy;

/// Chunk size and retry behaviour for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    batch_size: usize,
    retry: RetryPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

impl BatchConfig {
    pub fn new(batch_size: usize, retry: RetryPolicy) -> anyhow::Result<Self> {
        if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
            anyhow::bail!(
                "Batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE,
                batch_size
            );
        }

        Ok(Self { batch_size, retry })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

/// What happened to one chunk
#[derive(Debug, Clone)]
pub enum ChunkOutcome {
    /// The envelope succeeded; one result per operation, in input order
    Completed(Vec<OperationResult>),
    /// The envelope failed on every attempt, or came back unreadable
    Abandoned { status: Option<u16>, message: String },
}

#[derive(Debug, Clone)]
pub struct ChunkReport {
    /// Zero-based chunk number
    pub index: usize,
    pub size: usize,
    pub attempts: u32,
    pub outcome: ChunkOutcome,
}

impl ChunkReport {
    pub fn is_abandoned(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Abandoned { .. })
    }

    pub fn results(&self) -> &[OperationResult] {
        match &self.outcome {
            ChunkOutcome::Completed(results) => results,
            ChunkOutcome::Abandoned { .. } => &[],
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results().iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results().iter().filter(|r| r.is_error()).count()
    }
}

/// Totals across a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub abandoned_chunks: usize,
    pub abandoned_operations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub chunks: Vec<ChunkReport>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        self.chunks.iter().fold(BatchSummary::default(), |mut acc, chunk| {
            if chunk.is_abandoned() {
                acc.abandoned_chunks += 1;
                acc.abandoned_operations += chunk.size;
            } else {
                acc.succeeded += chunk.succeeded();
                acc.failed += chunk.failed();
            }
            acc
        })
    }

    pub fn results(&self) -> impl Iterator<Item = &OperationResult> {
        self.chunks.iter().flat_map(|chunk| chunk.results().iter())
    }
}

/// Observer for chunk progress; every hook defaults to a no-op
pub trait BatchProgress {
    fn chunk_started(&mut self, _index: usize, _total: usize, _size: usize) {}

    fn chunk_retrying(&mut self, _index: usize, _failure: &EnvelopeFailure, _delay: Duration) {}

    fn chunk_finished(&mut self, _report: &ChunkReport) {}
}

/// Progress sink that ignores everything
pub struct NoProgress;

impl BatchProgress for NoProgress {}

/// Split operations into contiguous, order-preserving chunks
pub fn partition(operations: &[Operation], batch_size: usize) -> impl Iterator<Item = &[Operation]> {
    operations.chunks(batch_size.max(1))
}

/// Runs operations through the $batch endpoint one chunk at a time
pub struct BatchExecutor<'a> {
    client: &'a GraphClient,
    config: BatchConfig,
}

impl<'a> BatchExecutor<'a> {
    pub fn new(client: &'a GraphClient, config: BatchConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Execute all operations sequentially, chunk by chunk
    pub async fn execute(&self, operations: &[Operation], progress: &mut dyn BatchProgress) -> BatchReport {
        let total = operations.len().div_ceil(self.config.batch_size);
        let mut report = BatchReport {
            chunks: Vec::with_capacity(total),
        };

        for (index, chunk) in partition(operations, self.config.batch_size).enumerate() {
            progress.chunk_started(index, total, chunk.len());
            let chunk_report = self.execute_chunk(index, chunk, progress).await;
            progress.chunk_finished(&chunk_report);
            report.chunks.push(chunk_report);
        }

        let summary = report.summary();
        log::info!(
            "Batch run finished: {} succeeded, {} failed, {} chunk(s) abandoned",
            summary.succeeded,
            summary.failed,
            summary.abandoned_chunks
        );

        report
    }

    async fn execute_chunk(&self, index: usize, chunk: &[Operation], progress: &mut dyn BatchProgress) -> ChunkReport {
        let abandoned = |attempts: u32, status: Option<u16>, message: String| {
            log::error!("Abandoning batch {} ({} operations): {}", index + 1, chunk.len(), message);
            ChunkReport {
                index,
                size: chunk.len(),
                attempts,
                outcome: ChunkOutcome::Abandoned { status, message },
            }
        };

        let request = match BatchRequestBuilder::new()
            .max_size(self.config.batch_size)
            .add_operations(chunk)
            .build()
        {
            Ok(request) => request,
            Err(e) => return abandoned(0, None, e.to_string()),
        };

        let outcome = self
            .config
            .retry
            .execute(
                |attempt| {
                    log::info!("Sending batch {} ({} operations), attempt {}", index + 1, chunk.len(), attempt);
                    self.client.send_batch(&request)
                },
                |_, failure, delay| progress.chunk_retrying(index, failure, delay),
            )
            .await;

        match outcome.result {
            Ok(body) => match BatchResponseParser::parse(&body, chunk) {
                Ok(results) => ChunkReport {
                    index,
                    size: chunk.len(),
                    attempts: outcome.attempts,
                    outcome: ChunkOutcome::Completed(results),
                },
                Err(e) => abandoned(outcome.attempts, None, e.to_string()),
            },
            Err(failure) => abandoned(outcome.attempts, failure.status, failure.message),
        }
    }
}
