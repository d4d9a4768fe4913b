//! Human-readable console output for batch runs

use colored::*;
use std::time::Duration;

use crate::api::operations::{BatchProgress, BatchSummary, ChunkOutcome, ChunkReport, OperationResult};
use crate::api::EnvelopeFailure;

/// Prints one line per chunk event and per item outcome
pub struct ConsoleReporter {
    /// Plural noun for the objects being processed, e.g. "users"
    noun: String,
    /// Past-tense verb for a successful item, e.g. "Created"
    verb: String,
}

impl ConsoleReporter {
    pub fn new(noun: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            verb: verb.into(),
        }
    }

    pub fn item_line(&self, result: &OperationResult) -> String {
        let target = result.object_id().unwrap_or(result.operation.url());

        if result.is_success() {
            format!(
                "✅ {} (id {}) {}",
                self.verb,
                result.operation.id(),
                target.dimmed()
            )
        } else {
            let status = result
                .status_code
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "❌ Failed (id {}) {}: {}, {}",
                result.operation.id(),
                target.dimmed(),
                status.red(),
                result.error.as_deref().unwrap_or("unknown error")
            )
        }
    }

    pub fn print_summary(&self, summary: &BatchSummary) {
        println!();
        println!(
            "📊 {} {}: {} succeeded, {} failed, {} skipped in {} abandoned batch(es)",
            self.verb,
            self.noun,
            summary.succeeded.to_string().bright_green(),
            summary.failed.to_string().red(),
            summary.abandoned_operations.to_string().yellow(),
            summary.abandoned_chunks
        );
    }
}

impl BatchProgress for ConsoleReporter {
    fn chunk_started(&mut self, index: usize, total: usize, size: usize) {
        println!();
        println!(
            "📦 Sending batch {}/{} ({} {})...",
            (index + 1).to_string().cyan(),
            total,
            size,
            self.noun
        );
    }

    fn chunk_retrying(&mut self, _index: usize, failure: &EnvelopeFailure, delay: Duration) {
        println!("❌ Batch request failed: {}", failure.to_string().red());
        println!("{}", format!("Retrying after {}s...", delay.as_secs_f64()).dimmed());
    }

    fn chunk_finished(&mut self, report: &ChunkReport) {
        match &report.outcome {
            ChunkOutcome::Completed(results) => {
                for result in results {
                    println!("{}", self.item_line(result));
                }
            }
            ChunkOutcome::Abandoned { status, message } => {
                let status = status.map(|s| format!("{} ", s)).unwrap_or_default();
                println!(
                    "⚠️  Skipping this batch after {} attempt(s): {}{}",
                    report.attempts,
                    status.yellow(),
                    message
                );
            }
        }
    }
}
