use graph_bulk::api::{
    BatchConfig, BatchExecutor, BatchProgress, ChunkOutcome, ChunkReport, EnvelopeFailure, NoProgress,
    Operation, RetryPolicy,
};
use graph_bulk::config::{Credentials, GraphConfig};
use graph_bulk::api::{AccessToken, GraphClient};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{mock_client, EchoBatch, FlakyBatch, BATCH_PATH};

fn deletes(n: usize) -> Vec<Operation> {
    (0..n).map(|i| Operation::delete("users", &format!("user-{}", i))).collect()
}

fn quick_retry(batch_size: usize) -> BatchConfig {
    BatchConfig::new(batch_size, RetryPolicy::fixed(2, Duration::from_millis(10))).unwrap()
}

#[derive(Default)]
struct RecordingProgress {
    started: Vec<(usize, usize, usize)>,
    retries: Vec<(usize, Option<u16>)>,
    finished: Vec<usize>,
}

impl BatchProgress for RecordingProgress {
    fn chunk_started(&mut self, index: usize, total: usize, size: usize) {
        self.started.push((index, total, size));
    }

    fn chunk_retrying(&mut self, index: usize, failure: &EnvelopeFailure, _delay: Duration) {
        self.retries.push((index, failure.status));
    }

    fn chunk_finished(&mut self, report: &ChunkReport) {
        self.finished.push(report.index);
    }
}

#[tokio::test]
async fn test_single_chunk_all_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(EchoBatch::all_ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let operations = deletes(3);
    let report = BatchExecutor::new(&client, quick_retry(20))
        .execute(&operations, &mut NoProgress)
        .await;

    let summary = report.summary();
    assert_eq!(report.chunks.len(), 1);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(report.chunks[0].attempts, 1);
}

#[tokio::test]
async fn test_mixed_statuses_are_correlated_by_id() {
    let server = MockServer::start().await;

    // Sub-responses come back reversed; positional pairing would get this wrong
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .respond_with(EchoBatch {
            statuses: vec![204, 204, 400, 204, 404],
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let operations = deletes(5);
    let report = BatchExecutor::new(&client, quick_retry(20))
        .execute(&operations, &mut NoProgress)
        .await;

    let summary = report.summary();
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 2);

    let by_id: HashMap<&str, _> = report.results().map(|r| (r.operation.id(), r)).collect();
    let outcome: Vec<bool> = operations.iter().map(|op| by_id[op.id()].is_success()).collect();
    assert_eq!(outcome, vec![true, true, false, true, false]);

    let third = by_id[operations[2].id()];
    assert_eq!(third.status_code, Some(400));
    assert_eq!(third.error.as_deref(), Some("item 2 rejected"));
    assert_eq!(third.operation.url(), "/users/user-2");
}

#[tokio::test]
async fn test_failed_envelope_is_retried_once_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .respond_with(FlakyBatch::new(1))
        .expect(2)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let operations = deletes(4);
    let mut progress = RecordingProgress::default();
    let report = BatchExecutor::new(&client, quick_retry(20))
        .execute(&operations, &mut progress)
        .await;

    assert_eq!(report.chunks[0].attempts, 2);
    assert!(matches!(report.chunks[0].outcome, ChunkOutcome::Completed(_)));
    assert_eq!(report.summary().succeeded, 4);
    assert_eq!(progress.retries, vec![(0, Some(503))]);

    // The retry resends the identical envelope
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_chunk_failing_twice_is_abandoned_and_run_continues() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .respond_with(FlakyBatch::new(2))
        .expect(4)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let operations = deletes(5);
    let mut progress = RecordingProgress::default();
    let report = BatchExecutor::new(&client, quick_retry(2))
        .execute(&operations, &mut progress)
        .await;

    assert_eq!(report.chunks.len(), 3);
    match &report.chunks[0].outcome {
        ChunkOutcome::Abandoned { status, message } => {
            assert_eq!(*status, Some(503));
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected abandoned chunk, got {:?}", other),
    }
    assert_eq!(report.chunks[0].attempts, 2);
    assert!(!report.chunks[1].is_abandoned());
    assert!(!report.chunks[2].is_abandoned());

    let summary = report.summary();
    assert_eq!(summary.abandoned_chunks, 1);
    assert_eq!(summary.abandoned_operations, 2);
    assert_eq!(summary.succeeded, 3);

    assert_eq!(progress.started, vec![(0, 3, 2), (1, 3, 2), (2, 3, 1)]);
    assert_eq!(progress.finished, vec![0, 1, 2]);
    assert_eq!(progress.retries.len(), 1);
}

#[tokio::test]
async fn test_unreadable_success_body_is_abandoned_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let report = BatchExecutor::new(&client, quick_retry(20))
        .execute(&deletes(2), &mut NoProgress)
        .await;

    assert!(report.chunks[0].is_abandoned());
    assert_eq!(report.chunks[0].attempts, 1);
}

#[tokio::test]
async fn test_transport_error_is_chunk_scoped() {
    // Nothing listens on port 1
    let config = GraphConfig::new(Credentials::new("t", "c", "s")).with_graph_base_url("http://127.0.0.1:1/v1.0");
    let client = GraphClient::new(&config, reqwest::Client::new(), AccessToken::new("x", None));

    let report = BatchExecutor::new(&client, BatchConfig::new(20, RetryPolicy::fixed(2, Duration::ZERO)).unwrap())
        .execute(&deletes(1), &mut NoProgress)
        .await;

    match &report.chunks[0].outcome {
        ChunkOutcome::Abandoned { status, .. } => assert_eq!(*status, None),
        other => panic!("expected abandoned chunk, got {:?}", other),
    }
    assert_eq!(report.chunks[0].attempts, 2);
}

#[tokio::test]
async fn test_empty_input_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(EchoBatch::all_ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let report = BatchExecutor::new(&client, quick_retry(20))
        .execute(&[], &mut NoProgress)
        .await;

    assert!(report.chunks.is_empty());
}
