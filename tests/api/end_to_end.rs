use graph_bulk::api::{BatchConfig, BatchExecutor, ClientManager, NoProgress};
use graph_bulk::records::{create_operations, generate_users};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{mock_config, EchoBatch, BATCH_PATH};

#[tokio::test]
async fn test_create_three_users_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "live-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(header("Authorization", "Bearer live-token"))
        .respond_with(EchoBatch::all_ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientManager::with_http_client(mock_config(&server), reqwest::Client::new())
        .authenticate()
        .await
        .unwrap();

    let users = generate_users("example.com", 3);
    let operations = create_operations(&users).unwrap();
    let report = BatchExecutor::new(&client, BatchConfig::default())
        .execute(&operations, &mut NoProgress)
        .await;

    let summary = report.summary();
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.abandoned_chunks, 0);

    let requests = server.received_requests().await.unwrap();
    let batch = requests
        .iter()
        .find(|r| r.url.path() == BATCH_PATH)
        .unwrap();
    let envelope: Value = serde_json::from_slice(&batch.body).unwrap();
    let principals: Vec<&str> = envelope["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["body"]["userPrincipalName"].as_str().unwrap())
        .collect();

    assert_eq!(
        principals,
        vec![
            "testuser00000@example.com",
            "testuser00001@example.com",
            "testuser00002@example.com"
        ]
    );
    assert!(envelope["requests"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["method"] == "POST" && r["url"] == "/users"));
}
