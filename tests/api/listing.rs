use graph_bulk::api::{Filter, ListQuery};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::mock_client;

fn test_users_query() -> ListQuery {
    ListQuery::new("users")
        .with_filter(Filter::starts_with("userPrincipalName", "testuser"))
        .with_top(999)
}

#[tokio::test]
async fn test_list_follows_next_link_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$filter", "startswith(userPrincipalName,'testuser')"))
        .and(query_param("$top", "999"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "u1", "userPrincipalName": "testuser00000@example.com"},
                {"id": "u2", "userPrincipalName": "testuser00001@example.com"}
            ],
            "@odata.nextLink": format!("{}/v1.0/users?$skiptoken=page2", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "u3", "userPrincipalName": "testuser00002@example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = mock_client(&server).list_records(&test_users_query()).await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2", "u3"]);
    assert_eq!(
        records[2].attribute("userPrincipalName"),
        Some(&json!("testuser00002@example.com"))
    );
}

#[tokio::test]
async fn test_failed_later_page_fails_whole_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$top", "999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "u1"}],
            "@odata.nextLink": format!("{}/v1.0/users?$skiptoken=page2", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "generalException", "message": "Something broke"}
        })))
        .mount(&server)
        .await;

    let err = mock_client(&server)
        .list_records(&test_users_query())
        .await
        .unwrap_err()
        .to_string();

    assert!(err.contains("500"), "{}", err);
    assert!(err.contains("Something broke"), "{}", err);
}

#[tokio::test]
async fn test_list_subscriptions_without_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let records = mock_client(&server)
        .list_records(&ListQuery::new("subscriptions"))
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_next_link_to_foreign_host_is_not_followed() {
    let server = MockServer::start().await;
    let foreign = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "u1"}],
            "@odata.nextLink": format!("{}/v1.0/users?$skiptoken=page2", foreign.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(0)
        .mount(&foreign)
        .await;

    let err = mock_client(&server)
        .list_records(&test_users_query())
        .await
        .unwrap_err()
        .to_string();

    assert!(err.contains("Refusing to follow"), "{}", err);
}
