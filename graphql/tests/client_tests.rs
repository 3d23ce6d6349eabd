//! HTTP-level tests for the GraphQL client against a mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use easy_event_graphql::{EventInput, GraphQlClient, GraphQlError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphQlClient {
    GraphQlClient::new(format!("{}/graphql", server.uri()))
}

fn talk_input() -> EventInput {
    EventInput {
        title: "Talk".to_string(),
        description: "d".to_string(),
        price: 10.0,
        date: "2025-05-01".to_string(),
    }
}

#[tokio::test]
async fn events_are_returned_in_response_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "events": [
                { "_id": "e2", "title": "Second", "description": "b", "date": "2025-02-01T10:00:00.000Z",
                  "price": 5, "creator": { "_id": "u2", "email": "two@example.com" } },
                { "_id": "e1", "title": "First", "description": "a", "date": "2025-01-01T10:00:00.000Z",
                  "price": 12.5, "creator": { "_id": "u1", "email": "one@example.com" } }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server).events().await.unwrap();

    let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e2", "e1"]);
    assert!((events[1].price - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn create_event_sends_bearer_token_and_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "variables": { "title": "Talk", "description": "d", "price": 10.0, "date": "2025-05-01" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "createEvent": {
                "_id": "e9", "title": "Talk", "description": "d", "date": "2025-05-01T00:00:00.000Z", "price": 10
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_event("secret", &talk_input())
        .await
        .unwrap();

    assert_eq!(created.id, "e9");
    assert_eq!(created.title, "Talk");
}

#[tokio::test]
async fn book_event_sends_event_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({ "variables": { "id": "e1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "bookEvent": {
                "_id": "b1", "createdAt": "2025-01-01T00:00:00.000Z", "updatedAt": "2025-01-01T00:00:00.000Z"
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let booking = client_for(&server)
        .book_event("secret", "e1")
        .await
        .unwrap();

    assert_eq!(booking.id, "b1");
}

#[tokio::test]
async fn login_returns_session_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "email": "a@example.com", "password": "pw" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "login": { "userId": "u1", "token": "tok", "tokenExpiration": 1 } }
        })))
        .mount(&server)
        .await;

    let auth = client_for(&server)
        .login("a@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(auth.user_id, "u1");
    assert_eq!(auth.token, "tok");
    assert_eq!(auth.token_expiration, 1);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Failed!"))
        .mount(&server)
        .await;

    let error = client_for(&server).events().await.unwrap_err();

    assert_eq!(
        error,
        GraphQlError::Status {
            status: 500,
            body: "Failed!".to_string()
        }
    );
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Unauthenticated!" }]
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .book_event("stale", "e1")
        .await
        .unwrap_err();

    assert_eq!(
        error,
        GraphQlError::Graphql {
            messages: vec!["Unauthenticated!".to_string()]
        }
    );
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let error = client_for(&server).events().await.unwrap_err();

    assert!(matches!(error, GraphQlError::Parse(_)));
}

#[tokio::test]
async fn slow_server_hits_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "events": [] } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GraphQlClient::with_timeout(
        format!("{}/graphql", server.uri()),
        Duration::from_millis(100),
    )
    .unwrap();

    let error = client.events().await.unwrap_err();

    assert!(matches!(error, GraphQlError::Request(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let client = GraphQlClient::new("http://127.0.0.1:9/graphql");

    let error = client.events().await.unwrap_err();

    assert!(matches!(error, GraphQlError::Request(_)));
}
