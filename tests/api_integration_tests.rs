//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use ttl_store::{api::create_router, AppState};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::unswept(100))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"test_key","value":"test_value"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_structured_value_roundtrip() {
    let app = create_test_app();
    let doc = r#"{"key":"prd:7","value":{"title":"Launch","tasks":[{"done":false},{"done":true}],"rev":3}}"#;

    let response = send(&app, "PUT", "/set", Some(doc)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/get/prd:7", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "prd:7");
    assert_eq!(json["value"]["title"], "Launch");
    assert_eq!(json["value"]["tasks"][1]["done"], true);
    assert_eq!(json["value"]["rev"], 3);
}

#[tokio::test]
async fn test_set_over_quota_returns_503() {
    let app = create_router(AppState::unswept(1));

    let first = send(&app, "PUT", "/set", Some(r#"{"key":"a","value":1}"#)).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send(&app, "PUT", "/set", Some(r#"{"key":"b","value":2}"#)).await;
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(second.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("'b'"));

    // Updating the resident key still works
    let update = send(&app, "PUT", "/set", Some(r#"{"key":"a","value":3}"#)).await;
    assert_eq!(update.status(), StatusCode::OK);
}

// == GET / HAS Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/get/nonexistent_key", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_invalid_key_returns_400() {
    let app = create_test_app();

    let response = send(&app, "GET", "/get/bad%20key", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_has_endpoint() {
    let app = create_test_app();

    let before = body_to_json(send(&app, "GET", "/has/flag", None).await.into_body()).await;
    assert_eq!(before["exists"], false);

    send(&app, "PUT", "/set", Some(r#"{"key":"flag","value":null}"#)).await;

    let after = body_to_json(send(&app, "GET", "/has/flag", None).await.into_body()).await;
    assert_eq!(after["exists"], true);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_reports_removal() {
    let app = create_test_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"delete_key","value":"delete_value"}"#),
    )
    .await;

    let first = send(&app, "DELETE", "/del/delete_key", None).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_to_json(first.into_body()).await["deleted"], true);

    let second = send(&app, "DELETE", "/del/delete_key", None).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_to_json(second.into_body()).await["deleted"], false);

    let get_response = send(&app, "GET", "/get/delete_key", None).await;
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

// == KEYS / SIZE / CLEAR Endpoint Tests ==

#[tokio::test]
async fn test_keys_endpoint_with_pattern() {
    let app = create_test_app();
    for key in ["user:1", "user:2", "post:1"] {
        let body = format!(r#"{{"key":"{}","value":"x"}}"#, key);
        send(&app, "PUT", "/set", Some(&body)).await;
    }

    let response = send(&app, "GET", "/keys?pattern=user:*", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["keys"], serde_json::json!(["user:1", "user:2"]));
    assert_eq!(json["count"], 2);

    let all = body_to_json(send(&app, "GET", "/keys", None).await.into_body()).await;
    assert_eq!(all["count"], 3);
}

#[tokio::test]
async fn test_size_and_clear_endpoints() {
    let app = create_test_app();
    send(&app, "PUT", "/set", Some(r#"{"key":"a","value":1}"#)).await;
    send(&app, "PUT", "/set", Some(r#"{"key":"b","value":2}"#)).await;

    let size = body_to_json(send(&app, "GET", "/size", None).await.into_body()).await;
    assert_eq!(size["size"], 2);
    assert_eq!(size["max_size"], 100);

    let cleared = send(&app, "POST", "/clear", None).await;
    assert_eq!(cleared.status(), StatusCode::OK);
    assert_eq!(body_to_json(cleared.into_body()).await["size"], 0);
}

// == META Endpoint Tests ==

#[tokio::test]
async fn test_meta_endpoint() {
    let app = create_test_app();
    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"session","value":"abc","ttl_ms":60000}"#),
    )
    .await;

    let response = send(&app, "GET", "/meta/session", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    let created = json["created_at"].as_u64().unwrap();
    let expires = json["expires_at"].as_u64().unwrap();
    assert_eq!(expires - created, 60_000);
    assert!(json["ttl_remaining_ms"].as_u64().unwrap() <= 60_000);

    let missing = send(&app, "GET", "/meta/absent", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"stats_key","value":"stats_value"}"#),
    )
    .await;
    send(&app, "GET", "/get/stats_key", None).await; // hit
    send(&app, "GET", "/get/nonexistent", None).await; // miss

    let response = send(&app, "GET", "/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["rejected"].as_u64().unwrap(), 0);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert_eq!(json["sweeping"], false);
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = send(&app, "PUT", "/set", Some(r#"{"invalid json"#)).await;

    // Axum rejects malformed bodies before the handler runs
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let response = send(&app, "PUT", "/set", Some(r#"{"key":"","value":"test"}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid key"));
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app();

    let set_response = send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"ttl_test","value":"expires_soon","ttl_ms":50}"#),
    )
    .await;
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = send(&app, "GET", "/get/ttl_test", None).await;
    assert_eq!(get_response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let get_response = send(&app, "GET", "/get/ttl_test", None).await;
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}
