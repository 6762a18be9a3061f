//! Integration tests for the HTTP adapter, driven in-process with `oneshot`.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use crud_recipe::config::ServerConfig;
use crud_recipe::framework::mock::{FaultyStore, MockClient};
use crud_recipe::framework::{FrameworkError, IdAssignment, ResourceActor};
use crud_recipe::http::{app_router, collection_routes, CollectionState};
use crud_recipe::lifecycle::ResourceSystem;
use crud_recipe::model::Book;
use serde_json::{json, Value};
use tower::ServiceExt;

fn setup_test_app() -> (Router, ResourceSystem) {
    let config = ServerConfig::default();
    let system = ResourceSystem::start(&config);
    let app = app_router(&system, &config);
    (app, system)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

// ============================================================================
// Books
// ============================================================================

#[tokio::test]
async fn test_book_lifecycle() {
    let (app, _system) = setup_test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/books",
        Some(r#"{"isbn":"1234","title":"Book Title 1"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "1");
    assert_eq!(created["title"], "Book Title 1");

    let (status, fetched) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, removed) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, created);

    let (status, body) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "resource not found", "code": 404}));
}

#[tokio::test]
async fn test_duplicate_client_id_is_409() {
    let (app, _system) = setup_test_app();
    let payload = r#"{"id":"2","isbn":"1235","title":"Book Title 2"}"#;

    let (status, _) = send(&app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_blank_client_id_is_400() {
    let (app, _system) = setup_test_app();

    for id in ["", "  ", "a/b"] {
        let payload = json!({"id": id, "isbn": "1", "title": "T"}).to_string();
        let (status, body) = send(&app, "POST", "/books", Some(&payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {:?}", id);
        assert_eq!(body, json!({"error": "invalid input", "code": 400}));
    }

    let (_, list) = send(&app, "GET", "/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_delete_missing_is_404() {
    let (app, _system) = setup_test_app();

    let (status, body) = send(&app, "DELETE", "/books/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "resource not found", "code": 404}));
}

#[tokio::test]
async fn test_partial_update() {
    let (app, _system) = setup_test_app();
    send(
        &app,
        "POST",
        "/books",
        Some(r#"{"isbn":"1234","title":"Book Title 1","author":{"name":"author 1","age":1}}"#),
    )
    .await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/books/1",
        Some(r#"{"title":"Renamed","author":{"age":2}}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": "1",
            "isbn": "1234",
            "title": "Renamed",
            "author": {"name": "author 1", "age": 2}
        })
    );
}

#[tokio::test]
async fn test_update_missing_is_404() {
    let (app, _system) = setup_test_app();
    let (status, _) = send(&app, "PUT", "/books/missing-id", Some(r#"{"name":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let (app, _system) = setup_test_app();
    send(&app, "POST", "/books", Some(r#"{"isbn":"1","title":"T"}"#)).await;

    let (status, body) = send(&app, "PUT", "/books/1", Some(r#"{"id":"5"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid input");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, _system) = setup_test_app();

    let (status, body) = send(&app, "POST", "/books", Some(r#"{"isbn": "#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "malformed request body", "code": 400}));

    // Well-formed JSON of the wrong shape is rejected the same way.
    let (status, _) = send(&app, "POST", "/books", Some(r#"{"title": 7}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_insertion_order() {
    let (app, system) = setup_test_app();
    system.seed_demo_data().await.unwrap();
    send(&app, "POST", "/books", Some(r#"{"isbn":"1236","title":"Book Title 3"}"#)).await;

    let (status, list) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

// ============================================================================
// Employees
// ============================================================================

#[tokio::test]
async fn test_employee_ids_are_generated_numbers() {
    let (app, _system) = setup_test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/employees",
        Some(r#"{"id":0,"name":"Ada","salary":1200.5,"age":36}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_u64().unwrap();
    assert!((1..10_000_000).contains(&id));
    assert_eq!(created["salary"], 1200.5);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/employees/{}", id),
        Some(r#"{"salary":1500,"age":null}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["salary"], 1500.0);
    assert_eq!(updated["age"], 36.0);
    assert_eq!(updated["name"], "Ada");
}

#[tokio::test]
async fn test_employee_bad_id_and_bad_payload_are_400() {
    let (app, _system) = setup_test_app();

    let (status, body) = send(&app, "GET", "/employees/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed identifier");

    let (status, body) = send(
        &app,
        "POST",
        "/employees",
        Some(r#"{"name":"Ada","salary":-5,"age":36}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid input");
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_version_and_health() {
    let (app, _system) = setup_test_app();

    let (status, version) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version, Value::String(env!("CARGO_PKG_VERSION").to_string()));

    let (status, body) = send(&app, "GET", "/-/healthy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

// ============================================================================
// Failure mapping
// ============================================================================

#[tokio::test]
async fn test_scripted_failures_map_to_5xx() {
    let mock = MockClient::<Book>::new();
    mock.expect_get().return_err(FrameworkError::Timeout);
    mock.expect_list()
        .return_err(FrameworkError::StoreUnavailable("primary down".into()));
    mock.expect_create().return_err(FrameworkError::Canceled);

    let app = Router::new().nest(
        "/books",
        collection_routes(CollectionState::new(mock.client(), Duration::from_secs(1))),
    );

    let (status, body) = send(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({"error": "request timed out", "code": 504}));

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service unavailable");

    let (status, _) = send(&app, "POST", "/books", Some(r#"{"isbn":"1","title":"T"}"#)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    mock.verify();
}

#[tokio::test]
async fn test_slow_store_is_504() {
    let (store, _switch) = FaultyStore::<Book>::new(Duration::from_millis(300));
    let (actor, client) = ResourceActor::with_store(8, store, IdAssignment::default());
    tokio::spawn(actor.run());

    let app = Router::new().nest(
        "/books",
        collection_routes(CollectionState::new(client, Duration::from_millis(20))),
    );

    let (status, _) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}
