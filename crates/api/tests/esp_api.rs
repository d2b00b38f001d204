//! HTTP-level integration tests for ESP32 device bindings.

mod common;

use axum::http::{Method, StatusCode};
use common::{bind_device, body_json, get, send_auth, TestApp};

#[tokio::test]
async fn bind_returns_binding() {
    let app = TestApp::new();

    let response = send_auth(app.app(), Method::POST, "/esp/esp?id=esp-7&floor=3&pos=1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "esp-7");
    assert_eq!(json["floor"], 3);
    assert_eq!(json["pos"], 1);
}

#[tokio::test]
async fn rebinding_resolves_to_latest_slot() {
    let app = TestApp::new();
    bind_device(&app, "esp-7", 3, 1).await;
    bind_device(&app, "esp-7", 4, 0).await;

    let response = get(app.app(), "/esp/esp/esp-7").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["floor"], 4);
    assert_eq!(json["pos"], 0);
}

#[tokio::test]
async fn resolving_unknown_device_returns_404() {
    let app = TestApp::new();

    let response = get(app.app(), "/esp/esp/nobody").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn bind_with_missing_query_is_rejected() {
    let app = TestApp::new();

    let response = send_auth(app.app(), Method::POST, "/esp/esp?id=esp-7", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.kv.is_empty().await);
}

#[tokio::test]
async fn bind_with_blank_id_is_rejected() {
    let app = TestApp::new();

    let response = send_auth(app.app(), Method::POST, "/esp/esp?id=&floor=1&pos=1", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(app.kv.is_empty().await);
}
