//! Shared harness for HTTP-level integration tests.
//!
//! Every test builds the production router over fresh in-memory stores and
//! drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use laundry_api::config::ServerConfig;
use laundry_api::router::build_app_router;
use laundry_api::state::AppState;
use laundry_db::kv::{MemoryKvStore, RedisConfig};
use laundry_db::usage::MemoryUsageStore;
use laundry_db::{StoreBackend, StoreConfig, Stores};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults and the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_key: TEST_API_KEY.to_string(),
        store: StoreConfig {
            backend: StoreBackend::Memory,
            redis: RedisConfig {
                host: "localhost".to_string(),
                port: 6379,
                db: 0,
                password: None,
            },
            usage_table: "laundry-usage-test".to_string(),
        },
    }
}

/// The router plus direct handles on its stores, for asserting side effects.
pub struct TestApp {
    pub router: Router,
    pub kv: Arc<MemoryKvStore>,
    pub usage: Arc<MemoryUsageStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let kv = Arc::new(MemoryKvStore::new());
        let usage = Arc::new(MemoryUsageStore::new());

        let state = AppState {
            stores: Stores::new(kv.clone(), usage.clone()),
            config: Arc::new(config.clone()),
        };

        Self {
            router: build_app_router(state, &config),
            kv,
            usage,
        }
    }

    /// A clone of the router, ready for a single `oneshot`.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Send `request` through `app`.
pub async fn call(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    call(app, request).await
}

fn build(
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Request carrying the test API key.
pub async fn send_auth(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let auth = format!("Bearer {TEST_API_KEY}");
    call(app, build(method, uri, &[(AUTHORIZATION.as_str(), auth.as_str())], body)).await
}

/// Request carrying the test API key and an `x-esp-id` header.
pub async fn send_device(
    app: Router,
    method: Method,
    uri: &str,
    device_id: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let auth = format!("Bearer {TEST_API_KEY}");
    let headers = [(AUTHORIZATION.as_str(), auth.as_str()), ("x-esp-id", device_id)];
    call(app, build(method, uri, &headers, body)).await
}

/// Request with arbitrary headers and no implicit API key.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Response<Body> {
    call(app, build(method, uri, headers, body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a machine through the API and assert it was created.
pub async fn create_machine(app: &TestApp, floor: i32, pos: i32, machine_type: &str) {
    let body = serde_json::json!({ "floor": floor, "pos": pos, "type": machine_type });
    let response = send_auth(app.app(), Method::POST, "/machine", Some(body)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

/// Bind a device through the API and assert it succeeded.
pub async fn bind_device(app: &TestApp, id: &str, floor: i32, pos: i32) {
    let uri = format!("/esp/esp?id={id}&floor={floor}&pos={pos}");
    let response = send_auth(app.app(), Method::POST, &uri, None).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
