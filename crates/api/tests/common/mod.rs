#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vowpage_api::config::ServerConfig;
use vowpage_api::router::build_app_router;
use vowpage_api::state::AppState;
use vowpage_core::media::{MediaCatalog, MemoryMediaCatalog};
use vowpage_core::store::{MemoryOverrideStore, OverrideStore};
use vowpage_core::template::builtin_template;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        template_path: None,
    }
}

/// Build the full application router over the given store and catalog,
/// using the built-in template.
pub fn build_test_app_with(store: Arc<dyn OverrideStore>, catalog: Arc<dyn MediaCatalog>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        catalog,
        template: Arc::new(builtin_template()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the application over fresh in-memory backends.
pub fn build_test_app() -> Router {
    build_test_app_with(
        Arc::new(MemoryOverrideStore::new()),
        Arc::new(MemoryMediaCatalog::new()),
    )
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
