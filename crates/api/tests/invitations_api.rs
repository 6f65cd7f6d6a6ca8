//! HTTP-level integration tests for the invitation endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router,
//! backed by the in-memory store and catalog.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, get, put_json};
use serde_json::json;
use vowpage_core::invitation::InvitationOverride;
use vowpage_core::media::{MediaAsset, MediaKind, MemoryMediaCatalog};
use vowpage_core::store::{MemoryOverrideStore, OverrideStore, StoreError};
use vowpage_core::template::builtin_template;
use vowpage_core::types::OwnerKey;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct BrokenStore;

#[async_trait::async_trait]
impl OverrideStore for BrokenStore {
    async fn load(&self, _owner: &OwnerKey) -> Result<Option<InvitationOverride>, StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn save(&self, _owner: &OwnerKey, _record: &InvitationOverride) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection reset".to_string()))
    }
}

fn owner() -> OwnerKey {
    OwnerKey::parse("mina-and-jae").unwrap()
}

fn asset(id: &str, kind: MediaKind) -> MediaAsset {
    MediaAsset {
        id: id.to_string(),
        url: format!("/media/{id}"),
        kind,
        name: id.to_string(),
        size_bytes: 512,
    }
}

fn source_of<'a>(json: &'a serde_json::Value, field: &str) -> &'a str {
    json["data"]["sources"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["field"] == field)
        .and_then(|s| s["source"].as_str())
        .unwrap()
}

// ---------------------------------------------------------------------------
// GET /api/v1/invitations/{owner_key}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_without_override_gets_template() {
    let response = get(build_test_app(), "/api/v1/invitations/mina-and-jae").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let template = builtin_template();
    assert_eq!(json["data"]["owner_key"], "mina-and-jae");
    assert_eq!(json["data"]["has_override"], false);
    assert_eq!(json["data"]["config"]["groom_name"], template.groom_name.as_str());
    assert_eq!(
        json["data"]["config"]["events"].as_array().unwrap().len(),
        template.events.len()
    );
    assert_eq!(source_of(&json, "groom_name"), "default");
    assert_eq!(source_of(&json, "lyrics"), "default");
}

#[tokio::test]
async fn invalid_owner_key_is_400() {
    let response = get(build_test_app(), "/api/v1/invitations/NotASlug").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn store_failure_is_500_with_sanitized_message() {
    let app = build_test_app_with(Arc::new(BrokenStore), Arc::new(MemoryMediaCatalog::new()));
    let response = get(app, "/api/v1/invitations/mina-and-jae").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("connection reset"));
}

// ---------------------------------------------------------------------------
// GET / PUT /api/v1/invitations/{owner_key}/override
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_override_is_204() {
    let response = get(build_test_app(), "/api/v1/invitations/mina-and-jae/override").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn saved_override_is_merged_over_template() {
    let app = build_test_app();
    let body = json!({
        "greeting": "Come celebrate with us",
        "bride_name": "",
        "gallery": [
            {"id": "1", "url": "/u/a.jpg", "caption": "first"},
            {"id": "2", "url": "/u/b.jpg", "caption": "second"}
        ]
    });
    let response = put_json(app.clone(), "/api/v1/invitations/mina-and-jae/override", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/invitations/mina-and-jae").await).await;
    let config = &json["data"]["config"];
    assert_eq!(json["data"]["has_override"], true);
    assert_eq!(config["greeting"], "Come celebrate with us");
    // Empty scalar falls back to the template.
    assert_eq!(config["bride_name"], builtin_template().bride_name.as_str());
    let gallery = config["gallery"].as_array().unwrap();
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0]["caption"], "first");
    assert_eq!(gallery[1]["caption"], "second");

    assert_eq!(source_of(&json, "greeting"), "override");
    assert_eq!(source_of(&json, "bride_name"), "default");
    assert_eq!(source_of(&json, "gallery"), "override");
    assert_eq!(source_of(&json, "events"), "default");
}

#[tokio::test]
async fn put_stores_empty_lists_as_absent() {
    let store = Arc::new(MemoryOverrideStore::new());
    let app = build_test_app_with(store.clone(), Arc::new(MemoryMediaCatalog::new()));

    let response = put_json(
        app.clone(),
        "/api/v1/invitations/mina-and-jae/override",
        json!({"events": [], "music_title": "Ours"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["events"].is_null());

    let stored = store.load(&owner()).await.unwrap().unwrap();
    assert!(stored.events.is_none());
    assert_eq!(stored.music_title.as_deref(), Some("Ours"));

    let response = get(app, "/api/v1/invitations/mina-and-jae/override").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["music_title"], "Ours");
}

#[tokio::test]
async fn put_rejects_invalid_color() {
    let store = Arc::new(MemoryOverrideStore::new());
    let app = build_test_app_with(store.clone(), Arc::new(MemoryMediaCatalog::new()));

    let response = put_json(
        app,
        "/api/v1/invitations/mina-and-jae/override",
        json!({"primary_color": "rose"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.load(&owner()).await.unwrap().is_none());
}

#[tokio::test]
async fn put_rejects_duplicate_item_ids() {
    let response = put_json(
        build_test_app(),
        "/api/v1/invitations/mina-and-jae/override",
        json!({"lyrics": [
            {"id": "7", "time": 0, "text": "a"},
            {"id": "7", "time": 5, "text": "b"}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("lyrics"));
}

#[tokio::test]
async fn put_store_failure_is_500() {
    let app = build_test_app_with(Arc::new(BrokenStore), Arc::new(MemoryMediaCatalog::new()));
    let response = put_json(
        app,
        "/api/v1/invitations/mina-and-jae/override",
        json!({"greeting": "hi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// GET /api/v1/invitations/{owner_key}/media
// ---------------------------------------------------------------------------

#[tokio::test]
async fn media_lists_owner_assets_with_kind_filter() {
    let catalog = MemoryMediaCatalog::new().with_assets(
        owner(),
        vec![
            asset("cover", MediaKind::Image),
            asset("song", MediaKind::Audio),
            asset("film", MediaKind::Video),
        ],
    );
    let app = build_test_app_with(Arc::new(MemoryOverrideStore::new()), Arc::new(catalog));

    let json = body_json(get(app.clone(), "/api/v1/invitations/mina-and-jae/media").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let json = body_json(get(app.clone(), "/api/v1/invitations/mina-and-jae/media?kind=audio").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "song");
    assert_eq!(data[0]["kind"], "audio");

    let json = body_json(get(app, "/api/v1/invitations/someone-else/media").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn media_rejects_unknown_kind() {
    let response = get(build_test_app(), "/api/v1/invitations/mina-and-jae/media?kind=pdf").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
