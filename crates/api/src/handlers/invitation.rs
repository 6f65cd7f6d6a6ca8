//! Handlers for invitations, their overrides and the owner's media.
//!
//! Routes are keyed by `{owner_key}`; an invalid key is a 400.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use vowpage_core::invitation::{validate_override, InvitationConfig, InvitationOverride};
use vowpage_core::media::{filter_by_kind, MediaAsset, MediaKind};
use vowpage_core::overlay::{field_sources, merge, FieldProvenance};
use vowpage_core::types::OwnerKey;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The rendered invitation plus where each field came from.
#[derive(Debug, Serialize)]
pub struct InvitationView {
    pub owner_key: OwnerKey,
    pub config: InvitationConfig,
    pub sources: Vec<FieldProvenance>,
    pub has_override: bool,
}

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/invitations/{owner_key}
///
/// Effective configuration: the owner's override merged over the template.
/// An owner without an override gets the template as-is.
pub async fn get_invitation(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerKey::parse(&owner_key)?;
    let stored = state.store.load(&owner).await?;
    let has_override = stored.is_some();
    let ovr = stored.unwrap_or_default();

    let view = InvitationView {
        config: merge(&state.template, &ovr),
        sources: field_sources(&ovr),
        owner_key: owner,
        has_override,
    };
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/invitations/{owner_key}/override
///
/// The stored override record, or 204 when the owner never saved one.
pub async fn get_override(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
) -> AppResult<Response> {
    let owner = OwnerKey::parse(&owner_key)?;
    match state.store.load(&owner).await? {
        Some(ovr) => Ok(Json(DataResponse { data: ovr }).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// PUT /api/v1/invitations/{owner_key}/override
///
/// Replace the whole override. The record is validated, empty lists are
/// dropped, and the stored form is returned.
pub async fn put_override(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
    Json(body): Json<InvitationOverride>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerKey::parse(&owner_key)?;
    validate_override(&body)?;

    let record = body.normalized();
    state.store.save(&owner, &record).await?;

    tracing::info!(owner_key = %owner, "Invitation override saved");
    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/invitations/{owner_key}/media?kind=image
///
/// The owner's media assets, optionally filtered to one kind.
pub async fn list_media(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
    Query(params): Query<MediaQuery>,
) -> AppResult<impl IntoResponse> {
    let owner = OwnerKey::parse(&owner_key)?;
    let kind = params.kind.as_deref().map(MediaKind::parse).transpose()?;

    let assets: Vec<MediaAsset> = filter_by_kind(state.catalog.list(&owner).await?, kind);
    Ok(Json(DataResponse { data: assets }))
}
