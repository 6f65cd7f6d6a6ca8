//! Route definitions for invitations.

use axum::routing::get;
use axum::Router;

use crate::handlers::invitation;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// GET    /invitations/{owner_key}              -> get_invitation
/// GET    /invitations/{owner_key}/override     -> get_override
/// PUT    /invitations/{owner_key}/override     -> put_override
/// GET    /invitations/{owner_key}/media        -> list_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invitations/{owner_key}", get(invitation::get_invitation))
        .route(
            "/invitations/{owner_key}/override",
            get(invitation::get_override).put(invitation::put_override),
        )
        .route("/invitations/{owner_key}/media", get(invitation::list_media))
}
