pub mod health;
pub mod invitation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /invitations/{owner_key}              effective configuration + provenance
/// /invitations/{owner_key}/override     get, replace the stored override
/// /invitations/{owner_key}/media        media catalog (?kind=image|video|audio)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(invitation::router())
}
