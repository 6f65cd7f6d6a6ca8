use std::sync::Arc;

use vowpage_core::invitation::InvitationConfig;
use vowpage_core::media::MediaCatalog;
use vowpage_core::store::OverrideStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Override persistence (PostgreSQL in production).
    pub store: Arc<dyn OverrideStore>,
    /// Media catalog used by the picker.
    pub catalog: Arc<dyn MediaCatalog>,
    /// Template defaults every override is merged over.
    pub template: Arc<InvitationConfig>,
    pub config: Arc<ServerConfig>,
}
