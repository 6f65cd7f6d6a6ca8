//! PostgreSQL implementations of the core persistence traits.

use vowpage_core::invitation::InvitationOverride;
use vowpage_core::media::{MediaAsset, MediaCatalog};
use vowpage_core::store::{OverrideStore, StoreError};
use vowpage_core::types::OwnerKey;

use crate::models::invitation_override::OverrideColumns;
use crate::repositories::{InvitationOverrideRepo, MediaAssetRepo};
use crate::DbPool;

fn backend_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Override store backed by the `invitation_overrides` table.
#[derive(Debug, Clone)]
pub struct PgOverrideStore {
    pool: DbPool,
}

impl PgOverrideStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OverrideStore for PgOverrideStore {
    async fn load(&self, owner: &OwnerKey) -> Result<Option<InvitationOverride>, StoreError> {
        InvitationOverrideRepo::find_by_owner(&self.pool, owner.as_str())
            .await
            .map_err(backend_error)?
            .map(|row| row.into_override())
            .transpose()
    }

    async fn save(&self, owner: &OwnerKey, record: &InvitationOverride) -> Result<(), StoreError> {
        let columns = OverrideColumns::from_override(record)?;
        let row = InvitationOverrideRepo::upsert(&self.pool, owner.as_str(), &columns)
            .await
            .map_err(backend_error)?;
        tracing::debug!(owner_key = %owner, row_id = row.id, "Override row upserted");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(backend_error)
    }
}

/// Media catalog backed by the `media_assets` table.
#[derive(Debug, Clone)]
pub struct PgMediaCatalog {
    pool: DbPool,
}

impl PgMediaCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MediaCatalog for PgMediaCatalog {
    async fn list(&self, owner: &OwnerKey) -> Result<Vec<MediaAsset>, StoreError> {
        MediaAssetRepo::list_for_owner(&self.pool, owner.as_str())
            .await
            .map_err(backend_error)?
            .into_iter()
            .map(|row| row.into_asset())
            .collect()
    }
}
