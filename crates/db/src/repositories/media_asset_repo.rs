//! Repository for the `media_assets` table.

use sqlx::PgPool;

use crate::models::media_asset::{CreateMediaAsset, MediaAssetRow};

/// Column list for the `media_assets` table.
const COLUMNS: &str = "id, owner_key, url, kind, name, size_bytes, created_at";

/// Provides data access for the media catalog.
pub struct MediaAssetRepo;

impl MediaAssetRepo {
    /// List an owner's assets, oldest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Vec<MediaAssetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets WHERE owner_key = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, MediaAssetRow>(&query)
            .bind(owner_key)
            .fetch_all(pool)
            .await
    }

    /// Register an uploaded asset.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaAsset,
    ) -> Result<MediaAssetRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets (owner_key, url, kind, name, size_bytes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAssetRow>(&query)
            .bind(&input.owner_key)
            .bind(&input.url)
            .bind(&input.kind)
            .bind(&input.name)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }
}
