//! Media asset row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vowpage_core::media::{MediaAsset, MediaKind};
use vowpage_core::store::StoreError;
use vowpage_core::types::{DbId, Timestamp};

/// A row from the `media_assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAssetRow {
    pub id: DbId,
    pub owner_key: String,
    pub url: String,
    pub kind: String,
    pub name: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for registering an uploaded asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaAsset {
    pub owner_key: String,
    pub url: String,
    pub kind: String,
    pub name: String,
    pub size_bytes: i64,
}

impl MediaAssetRow {
    pub fn into_asset(self) -> Result<MediaAsset, StoreError> {
        let kind = MediaKind::parse(&self.kind).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let size_bytes = u64::try_from(self.size_bytes).map_err(|_| {
            StoreError::Malformed(format!(
                "Negative size {} for media asset {}",
                self.size_bytes, self.id
            ))
        })?;
        Ok(MediaAsset {
            id: self.id.to_string(),
            url: self.url,
            kind,
            name: self.name,
            size_bytes,
        })
    }
}
