//! Media catalog types and the catalog boundary.
//!
//! Uploading is handled elsewhere; the editor only enumerates what already
//! exists for an owner and binds a chosen URL into a field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::StoreError;
use crate::types::OwnerKey;

pub const KIND_IMAGE: &str = "image";
pub const KIND_VIDEO: &str = "video";
pub const KIND_AUDIO: &str = "audio";

pub const VALID_MEDIA_KINDS: &[&str] = &[KIND_IMAGE, KIND_VIDEO, KIND_AUDIO];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            KIND_IMAGE => Ok(Self::Image),
            KIND_VIDEO => Ok(Self::Video),
            KIND_AUDIO => Ok(Self::Audio),
            _ => Err(CoreError::Validation(format!(
                "Invalid media kind '{s}'. Must be one of: {}",
                VALID_MEDIA_KINDS.join(", ")
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => KIND_IMAGE,
            Self::Video => KIND_VIDEO,
            Self::Audio => KIND_AUDIO,
        }
    }
}

/// One asset available for binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub url: String,
    pub kind: MediaKind,
    pub name: String,
    pub size_bytes: u64,
}

/// Keep only the assets of `kind`, or all of them when `kind` is `None`.
pub fn filter_by_kind(assets: Vec<MediaAsset>, kind: Option<MediaKind>) -> Vec<MediaAsset> {
    match kind {
        Some(kind) => assets.into_iter().filter(|a| a.kind == kind).collect(),
        None => assets,
    }
}

/// Enumerates the media assets an owner can bind.
#[async_trait::async_trait]
pub trait MediaCatalog: Send + Sync {
    async fn list(&self, owner: &OwnerKey) -> Result<Vec<MediaAsset>, StoreError>;
}

/// Catalog backed by a fixed in-process map.
#[derive(Debug, Default)]
pub struct MemoryMediaCatalog {
    assets: HashMap<OwnerKey, Vec<MediaAsset>>,
}

impl MemoryMediaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(mut self, owner: OwnerKey, assets: Vec<MediaAsset>) -> Self {
        self.assets.entry(owner).or_default().extend(assets);
        self
    }
}

#[async_trait::async_trait]
impl MediaCatalog for MemoryMediaCatalog {
    async fn list(&self, owner: &OwnerKey) -> Result<Vec<MediaAsset>, StoreError> {
        Ok(self.assets.get(owner).cloned().unwrap_or_default())
    }
}
