//! Persistence boundary for override records.
//!
//! A save writes the whole record in one step; there is no partial-field
//! save and no concurrency check, so the last writer wins. Empty lists are
//! stored as absence (see [`InvitationOverride::normalized`]).

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::invitation::InvitationOverride;
use crate::types::OwnerKey;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored record is malformed: {0}")]
    Malformed(String),
}

/// Loads and saves override records keyed by owner.
#[async_trait::async_trait]
pub trait OverrideStore: Send + Sync {
    /// `Ok(None)` when the owner has never saved an override.
    async fn load(&self, owner: &OwnerKey) -> Result<Option<InvitationOverride>, StoreError>;

    /// Replace the owner's record with `record`.
    async fn save(&self, owner: &OwnerKey, record: &InvitationOverride) -> Result<(), StoreError>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-process store holding records in their normalized storage form.
#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    records: RwLock<HashMap<OwnerKey, InvitationOverride>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OverrideStore for MemoryOverrideStore {
    async fn load(&self, owner: &OwnerKey) -> Result<Option<InvitationOverride>, StoreError> {
        Ok(self.records.read().await.get(owner).cloned())
    }

    async fn save(&self, owner: &OwnerKey, record: &InvitationOverride) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(owner.clone(), record.clone().normalized());
        Ok(())
    }
}
