//! Multi-section editor session.
//!
//! A session loads one owner's override record once, applies every edit to an
//! in-memory draft and persists the whole draft on an explicit save. It also
//! owns the single pending media target used by the media picker and the
//! transient notifications shown after a save.

use serde::{Deserialize, Serialize};

use crate::content::{
    self, DonationAccount, EventItem, GalleryPhoto, IdGenerator, ItemField, ItemId, LyricMarker,
    StoryEntry,
};
use crate::error::CoreError;
use crate::invitation::{validate_override, InvitationConfig, InvitationOverride, ListSlot, ScalarField};
use crate::media::{filter_by_kind, MediaAsset, MediaCatalog, MediaKind};
use crate::overlay::merge;
use crate::store::OverrideStore;
use crate::types::{OwnerKey, Timestamp};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_SECS: i64 = 3;

/// Editor tabs. Selecting one has no effect on the draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Couple,
    Ceremony,
    Events,
    Story,
    Gallery,
    Gifts,
    Music,
    Theme,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Self::Couple,
        Self::Ceremony,
        Self::Events,
        Self::Story,
        Self::Gallery,
        Self::Gifts,
        Self::Music,
        Self::Theme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Couple => "couple",
            Self::Ceremony => "ceremony",
            Self::Events => "events",
            Self::Story => "story",
            Self::Gallery => "gallery",
            Self::Gifts => "gifts",
            Self::Music => "music",
            Self::Theme => "theme",
        }
    }
}

// ---------------------------------------------------------------------------
// Media target
// ---------------------------------------------------------------------------

/// The field a media picker selection will be written into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum MediaTarget {
    Scalar(ScalarField),
    ListItem { item_id: ItemId, field: ItemField },
}

impl MediaTarget {
    /// The asset kind the target field accepts, if it is a media field.
    pub fn expected_media_kind(&self) -> Option<MediaKind> {
        match self {
            Self::Scalar(field) => field.media_kind(),
            Self::ListItem { field, .. } => field.media_kind(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct EditorSession {
    owner: OwnerKey,
    defaults: InvitationConfig,
    draft: InvitationOverride,
    section: Section,
    pending_media: Option<MediaTarget>,
    notifications: Vec<Notification>,
    ids: IdGenerator,
    dirty: bool,
}

impl EditorSession {
    /// Load the owner's override and start a session over it.
    ///
    /// A missing record starts an empty draft. A failed load does the same
    /// and leaves an error notification behind.
    pub async fn open(
        store: &dyn OverrideStore,
        owner: OwnerKey,
        defaults: InvitationConfig,
    ) -> Self {
        let mut session = Self::with_draft(owner, defaults, InvitationOverride::default());
        match store.load(&session.owner).await {
            Ok(Some(record)) => session.draft = record,
            Ok(None) => {
                tracing::debug!(owner_key = %session.owner, "No override stored, starting empty");
            }
            Err(err) => {
                tracing::error!(owner_key = %session.owner, error = %err, "Failed to load override");
                session.notify(NoticeLevel::Error, format!("Could not load your invitation: {err}"));
            }
        }
        session
    }

    /// Start a session over an already loaded draft.
    pub fn with_draft(owner: OwnerKey, defaults: InvitationConfig, draft: InvitationOverride) -> Self {
        Self {
            owner,
            defaults,
            draft,
            section: Section::default(),
            pending_media: None,
            notifications: Vec::new(),
            ids: IdGenerator::new(),
            dirty: false,
        }
    }

    pub fn owner(&self) -> &OwnerKey {
        &self.owner
    }

    pub fn draft(&self) -> &InvitationOverride {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The configuration as it would render with the current draft.
    pub fn effective(&self) -> InvitationConfig {
        merge(&self.defaults, &self.draft)
    }

    // -- Sections --

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
    }

    // -- Scalars --

    /// The draft's value for `field`; empty when not overridden.
    pub fn scalar(&self, field: ScalarField) -> &str {
        self.draft.scalar(field).unwrap_or_default()
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: &str) {
        self.draft.set_scalar(field, Some(value.to_string()));
        self.dirty = true;
    }

    // -- Lists --

    /// The draft's list of `T`. An absent list reads as empty.
    pub fn list<T: ListSlot>(&self) -> &[T] {
        T::in_override(&self.draft).as_deref().unwrap_or_default()
    }

    /// Append a default item and return its id.
    pub fn add_item<T: ListSlot>(&mut self) -> ItemId {
        let (next, id) = content::add_item(self.list::<T>(), &self.ids);
        *T::in_override_mut(&mut self.draft) = Some(next);
        self.dirty = true;
        id
    }

    /// Update one field of the item matching `id`. A missing id leaves the
    /// draft untouched, including an absent list.
    pub fn update_item<T: ListSlot>(&mut self, id: &ItemId, field: T::Field, value: &str) {
        if content::find_item(self.list::<T>(), id).is_none() {
            return;
        }
        let next = content::update_item(self.list::<T>(), id, field, value);
        *T::in_override_mut(&mut self.draft) = Some(next);
        self.dirty = true;
    }

    /// Remove the item matching `id`; a missing id is a no-op.
    pub fn remove_item<T: ListSlot>(&mut self, id: &ItemId) {
        if content::find_item(self.list::<T>(), id).is_none() {
            return;
        }
        let next = content::remove_item(self.list::<T>(), id);
        *T::in_override_mut(&mut self.draft) = Some(next);
        self.dirty = true;
    }

    /// Update a field addressed across lists.
    pub fn update_item_field(&mut self, id: &ItemId, field: ItemField, value: &str) {
        match field {
            ItemField::Events(f) => self.update_item::<EventItem>(id, f, value),
            ItemField::Story(f) => self.update_item::<StoryEntry>(id, f, value),
            ItemField::Gallery(f) => self.update_item::<GalleryPhoto>(id, f, value),
            ItemField::Donations(f) => self.update_item::<DonationAccount>(id, f, value),
            ItemField::Lyrics(f) => self.update_item::<LyricMarker>(id, f, value),
        }
    }

    // -- Media binding --

    /// Remember which field the next picked asset goes into, replacing any
    /// earlier choice.
    pub fn choose_media_target(&mut self, target: MediaTarget) {
        self.pending_media = Some(target);
    }

    pub fn cancel_media_target(&mut self) {
        self.pending_media = None;
    }

    pub fn pending_media_target(&self) -> Option<&MediaTarget> {
        self.pending_media.as_ref()
    }

    /// Write `url` into the pending target and clear it.
    ///
    /// Returns `false` when no target is pending.
    pub fn resolve_media(&mut self, url: &str) -> bool {
        let Some(target) = self.pending_media.take() else {
            return false;
        };
        match target {
            MediaTarget::Scalar(field) => self.set_scalar(field, url),
            MediaTarget::ListItem { item_id, field } => self.update_item_field(&item_id, field, url),
        }
        true
    }

    /// Bind a catalog asset, checking its kind against the target field.
    ///
    /// On a kind mismatch the target stays pending so another asset can be
    /// picked.
    pub fn resolve_media_asset(&mut self, asset: &MediaAsset) -> Result<bool, CoreError> {
        let expected = self
            .pending_media
            .as_ref()
            .and_then(MediaTarget::expected_media_kind);
        if let Some(expected) = expected {
            if asset.kind != expected {
                return Err(CoreError::Validation(format!(
                    "Expected a {} asset, got {} '{}'",
                    expected.as_str(),
                    asset.kind.as_str(),
                    asset.name
                )));
            }
        }
        Ok(self.resolve_media(&asset.url))
    }

    /// Assets the owner can pick for the pending target.
    ///
    /// A catalog failure yields an empty list and an error notification.
    pub async fn list_media(&mut self, catalog: &dyn MediaCatalog) -> Vec<MediaAsset> {
        let kind = self
            .pending_media
            .as_ref()
            .and_then(MediaTarget::expected_media_kind);
        match catalog.list(&self.owner).await {
            Ok(assets) => filter_by_kind(assets, kind),
            Err(err) => {
                tracing::warn!(owner_key = %self.owner, error = %err, "Failed to list media");
                self.notify(NoticeLevel::Error, format!("Could not load media: {err}"));
                Vec::new()
            }
        }
    }

    // -- Persistence --

    /// Validate and persist the whole draft.
    ///
    /// On failure the draft is left untouched and an error notification is
    /// raised.
    pub async fn save(&mut self, store: &dyn OverrideStore) -> Result<(), CoreError> {
        let record = self.draft.clone().normalized();
        if let Err(err) = validate_override(&record) {
            self.notify(NoticeLevel::Error, err.to_string());
            return Err(err);
        }

        match store.save(&self.owner, &record).await {
            Ok(()) => {
                tracing::info!(owner_key = %self.owner, "Invitation saved");
                self.dirty = false;
                self.notify(NoticeLevel::Info, "Saved".to_string());
                Ok(())
            }
            Err(err) => {
                tracing::error!(owner_key = %self.owner, error = %err, "Failed to save invitation");
                self.notify(NoticeLevel::Error, format!("Save failed: {err}"));
                Err(err.into())
            }
        }
    }

    // -- Notifications --

    /// Live notifications at `now`; expired ones are dropped.
    pub fn notifications(&mut self, now: Timestamp) -> &[Notification] {
        self.notifications.retain(|n| n.expires_at > now);
        &self.notifications
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        let expires_at = chrono::Utc::now() + chrono::TimeDelta::seconds(NOTIFICATION_TTL_SECS);
        self.notifications.push(Notification {
            level,
            message,
            expires_at,
        });
    }
}
