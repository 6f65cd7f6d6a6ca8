//! Invitation override row and its conversion to and from the domain record.
//!
//! Scalars map one-to-one onto TEXT columns named after the field. Lists are
//! JSONB arrays; an absent or empty list is stored as NULL.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::FromRow;
use vowpage_core::content::ListKind;
use vowpage_core::invitation::{InvitationOverride, ScalarField};
use vowpage_core::store::StoreError;
use vowpage_core::types::{DbId, Timestamp};

/// A row from the `invitation_overrides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvitationOverrideRow {
    pub id: DbId,
    pub owner_key: String,
    pub groom_name: Option<String>,
    pub bride_name: Option<String>,
    pub groom_parents: Option<String>,
    pub bride_parents: Option<String>,
    pub wedding_date: Option<String>,
    pub wedding_time: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub map_url: Option<String>,
    pub greeting: Option<String>,
    pub closing_message: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub cover_image_url: Option<String>,
    pub video_url: Option<String>,
    pub music_url: Option<String>,
    pub music_title: Option<String>,
    pub events: Option<serde_json::Value>,
    pub story: Option<serde_json::Value>,
    pub gallery: Option<serde_json::Value>,
    pub donations: Option<serde_json::Value>,
    pub lyrics: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InvitationOverrideRow {
    /// Decode the row into the domain record.
    pub fn into_override(self) -> Result<InvitationOverride, StoreError> {
        let ovr = InvitationOverride {
            groom_name: self.groom_name,
            bride_name: self.bride_name,
            groom_parents: self.groom_parents,
            bride_parents: self.bride_parents,
            wedding_date: self.wedding_date,
            wedding_time: self.wedding_time,
            venue_name: self.venue_name,
            venue_address: self.venue_address,
            map_url: self.map_url,
            greeting: self.greeting,
            closing_message: self.closing_message,
            primary_color: self.primary_color,
            accent_color: self.accent_color,
            cover_image_url: self.cover_image_url,
            video_url: self.video_url,
            music_url: self.music_url,
            music_title: self.music_title,
            events: decode_list(ListKind::Events, self.events)?,
            story: decode_list(ListKind::Story, self.story)?,
            gallery: decode_list(ListKind::Gallery, self.gallery)?,
            donations: decode_list(ListKind::Donations, self.donations)?,
            lyrics: decode_list(ListKind::Lyrics, self.lyrics)?,
        };
        Ok(ovr.normalized())
    }
}

/// Column values for an upsert.
///
/// `scalars` follows [`ScalarField::ALL`] and `lists` follows
/// [`ListKind::ALL`], matching the column order of the upsert statement.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideColumns {
    pub scalars: Vec<Option<String>>,
    pub lists: Vec<Option<serde_json::Value>>,
}

impl OverrideColumns {
    pub fn from_override(ovr: &InvitationOverride) -> Result<Self, StoreError> {
        let scalars = ScalarField::ALL
            .into_iter()
            .map(|field| ovr.scalar(field).map(str::to_string))
            .collect();

        let lists = ListKind::ALL
            .into_iter()
            .map(|kind| match kind {
                ListKind::Events => encode_list(kind, &ovr.events),
                ListKind::Story => encode_list(kind, &ovr.story),
                ListKind::Gallery => encode_list(kind, &ovr.gallery),
                ListKind::Donations => encode_list(kind, &ovr.donations),
                ListKind::Lyrics => encode_list(kind, &ovr.lyrics),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { scalars, lists })
    }
}

fn encode_list<T: Serialize>(
    kind: ListKind,
    list: &Option<Vec<T>>,
) -> Result<Option<serde_json::Value>, StoreError> {
    match list {
        Some(items) if !items.is_empty() => serde_json::to_value(items)
            .map(Some)
            .map_err(|e| StoreError::Malformed(format!("Cannot encode {}: {e}", kind.as_str()))),
        _ => Ok(None),
    }
}

fn decode_list<T: DeserializeOwned>(
    kind: ListKind,
    value: Option<serde_json::Value>,
) -> Result<Option<Vec<T>>, StoreError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Malformed(format!("Cannot decode {}: {e}", kind.as_str()))),
    }
}
