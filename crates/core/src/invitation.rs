//! Invitation configuration records: the fully populated template defaults
//! and the sparse per-owner override.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::content::{
    duplicate_ids, ContentItem, DonationAccount, EventItem, GalleryPhoto, LyricMarker,
    StoryEntry,
};
use crate::error::CoreError;
use crate::media::MediaKind;

/// Matches `#rgb` and `#rrggbb` color values.
static COLOR_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Scalar fields
// ---------------------------------------------------------------------------

/// Every scalar (single text value) field of an invitation.
///
/// The serialized name doubles as the storage column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    GroomName,
    BrideName,
    GroomParents,
    BrideParents,
    WeddingDate,
    WeddingTime,
    VenueName,
    VenueAddress,
    MapUrl,
    Greeting,
    ClosingMessage,
    PrimaryColor,
    AccentColor,
    CoverImageUrl,
    VideoUrl,
    MusicUrl,
    MusicTitle,
}

/// What a scalar field holds, for validation and media binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Color,
    Media(MediaKind),
}

impl ScalarField {
    pub const ALL: [ScalarField; 17] = [
        Self::GroomName,
        Self::BrideName,
        Self::GroomParents,
        Self::BrideParents,
        Self::WeddingDate,
        Self::WeddingTime,
        Self::VenueName,
        Self::VenueAddress,
        Self::MapUrl,
        Self::Greeting,
        Self::ClosingMessage,
        Self::PrimaryColor,
        Self::AccentColor,
        Self::CoverImageUrl,
        Self::VideoUrl,
        Self::MusicUrl,
        Self::MusicTitle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GroomName => "groom_name",
            Self::BrideName => "bride_name",
            Self::GroomParents => "groom_parents",
            Self::BrideParents => "bride_parents",
            Self::WeddingDate => "wedding_date",
            Self::WeddingTime => "wedding_time",
            Self::VenueName => "venue_name",
            Self::VenueAddress => "venue_address",
            Self::MapUrl => "map_url",
            Self::Greeting => "greeting",
            Self::ClosingMessage => "closing_message",
            Self::PrimaryColor => "primary_color",
            Self::AccentColor => "accent_color",
            Self::CoverImageUrl => "cover_image_url",
            Self::VideoUrl => "video_url",
            Self::MusicUrl => "music_url",
            Self::MusicTitle => "music_title",
        }
    }

    pub fn kind(self) -> ScalarKind {
        match self {
            Self::PrimaryColor | Self::AccentColor => ScalarKind::Color,
            Self::CoverImageUrl => ScalarKind::Media(MediaKind::Image),
            Self::VideoUrl => ScalarKind::Media(MediaKind::Video),
            Self::MusicUrl => ScalarKind::Media(MediaKind::Audio),
            _ => ScalarKind::Text,
        }
    }

    /// The kind of asset this field holds, if it holds a media URL.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self.kind() {
            ScalarKind::Media(kind) => Some(kind),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Effective / default configuration
// ---------------------------------------------------------------------------

/// A fully populated invitation, as supplied by a template or produced by
/// merging an override over one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationConfig {
    pub groom_name: String,
    pub bride_name: String,
    pub groom_parents: String,
    pub bride_parents: String,
    pub wedding_date: String,
    pub wedding_time: String,
    pub venue_name: String,
    pub venue_address: String,
    pub map_url: String,
    pub greeting: String,
    pub closing_message: String,
    pub primary_color: String,
    pub accent_color: String,
    pub cover_image_url: String,
    pub video_url: String,
    pub music_url: String,
    pub music_title: String,
    pub events: Vec<EventItem>,
    pub story: Vec<StoryEntry>,
    pub gallery: Vec<GalleryPhoto>,
    pub donations: Vec<DonationAccount>,
    pub lyrics: Vec<LyricMarker>,
}

impl InvitationConfig {
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::GroomName => &self.groom_name,
            ScalarField::BrideName => &self.bride_name,
            ScalarField::GroomParents => &self.groom_parents,
            ScalarField::BrideParents => &self.bride_parents,
            ScalarField::WeddingDate => &self.wedding_date,
            ScalarField::WeddingTime => &self.wedding_time,
            ScalarField::VenueName => &self.venue_name,
            ScalarField::VenueAddress => &self.venue_address,
            ScalarField::MapUrl => &self.map_url,
            ScalarField::Greeting => &self.greeting,
            ScalarField::ClosingMessage => &self.closing_message,
            ScalarField::PrimaryColor => &self.primary_color,
            ScalarField::AccentColor => &self.accent_color,
            ScalarField::CoverImageUrl => &self.cover_image_url,
            ScalarField::VideoUrl => &self.video_url,
            ScalarField::MusicUrl => &self.music_url,
            ScalarField::MusicTitle => &self.music_title,
        }
    }

    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::GroomName => &mut self.groom_name,
            ScalarField::BrideName => &mut self.bride_name,
            ScalarField::GroomParents => &mut self.groom_parents,
            ScalarField::BrideParents => &mut self.bride_parents,
            ScalarField::WeddingDate => &mut self.wedding_date,
            ScalarField::WeddingTime => &mut self.wedding_time,
            ScalarField::VenueName => &mut self.venue_name,
            ScalarField::VenueAddress => &mut self.venue_address,
            ScalarField::MapUrl => &mut self.map_url,
            ScalarField::Greeting => &mut self.greeting,
            ScalarField::ClosingMessage => &mut self.closing_message,
            ScalarField::PrimaryColor => &mut self.primary_color,
            ScalarField::AccentColor => &mut self.accent_color,
            ScalarField::CoverImageUrl => &mut self.cover_image_url,
            ScalarField::VideoUrl => &mut self.video_url,
            ScalarField::MusicUrl => &mut self.music_url,
            ScalarField::MusicTitle => &mut self.music_title,
        }
    }

    /// Scalar fields holding an empty string. A template must have none.
    pub fn missing_scalars(&self) -> Vec<ScalarField> {
        ScalarField::ALL
            .into_iter()
            .filter(|f| self.scalar(*f).is_empty())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Override record
// ---------------------------------------------------------------------------

/// The sparse per-owner customization. `None` means "not overridden".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationOverride {
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
    pub events: Option<Vec<EventItem>>,
    pub story: Option<Vec<StoryEntry>>,
    pub gallery: Option<Vec<GalleryPhoto>>,
    pub donations: Option<Vec<DonationAccount>>,
    pub lyrics: Option<Vec<LyricMarker>>,
}

impl InvitationOverride {
    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        self.scalar_slot(field).as_deref()
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: Option<String>) {
        *self.scalar_slot_mut(field) = value;
    }

    fn scalar_slot(&self, field: ScalarField) -> &Option<String> {
        match field {
            ScalarField::GroomName => &self.groom_name,
            ScalarField::BrideName => &self.bride_name,
            ScalarField::GroomParents => &self.groom_parents,
            ScalarField::BrideParents => &self.bride_parents,
            ScalarField::WeddingDate => &self.wedding_date,
            ScalarField::WeddingTime => &self.wedding_time,
            ScalarField::VenueName => &self.venue_name,
            ScalarField::VenueAddress => &self.venue_address,
            ScalarField::MapUrl => &self.map_url,
            ScalarField::Greeting => &self.greeting,
            ScalarField::ClosingMessage => &self.closing_message,
            ScalarField::PrimaryColor => &self.primary_color,
            ScalarField::AccentColor => &self.accent_color,
            ScalarField::CoverImageUrl => &self.cover_image_url,
            ScalarField::VideoUrl => &self.video_url,
            ScalarField::MusicUrl => &self.music_url,
            ScalarField::MusicTitle => &self.music_title,
        }
    }

    fn scalar_slot_mut(&mut self, field: ScalarField) -> &mut Option<String> {
        match field {
            ScalarField::GroomName => &mut self.groom_name,
            ScalarField::BrideName => &mut self.bride_name,
            ScalarField::GroomParents => &mut self.groom_parents,
            ScalarField::BrideParents => &mut self.bride_parents,
            ScalarField::WeddingDate => &mut self.wedding_date,
            ScalarField::WeddingTime => &mut self.wedding_time,
            ScalarField::VenueName => &mut self.venue_name,
            ScalarField::VenueAddress => &mut self.venue_address,
            ScalarField::MapUrl => &mut self.map_url,
            ScalarField::Greeting => &mut self.greeting,
            ScalarField::ClosingMessage => &mut self.closing_message,
            ScalarField::PrimaryColor => &mut self.primary_color,
            ScalarField::AccentColor => &mut self.accent_color,
            ScalarField::CoverImageUrl => &mut self.cover_image_url,
            ScalarField::VideoUrl => &mut self.video_url,
            ScalarField::MusicUrl => &mut self.music_url,
            ScalarField::MusicTitle => &mut self.music_title,
        }
    }

    /// The storage form: empty lists become absent.
    ///
    /// Scalars are kept as-is; an empty scalar already behaves as "not
    /// overridden" when merged.
    pub fn normalized(mut self) -> Self {
        fn drop_empty<T>(list: &mut Option<Vec<T>>) {
            if list.as_ref().is_some_and(|l| l.is_empty()) {
                *list = None;
            }
        }
        drop_empty(&mut self.events);
        drop_empty(&mut self.story);
        drop_empty(&mut self.gallery);
        drop_empty(&mut self.donations);
        drop_empty(&mut self.lyrics);
        self
    }
}

/// Re-express an effective configuration as an override that sets every field.
impl From<InvitationConfig> for InvitationOverride {
    fn from(config: InvitationConfig) -> Self {
        let mut ovr = InvitationOverride::default();
        for field in ScalarField::ALL {
            ovr.set_scalar(field, Some(config.scalar(field).to_string()));
        }
        ovr.events = Some(config.events);
        ovr.story = Some(config.story);
        ovr.gallery = Some(config.gallery);
        ovr.donations = Some(config.donations);
        ovr.lyrics = Some(config.lyrics);
        ovr
    }
}

// ---------------------------------------------------------------------------
// List slots
// ---------------------------------------------------------------------------

/// Locates the list of one item type on both configuration records.
pub trait ListSlot: ContentItem {
    fn in_config(config: &InvitationConfig) -> &Vec<Self>;
    fn in_override(ovr: &InvitationOverride) -> &Option<Vec<Self>>;
    fn in_override_mut(ovr: &mut InvitationOverride) -> &mut Option<Vec<Self>>;
}

macro_rules! list_slot {
    ($item:ty, $field:ident) => {
        impl ListSlot for $item {
            fn in_config(config: &InvitationConfig) -> &Vec<Self> {
                &config.$field
            }

            fn in_override(ovr: &InvitationOverride) -> &Option<Vec<Self>> {
                &ovr.$field
            }

            fn in_override_mut(ovr: &mut InvitationOverride) -> &mut Option<Vec<Self>> {
                &mut ovr.$field
            }
        }
    };
}

list_slot!(EventItem, events);
list_slot!(StoryEntry, story);
list_slot!(GalleryPhoto, gallery);
list_slot!(DonationAccount, donations);
list_slot!(LyricMarker, lyrics);

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an override before it is saved.
///
/// - Color fields, when non-empty, must be `#rgb` or `#rrggbb`.
/// - Item ids must be unique within each list.
pub fn validate_override(ovr: &InvitationOverride) -> Result<(), CoreError> {
    for field in ScalarField::ALL {
        if field.kind() != ScalarKind::Color {
            continue;
        }
        if let Some(value) = ovr.scalar(field).filter(|v| !v.is_empty()) {
            if !COLOR_RE.is_match(value) {
                return Err(CoreError::Validation(format!(
                    "Invalid color '{value}' for {}. Expected #rgb or #rrggbb",
                    field.as_str()
                )));
            }
        }
    }

    check_unique_ids::<EventItem>(ovr)?;
    check_unique_ids::<StoryEntry>(ovr)?;
    check_unique_ids::<GalleryPhoto>(ovr)?;
    check_unique_ids::<DonationAccount>(ovr)?;
    check_unique_ids::<LyricMarker>(ovr)?;
    Ok(())
}

fn check_unique_ids<T: ListSlot>(ovr: &InvitationOverride) -> Result<(), CoreError> {
    let Some(list) = T::in_override(ovr) else {
        return Ok(());
    };
    let dupes = duplicate_ids(list);
    if dupes.is_empty() {
        return Ok(());
    }
    let ids: Vec<&str> = dupes.iter().map(|id| id.as_str()).collect();
    Err(CoreError::Validation(format!(
        "Duplicate item ids in {}: {}",
        T::LIST.as_str(),
        ids.join(", ")
    )))
}
