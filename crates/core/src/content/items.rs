//! The five content item variants and their editable fields.

use serde::{Deserialize, Serialize};

use super::{ContentItem, ItemId, ListKind};
use crate::media::MediaKind;
use crate::time_code::parse_timestamp;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A scheduled part of the day (ceremony, reception, after party).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: ItemId,
    pub title: String,
    pub time: String,
    pub location: String,
    pub address: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Title,
    Time,
    Location,
    Address,
    Description,
}

impl ContentItem for EventItem {
    type Field = EventField;
    const LIST: ListKind = ListKind::Events;

    fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            title: String::new(),
            time: String::new(),
            location: String::new(),
            address: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_field(&mut self, field: EventField, value: &str) {
        let slot = match field {
            EventField::Title => &mut self.title,
            EventField::Time => &mut self.time,
            EventField::Location => &mut self.location,
            EventField::Address => &mut self.address,
            EventField::Description => &mut self.description,
        };
        *slot = value.to_string();
    }
}

// ---------------------------------------------------------------------------
// Story
// ---------------------------------------------------------------------------

/// One chapter of the couple's story timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEntry {
    pub id: ItemId,
    pub title: String,
    pub date: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryField {
    Title,
    Date,
    Description,
    ImageUrl,
}

impl ContentItem for StoryEntry {
    type Field = StoryField;
    const LIST: ListKind = ListKind::Story;

    fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            title: String::new(),
            date: String::new(),
            description: String::new(),
            image_url: String::new(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_field(&mut self, field: StoryField, value: &str) {
        let slot = match field {
            StoryField::Title => &mut self.title,
            StoryField::Date => &mut self.date,
            StoryField::Description => &mut self.description,
            StoryField::ImageUrl => &mut self.image_url,
        };
        *slot = value.to_string();
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: ItemId,
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryField {
    Url,
    Caption,
}

impl ContentItem for GalleryPhoto {
    type Field = GalleryField;
    const LIST: ListKind = ListKind::Gallery;

    fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            url: String::new(),
            caption: String::new(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_field(&mut self, field: GalleryField, value: &str) {
        match field {
            GalleryField::Url => self.url = value.to_string(),
            GalleryField::Caption => self.caption = value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

/// A bank account guests can send a gift to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationAccount {
    pub id: ItemId,
    /// Whose side the account belongs to, e.g. "Groom's father".
    pub label: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationField {
    Label,
    BankName,
    AccountNumber,
    AccountHolder,
}

impl ContentItem for DonationAccount {
    type Field = DonationField;
    const LIST: ListKind = ListKind::Donations;

    fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            label: String::new(),
            bank_name: String::new(),
            account_number: String::new(),
            account_holder: String::new(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_field(&mut self, field: DonationField, value: &str) {
        let slot = match field {
            DonationField::Label => &mut self.label,
            DonationField::BankName => &mut self.bank_name,
            DonationField::AccountNumber => &mut self.account_number,
            DonationField::AccountHolder => &mut self.account_holder,
        };
        *slot = value.to_string();
    }
}

// ---------------------------------------------------------------------------
// Lyrics
// ---------------------------------------------------------------------------

/// A line of text shown once playback reaches `time` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricMarker {
    pub id: ItemId,
    pub time: u32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricField {
    /// Set from `MM:SS` or plain-seconds text.
    Time,
    Text,
}

impl ContentItem for LyricMarker {
    type Field = LyricField;
    const LIST: ListKind = ListKind::Lyrics;

    fn with_defaults(id: ItemId) -> Self {
        Self {
            id,
            time: 0,
            text: String::new(),
        }
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_field(&mut self, field: LyricField, value: &str) {
        match field {
            LyricField::Time => self.time = parse_timestamp(value),
            LyricField::Text => self.text = value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field addressing across lists
// ---------------------------------------------------------------------------

/// A field of an item in any list, tagged with the list it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "list", content = "field", rename_all = "snake_case")]
pub enum ItemField {
    Events(EventField),
    Story(StoryField),
    Gallery(GalleryField),
    Donations(DonationField),
    Lyrics(LyricField),
}

impl ItemField {
    pub fn list(self) -> ListKind {
        match self {
            Self::Events(_) => ListKind::Events,
            Self::Story(_) => ListKind::Story,
            Self::Gallery(_) => ListKind::Gallery,
            Self::Donations(_) => ListKind::Donations,
            Self::Lyrics(_) => ListKind::Lyrics,
        }
    }

    /// The kind of asset this field holds, if it holds a media URL.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            Self::Story(StoryField::ImageUrl) | Self::Gallery(GalleryField::Url) => {
                Some(MediaKind::Image)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lyric_time_is_parsed_from_text() {
        let mut marker = LyricMarker::with_defaults(ItemId::new("1"));
        marker.set_field(LyricField::Time, "01:30");
        assert_eq!(marker.time, 90);
        marker.set_field(LyricField::Time, "garbage");
        assert_eq!(marker.time, 0);
    }

    #[test]
    fn set_field_touches_only_that_field() {
        let mut event = EventItem::with_defaults(ItemId::new("7"));
        event.set_field(EventField::Location, "Garden Hall");
        assert_eq!(event.location, "Garden Hall");
        assert!(event.title.is_empty());
        assert!(event.address.is_empty());
        assert_eq!(event.id, ItemId::new("7"));
    }

    #[test]
    fn item_field_reports_list_and_media_kind() {
        let field = ItemField::Gallery(GalleryField::Url);
        assert_eq!(field.list(), ListKind::Gallery);
        assert_eq!(field.media_kind(), Some(MediaKind::Image));
        assert_eq!(ItemField::Story(StoryField::ImageUrl).media_kind(), Some(MediaKind::Image));
        assert_eq!(ItemField::Events(EventField::Title).media_kind(), None);
        assert_eq!(ItemField::Lyrics(LyricField::Text).list(), ListKind::Lyrics);
    }

    #[test]
    fn item_field_serializes_tagged() {
        let json = serde_json::to_value(ItemField::Story(StoryField::ImageUrl)).unwrap();
        assert_eq!(json, serde_json::json!({"list": "story", "field": "image_url"}));
    }
}
