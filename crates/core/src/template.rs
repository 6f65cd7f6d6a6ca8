//! Template defaults: the built-in "classic" invitation and loading a
//! template from a JSON file.

use std::path::Path;

use crate::content::{
    DonationAccount, EventItem, GalleryPhoto, ItemId, LyricMarker, StoryEntry,
};
use crate::error::CoreError;
use crate::invitation::InvitationConfig;

/// The default invitation shipped with the service.
pub fn builtin_template() -> InvitationConfig {
    InvitationConfig {
        groom_name: "Daniel".to_string(),
        bride_name: "Sophia".to_string(),
        groom_parents: "Mr. & Mrs. Park".to_string(),
        bride_parents: "Mr. & Mrs. Choi".to_string(),
        wedding_date: "2026-05-16".to_string(),
        wedding_time: "12:30".to_string(),
        venue_name: "The Garden Hall".to_string(),
        venue_address: "21 Riverside Road, Seoul".to_string(),
        map_url: "https://maps.example.com/?q=The+Garden+Hall".to_string(),
        greeting: "Two hearts, one promise. We would be honored to celebrate the \
                   beginning of our new life together with you."
            .to_string(),
        closing_message: "Thank you for being part of our story.".to_string(),
        primary_color: "#b76e79".to_string(),
        accent_color: "#f7e7ce".to_string(),
        cover_image_url: "/templates/classic/cover.jpg".to_string(),
        video_url: "/templates/classic/film.mp4".to_string(),
        music_url: "/templates/classic/theme.mp3".to_string(),
        music_title: "Our Song".to_string(),
        events: vec![
            EventItem {
                id: ItemId::new("event-ceremony"),
                title: "Ceremony".to_string(),
                time: "12:30".to_string(),
                location: "Garden Lawn".to_string(),
                address: "21 Riverside Road, Seoul".to_string(),
                description: "Please be seated by 12:20.".to_string(),
            },
            EventItem {
                id: ItemId::new("event-reception"),
                title: "Reception".to_string(),
                time: "14:00".to_string(),
                location: "Crystal Ballroom".to_string(),
                address: "21 Riverside Road, Seoul".to_string(),
                description: "Lunch buffet and toasts.".to_string(),
            },
        ],
        story: vec![
            StoryEntry {
                id: ItemId::new("story-met"),
                title: "First Meeting".to_string(),
                date: "2019-09".to_string(),
                description: "A rainy afternoon and one shared umbrella.".to_string(),
                image_url: "/templates/classic/story-1.jpg".to_string(),
            },
            StoryEntry {
                id: ItemId::new("story-proposal"),
                title: "The Proposal".to_string(),
                date: "2025-06".to_string(),
                description: "By the sea, at sunset.".to_string(),
                image_url: "/templates/classic/story-2.jpg".to_string(),
            },
        ],
        gallery: (1..=4)
            .map(|n| GalleryPhoto {
                id: ItemId::new(format!("gallery-{n}")),
                url: format!("/templates/classic/gallery-{n}.jpg"),
                caption: String::new(),
            })
            .collect(),
        donations: vec![DonationAccount {
            id: ItemId::new("account-groom"),
            label: "Groom".to_string(),
            bank_name: "Hana Bank".to_string(),
            account_number: "000-000000-00000".to_string(),
            account_holder: "Daniel Park".to_string(),
        }],
        lyrics: vec![
            LyricMarker {
                id: ItemId::new("lyric-1"),
                time: 0,
                text: "Every love story is beautiful".to_string(),
            },
            LyricMarker {
                id: ItemId::new("lyric-2"),
                time: 12,
                text: "but ours is my favorite".to_string(),
            },
            LyricMarker {
                id: ItemId::new("lyric-3"),
                time: 25,
                text: "and it is only beginning".to_string(),
            },
        ],
    }
}

/// Parse and validate a template from JSON text.
///
/// Every scalar must be non-empty; lists may be empty.
pub fn parse_template(json: &str) -> Result<InvitationConfig, CoreError> {
    let config: InvitationConfig = serde_json::from_str(json)
        .map_err(|e| CoreError::Validation(format!("Malformed template: {e}")))?;

    let missing = config.missing_scalars();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
        return Err(CoreError::Validation(format!(
            "Template leaves fields empty: {}",
            names.join(", ")
        )));
    }
    Ok(config)
}

/// Read a template file from disk.
pub fn load_template(path: &Path) -> Result<InvitationConfig, CoreError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Internal(format!("Failed to read template {}: {e}", path.display()))
    })?;
    parse_template(&json)
}
