//! Overlay of a per-owner override on top of template defaults.
//!
//! Two-level inheritance: template default -> owner override. Scalars fall
//! back field by field; lists are replaced wholesale, never combined.
//!
//! An override scalar holding `""` is treated as "not overridden", so an
//! owner cannot blank a field the template fills in.

use serde::Serialize;

use crate::content::ListKind;
use crate::invitation::{InvitationConfig, InvitationOverride, ScalarField};

/// Where an effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Default,
    Override,
}

/// Provenance of one effective field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProvenance {
    pub field: &'static str,
    pub source: FieldSource,
}

/// Compute the effective configuration.
pub fn merge(default: &InvitationConfig, ovr: &InvitationOverride) -> InvitationConfig {
    let mut effective = default.clone();

    for field in ScalarField::ALL {
        if let Some(value) = overriding_scalar(ovr, field) {
            *effective.scalar_mut(field) = value.to_string();
        }
    }

    if let Some(events) = &ovr.events {
        effective.events = events.clone();
    }
    if let Some(story) = &ovr.story {
        effective.story = story.clone();
    }
    if let Some(gallery) = &ovr.gallery {
        effective.gallery = gallery.clone();
    }
    if let Some(donations) = &ovr.donations {
        effective.donations = donations.clone();
    }
    if let Some(lyrics) = &ovr.lyrics {
        effective.lyrics = lyrics.clone();
    }

    effective
}

/// Report, for every scalar and list field, which level supplied its value.
pub fn field_sources(ovr: &InvitationOverride) -> Vec<FieldProvenance> {
    let scalars = ScalarField::ALL.into_iter().map(|field| FieldProvenance {
        field: field.as_str(),
        source: source_of(overriding_scalar(ovr, field).is_some()),
    });

    let lists = ListKind::ALL.into_iter().map(|kind| {
        let present = match kind {
            ListKind::Events => ovr.events.is_some(),
            ListKind::Story => ovr.story.is_some(),
            ListKind::Gallery => ovr.gallery.is_some(),
            ListKind::Donations => ovr.donations.is_some(),
            ListKind::Lyrics => ovr.lyrics.is_some(),
        };
        FieldProvenance {
            field: kind.as_str(),
            source: source_of(present),
        }
    });

    scalars.chain(lists).collect()
}

fn overriding_scalar(ovr: &InvitationOverride, field: ScalarField) -> Option<&str> {
    ovr.scalar(field).filter(|value| !value.is_empty())
}

fn source_of(overridden: bool) -> FieldSource {
    if overridden {
        FieldSource::Override
    } else {
        FieldSource::Default
    }
}
