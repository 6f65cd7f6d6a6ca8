//! Identity-bearing list items and the CRUD operations over them.
//!
//! Every operation takes the current list by reference and returns a new
//! list; callers swap the result in. Order is insertion order, which is also
//! display order.

mod items;

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use items::{
    DonationAccount, DonationField, EventField, EventItem, GalleryField, GalleryPhoto,
    ItemField, LyricField, LyricMarker, StoryEntry, StoryField,
};

/// Opaque item identifier, unique within its list.
///
/// Generated ids are numeric-looking strings (creation time in milliseconds);
/// stored ids are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five editable list sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Events,
    Story,
    Gallery,
    Donations,
    Lyrics,
}

impl ListKind {
    pub const ALL: [ListKind; 5] = [
        Self::Events,
        Self::Story,
        Self::Gallery,
        Self::Donations,
        Self::Lyrics,
    ];

    /// Storage column / JSON key for this list.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Story => "story",
            Self::Gallery => "gallery",
            Self::Donations => "donations",
            Self::Lyrics => "lyrics",
        }
    }
}

/// A list item type managed by the CRUD functions below.
pub trait ContentItem: Clone + PartialEq + Serialize + DeserializeOwned {
    /// Addressable fields of this item type.
    type Field: Copy + fmt::Debug;

    /// The list this item type lives in.
    const LIST: ListKind;

    /// A fresh item carrying the type's default field values.
    fn with_defaults(id: ItemId) -> Self;

    fn id(&self) -> &ItemId;

    /// Overwrite one field from its text form.
    fn set_field(&mut self, field: Self::Field, value: &str);
}

/// Issues item ids from the creation instant.
///
/// Ids are strictly increasing per generator, so two additions within the
/// same millisecond still receive distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ItemId {
        let now = chrono::Utc::now().timestamp_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        ItemId(now.max(prev + 1).to_string())
    }
}

/// Append a default item with a fresh id.
///
/// The new id never collides with an id already in `list`.
pub fn add_item<T: ContentItem>(list: &[T], ids: &IdGenerator) -> (Vec<T>, ItemId) {
    let mut id = ids.next_id();
    while list.iter().any(|item| item.id() == &id) {
        id = ids.next_id();
    }

    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend_from_slice(list);
    next.push(T::with_defaults(id.clone()));
    (next, id)
}

/// Replace one field of the item matching `id`.
///
/// Returns an identical copy of `list` when nothing matches.
pub fn update_item<T: ContentItem>(list: &[T], id: &ItemId, field: T::Field, value: &str) -> Vec<T> {
    list.iter()
        .map(|item| {
            if item.id() == id {
                let mut updated = item.clone();
                updated.set_field(field, value);
                updated
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Drop the item matching `id`; a missing id is a no-op.
pub fn remove_item<T: ContentItem>(list: &[T], id: &ItemId) -> Vec<T> {
    list.iter().filter(|item| item.id() != id).cloned().collect()
}

pub fn find_item<'a, T: ContentItem>(list: &'a [T], id: &ItemId) -> Option<&'a T> {
    list.iter().find(|item| item.id() == id)
}

/// Ids that appear more than once in `list`, in first-seen order.
pub fn duplicate_ids<T: ContentItem>(list: &[T]) -> Vec<ItemId> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for item in list {
        if !seen.insert(item.id()) && !dupes.contains(item.id()) {
            dupes.push(item.id().clone());
        }
    }
    dupes
}
