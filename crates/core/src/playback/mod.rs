//! Background music player state and the lyric display synced to it.
//!
//! The host media element is reached through [`MediaSource`]; it reports
//! position updates and end-of-media back into the [`Synchronizer`], which
//! is driven cooperatively (no thread of its own).

mod markers;
mod reveal;
mod synchronizer;

use serde::Serialize;

pub use markers::MarkerTrack;
pub use reveal::{ManualReveal, Reveal, RevealScheduler, TimedReveal, REVEAL_INTERVAL};
pub use synchronizer::Synchronizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Stopped,
    Paused,
    Playing,
}

/// The host refused to start playback, typically an autoplay policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Playback rejected by host: {reason}")]
pub struct PlaybackRejected {
    pub reason: String,
}

/// Commands the synchronizer sends to the host media element.
pub trait MediaSource {
    /// Point the element at a different media URL.
    fn load(&mut self, url: &str);

    fn play(&mut self) -> Result<(), PlaybackRejected>;

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    fn set_muted(&mut self, muted: bool);
}

/// Everything the presentation layer needs from the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackView {
    pub state: PlaybackState,
    pub position: f64,
    /// `MM:SS` rendering of `position`.
    pub position_label: String,
    /// The revealed part of the active marker's text; `None` when no marker
    /// is active.
    pub active_marker_text: Option<String>,
    pub is_blocked: bool,
    pub is_muted: bool,
}
