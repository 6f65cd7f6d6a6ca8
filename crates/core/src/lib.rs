//! Domain logic for personalized wedding invitations: template defaults,
//! per-owner overrides and their overlay, list content, the editor session
//! and the background music / lyric synchronizer.
//!
//! Nothing here touches a database or the network directly; persistence and
//! the media catalog are reached through the traits in [`store`] and
//! [`media`].

pub mod content;
pub mod editor;
pub mod error;
pub mod invitation;
pub mod media;
pub mod overlay;
pub mod playback;
pub mod store;
pub mod template;
pub mod time_code;
pub mod types;
