use crate::content::{ItemId, LyricMarker};
use crate::time_code::format_timestamp;

use super::{MarkerTrack, MediaSource, PlaybackState, PlaybackView, RevealScheduler};

/// Play/pause/blocked state machine plus the active-marker tracker.
///
/// ```text
/// Stopped --play--> Playing --pause--> Paused --play--> Playing
/// Playing --ended / source change--> Stopped
/// ```
///
/// A rejected `play` leaves the state alone and raises the blocked flag; the
/// next successful `play` clears it.
pub struct Synchronizer<M: MediaSource, R: RevealScheduler> {
    media: M,
    reveal: R,
    track: MarkerTrack,
    state: PlaybackState,
    position: f64,
    blocked: bool,
    muted: bool,
    source: Option<String>,
    active: Option<usize>,
    active_key: Option<ItemId>,
}

impl<M: MediaSource, R: RevealScheduler> Synchronizer<M, R> {
    pub fn new(media: M, reveal: R, markers: Vec<LyricMarker>) -> Self {
        let mut sync = Self {
            media,
            reveal,
            track: MarkerTrack::new(markers),
            state: PlaybackState::Stopped,
            position: 0.0,
            blocked: false,
            muted: false,
            source: None,
            active: None,
            active_key: None,
        };
        sync.sync_marker();
        sync
    }

    // -- Transport --

    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        self.request_play();
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.media.pause();
        self.state = PlaybackState::Paused;
    }

    /// The single play/pause button.
    pub fn toggle(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Rewind to the start; keeps playing if playing.
    pub fn restart(&mut self) {
        self.media.seek(0.0);
        self.position = 0.0;
        self.sync_marker();
        if self.state == PlaybackState::Playing {
            self.request_play();
        }
    }

    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let seconds = seconds.max(0.0);
        self.media.seek(seconds);
        self.position = seconds;
        self.sync_marker();
    }

    /// Switch to a different media URL. Re-selecting the current URL is a
    /// no-op.
    pub fn set_source(&mut self, url: &str) {
        if self.source.as_deref() == Some(url) {
            return;
        }
        tracing::debug!(url, "Playback source changed");
        self.reveal.cancel();
        self.active = None;
        self.active_key = None;

        self.media.load(url);
        self.source = Some(url.to_string());
        self.state = PlaybackState::Stopped;
        self.position = 0.0;
        self.sync_marker();
    }

    /// Replace the marker list, e.g. after the lyrics were edited.
    ///
    /// A running reveal survives when the active marker keeps its id.
    pub fn set_markers(&mut self, markers: Vec<LyricMarker>) {
        self.track = MarkerTrack::new(markers);
        self.sync_marker();
    }

    // -- Host callbacks --

    /// Position report from the media element.
    pub fn on_time_update(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.position = seconds.max(0.0);
        self.sync_marker();
    }

    /// The media element reached its end.
    pub fn on_ended(&mut self) {
        self.state = PlaybackState::Stopped;
        self.media.seek(0.0);
        self.position = 0.0;
        self.sync_marker();
    }

    // -- Mute --

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.media.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    /// Stop everything the view owns. Also runs on drop.
    pub fn teardown(&mut self) {
        self.reveal.cancel();
        self.active = None;
        self.active_key = None;
        self.media.pause();
        self.state = PlaybackState::Stopped;
    }

    // -- Accessors --

    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            state: self.state,
            position: self.position,
            position_label: format_timestamp(self.position),
            active_marker_text: self
                .active_key
                .as_ref()
                .and_then(|_| self.reveal.visible_text()),
            is_blocked: self.blocked,
            is_muted: self.muted,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn active_marker(&self) -> Option<&LyricMarker> {
        self.active.and_then(|i| self.track.get(i))
    }

    pub fn markers(&self) -> &[LyricMarker] {
        self.track.as_slice()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn reveal(&self) -> &R {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut R {
        &mut self.reveal
    }

    // -- Internals --

    fn request_play(&mut self) {
        match self.media.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.blocked = false;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Playback blocked");
                self.blocked = true;
            }
        }
    }

    /// Re-evaluate the active marker for the current position. The reveal is
    /// restarted only when the marker identity changes.
    fn sync_marker(&mut self) {
        let index = self.track.active_index(self.position);
        let marker = index.and_then(|i| self.track.get(i));
        let key = marker.map(|m| m.id.clone());

        if key != self.active_key {
            self.reveal.cancel();
            if let Some(marker) = marker {
                tracing::debug!(marker_id = %marker.id, time = marker.time, "Active marker changed");
                self.reveal.start(marker.id.clone(), marker.text.clone());
            }
            self.active_key = key;
        }
        self.active = index;
    }
}

impl<M: MediaSource, R: RevealScheduler> Drop for Synchronizer<M, R> {
    fn drop(&mut self) {
        self.reveal.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::playback::{ManualReveal, PlaybackRejected, TimedReveal};

    #[derive(Debug, Default)]
    struct FakeMedia {
        reject_play: bool,
        play_calls: usize,
        pause_calls: usize,
        seeks: Vec<f64>,
        loaded: Vec<String>,
        muted: bool,
    }

    impl MediaSource for FakeMedia {
        fn load(&mut self, url: &str) {
            self.loaded.push(url.to_string());
        }

        fn play(&mut self) -> Result<(), PlaybackRejected> {
            self.play_calls += 1;
            if self.reject_play {
                Err(PlaybackRejected {
                    reason: "autoplay policy".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.pause_calls += 1;
        }

        fn seek(&mut self, seconds: f64) {
            self.seeks.push(seconds);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    fn marker(id: &str, time: u32, text: &str) -> LyricMarker {
        LyricMarker {
            id: ItemId::new(id),
            time,
            text: text.to_string(),
        }
    }

    fn markers() -> Vec<LyricMarker> {
        vec![marker("1", 10, "a"), marker("2", 40, "b"), marker("3", 90, "c")]
    }

    fn synchronizer() -> Synchronizer<FakeMedia, ManualReveal> {
        Synchronizer::new(FakeMedia::default(), ManualReveal::new(), markers())
    }

    fn active_text(sync: &Synchronizer<FakeMedia, ManualReveal>) -> Option<&str> {
        sync.active_marker().map(|m| m.text.as_str())
    }

    // -- State machine --

    #[test]
    fn starts_stopped() {
        let sync = synchronizer();
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert!(!sync.is_blocked());
        assert_eq!(sync.view().position_label, "00:00");
    }

    #[test]
    fn play_pause_cycle() {
        let mut sync = synchronizer();
        sync.play();
        assert_eq!(sync.state(), PlaybackState::Playing);
        sync.pause();
        assert_eq!(sync.state(), PlaybackState::Paused);
        sync.play();
        assert_eq!(sync.state(), PlaybackState::Playing);
        assert_eq!(sync.media().play_calls, 2);
    }

    #[test]
    fn play_while_playing_is_noop() {
        let mut sync = synchronizer();
        sync.play();
        sync.play();
        assert_eq!(sync.media().play_calls, 1);
    }

    #[test]
    fn pause_when_not_playing_is_noop() {
        let mut sync = synchronizer();
        sync.pause();
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.media().pause_calls, 0);
    }

    #[test]
    fn toggle_switches_between_play_and_pause() {
        let mut sync = synchronizer();
        sync.toggle();
        assert_eq!(sync.state(), PlaybackState::Playing);
        sync.toggle();
        assert_eq!(sync.state(), PlaybackState::Paused);
    }

    #[test]
    fn rejected_play_raises_blocked_and_keeps_state() {
        let mut sync = Synchronizer::new(
            FakeMedia {
                reject_play: true,
                ..Default::default()
            },
            ManualReveal::new(),
            markers(),
        );
        sync.play();
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert!(sync.is_blocked());
        assert!(sync.view().is_blocked);
    }

    #[test]
    fn later_play_recovers_from_blocked() {
        let mut sync = Synchronizer::new(
            FakeMedia {
                reject_play: true,
                ..Default::default()
            },
            ManualReveal::new(),
            markers(),
        );
        sync.play();
        assert!(sync.is_blocked());

        // The user taps play; the host now allows it.
        let media = FakeMedia::default();
        sync.media = media;
        sync.play();
        assert_eq!(sync.state(), PlaybackState::Playing);
        assert!(!sync.is_blocked());
    }

    #[test]
    fn natural_end_stops_and_rewinds() {
        let mut sync = synchronizer();
        sync.play();
        sync.on_time_update(95.0);
        sync.on_ended();
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.position(), 0.0);
        assert_eq!(active_text(&sync), None);
    }

    #[test]
    fn restart_while_playing_replays() {
        let mut sync = synchronizer();
        sync.play();
        sync.on_time_update(50.0);
        sync.restart();
        assert_eq!(sync.position(), 0.0);
        assert_eq!(sync.state(), PlaybackState::Playing);
        assert_eq!(sync.media().play_calls, 2);
        assert_eq!(sync.media().seeks.last(), Some(&0.0));
    }

    #[test]
    fn restart_while_paused_only_rewinds() {
        let mut sync = synchronizer();
        sync.play();
        sync.on_time_update(50.0);
        sync.pause();
        sync.restart();
        assert_eq!(sync.position(), 0.0);
        assert_eq!(sync.state(), PlaybackState::Paused);
        assert_eq!(sync.media().play_calls, 1);
    }

    #[test]
    fn source_change_forces_stopped_and_clears_marker() {
        let mut sync = synchronizer();
        sync.set_source("/a.mp3");
        sync.play();
        sync.on_time_update(45.0);
        assert_eq!(active_text(&sync), Some("b"));

        sync.set_source("/b.mp3");
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert_eq!(sync.position(), 0.0);
        assert_eq!(active_text(&sync), None);
        assert_eq!(sync.view().active_marker_text, None);
        assert_eq!(sync.media().loaded, vec!["/a.mp3", "/b.mp3"]);
    }

    #[test]
    fn same_source_is_noop() {
        let mut sync = synchronizer();
        sync.set_source("/a.mp3");
        sync.play();
        sync.set_source("/a.mp3");
        assert_eq!(sync.state(), PlaybackState::Playing);
        assert_eq!(sync.media().loaded.len(), 1);
        assert_eq!(sync.source(), Some("/a.mp3"));
    }

    // -- Marker selection --

    #[test]
    fn marker_follows_position() {
        let mut sync = synchronizer();
        for (position, expected) in [
            (5.0, None),
            (10.0, Some("a")),
            (39.0, Some("a")),
            (40.0, Some("b")),
            (1000.0, Some("c")),
        ] {
            sync.on_time_update(position);
            assert_eq!(active_text(&sync), expected, "position {position}");
        }
    }

    #[test]
    fn seek_re_evaluates_marker() {
        let mut sync = synchronizer();
        sync.seek(91.0);
        assert_eq!(active_text(&sync), Some("c"));
        sync.seek(12.0);
        assert_eq!(active_text(&sync), Some("a"));
        assert_eq!(sync.media().seeks, vec![91.0, 12.0]);
    }

    #[test]
    fn invalid_positions_are_ignored() {
        let mut sync = synchronizer();
        sync.on_time_update(45.0);
        sync.on_time_update(f64::NAN);
        assert_eq!(sync.position(), 45.0);
        sync.seek(f64::INFINITY);
        assert_eq!(sync.position(), 45.0);
    }

    // -- Reveal --

    #[test]
    fn reveal_starts_on_marker_change() {
        let mut sync = Synchronizer::new(
            FakeMedia::default(),
            ManualReveal::new(),
            vec![marker("1", 0, "hello"), marker("2", 10, "world")],
        );
        assert_eq!(sync.view().active_marker_text.as_deref(), Some(""));
        sync.reveal_mut().tick();
        sync.reveal_mut().tick();
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("he"));

        sync.on_time_update(10.0);
        assert_eq!(sync.view().active_marker_text.as_deref(), Some(""));
        sync.reveal_mut().tick();
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("w"));
    }

    #[test]
    fn same_marker_does_not_restart_reveal() {
        let mut sync = synchronizer();
        sync.on_time_update(10.0);
        sync.reveal_mut().tick();
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("a"));

        sync.on_time_update(11.0);
        sync.on_time_update(20.5);
        sync.seek(30.0);
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("a"));
    }

    #[test]
    fn set_markers_keeps_reveal_for_same_id() {
        let mut sync = synchronizer();
        sync.on_time_update(45.0);
        sync.reveal_mut().tick();

        let mut edited = markers();
        edited.push(marker("4", 200, "d"));
        sync.set_markers(edited);
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("b"));
        assert_eq!(sync.markers().len(), 4);
    }

    #[test]
    fn set_markers_sorts_out_of_order_edits() {
        let mut sync = synchronizer();
        sync.set_markers(vec![marker("3", 90, "c"), marker("1", 10, "a")]);
        sync.on_time_update(50.0);
        assert_eq!(active_text(&sync), Some("a"));
    }

    #[test]
    fn teardown_cancels_reveal() {
        let mut sync = synchronizer();
        sync.play();
        sync.on_time_update(10.0);
        sync.teardown();
        assert_eq!(sync.state(), PlaybackState::Stopped);
        assert!(sync.reveal_mut().current().is_none());
        assert_eq!(sync.media().pause_calls, 1);
    }

    #[test]
    fn same_marker_reveals_again_after_teardown() {
        let mut sync = synchronizer();
        sync.on_time_update(10.0);
        sync.teardown();
        assert_eq!(sync.view().active_marker_text, None);

        sync.on_time_update(12.0);
        assert_eq!(
            sync.reveal_mut().current().map(|r| r.key().clone()),
            Some(ItemId::new("1"))
        );
        assert_eq!(sync.view().active_marker_text.as_deref(), Some(""));
    }

    // -- Timed reveal --

    fn timed_synchronizer(markers: Vec<LyricMarker>) -> Synchronizer<FakeMedia, TimedReveal> {
        Synchronizer::new(FakeMedia::default(), TimedReveal::new(), markers)
    }

    #[tokio::test(start_paused = true)]
    async fn source_change_stops_running_reveal() {
        let text = "our song is playing";
        let mut sync = timed_synchronizer(vec![marker("1", 10, text)]);
        sync.set_source("/u/first.mp3");
        sync.on_time_update(10.0);
        let first = sync.reveal().subscribe().expect("reveal running");

        tokio::time::sleep(Duration::from_millis(120)).await;
        let partial = first.borrow().clone();
        assert!(!partial.is_empty());
        assert!(partial.len() < text.len());

        sync.set_source("/u/second.mp3");
        assert!(sync.reveal().key().is_none());
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*first.borrow(), partial);
        assert_eq!(sync.view().active_marker_text, None);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_to_other_marker_replaces_reveal() {
        let mut sync = timed_synchronizer(vec![
            marker("1", 10, "first line of the verse"),
            marker("2", 40, "next"),
        ]);
        sync.on_time_update(10.0);
        let first = sync.reveal().subscribe().expect("reveal running");
        tokio::time::sleep(Duration::from_millis(120)).await;

        sync.seek(45.0);
        assert_eq!(sync.reveal().key(), Some(&ItemId::new("2")));
        let frozen = first.borrow().clone();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*first.borrow(), frozen);
        assert!(frozen.len() < "first line of the verse".len());
        assert_eq!(sync.view().active_marker_text.as_deref(), Some("next"));
    }

    // -- Mute --

    #[test]
    fn mute_is_idempotent_and_orthogonal() {
        let mut sync = synchronizer();
        sync.play();
        sync.set_muted(true);
        sync.set_muted(true);
        assert!(sync.is_muted());
        assert!(sync.media().muted);
        assert_eq!(sync.state(), PlaybackState::Playing);

        sync.toggle_mute();
        assert!(!sync.is_muted());
        assert_eq!(sync.state(), PlaybackState::Playing);
    }
}
