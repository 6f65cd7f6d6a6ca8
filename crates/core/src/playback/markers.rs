use crate::content::LyricMarker;

/// Lyric markers ordered by ascending time.
///
/// The editor keeps markers in insertion order, which need not be time
/// order, so the track sorts on construction. The sort is stable: markers
/// sharing a time keep their insertion order and the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerTrack {
    markers: Vec<LyricMarker>,
}

impl MarkerTrack {
    pub fn new(mut markers: Vec<LyricMarker>) -> Self {
        markers.sort_by_key(|m| m.time);
        Self { markers }
    }

    /// Index of the last marker whose time is at or before `position`.
    ///
    /// `None` before the first marker, for an empty track, and for a NaN
    /// position.
    pub fn active_index(&self, position: f64) -> Option<usize> {
        self.markers
            .partition_point(|m| f64::from(m.time) <= position)
            .checked_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&LyricMarker> {
        self.markers.get(index)
    }

    pub fn as_slice(&self) -> &[LyricMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ItemId;

    fn marker(id: &str, time: u32, text: &str) -> LyricMarker {
        LyricMarker {
            id: ItemId::new(id),
            time,
            text: text.to_string(),
        }
    }

    fn text_at(track: &MarkerTrack, position: f64) -> Option<&str> {
        track
            .active_index(position)
            .and_then(|i| track.get(i))
            .map(|m| m.text.as_str())
    }

    #[test]
    fn selects_last_marker_at_or_before_position() {
        let track = MarkerTrack::new(vec![
            marker("1", 10, "a"),
            marker("2", 40, "b"),
            marker("3", 90, "c"),
        ]);
        assert_eq!(text_at(&track, 5.0), None);
        assert_eq!(text_at(&track, 10.0), Some("a"));
        assert_eq!(text_at(&track, 39.0), Some("a"));
        assert_eq!(text_at(&track, 39.99), Some("a"));
        assert_eq!(text_at(&track, 40.0), Some("b"));
        assert_eq!(text_at(&track, 1000.0), Some("c"));
    }

    #[test]
    fn empty_track_has_no_active_marker() {
        let track = MarkerTrack::default();
        assert!(track.is_empty());
        assert_eq!(track.active_index(12.0), None);
    }

    #[test]
    fn nan_and_negative_positions_select_nothing() {
        let track = MarkerTrack::new(vec![marker("1", 0, "a")]);
        assert_eq!(track.active_index(f64::NAN), None);
        assert_eq!(track.active_index(-1.0), None);
        assert_eq!(track.active_index(0.0), Some(0));
    }

    #[test]
    fn out_of_order_markers_are_sorted() {
        let track = MarkerTrack::new(vec![
            marker("3", 90, "c"),
            marker("1", 10, "a"),
            marker("2", 40, "b"),
        ]);
        let times: Vec<u32> = track.as_slice().iter().map(|m| m.time).collect();
        assert_eq!(times, vec![10, 40, 90]);
        assert_eq!(text_at(&track, 50.0), Some("b"));
    }

    #[test]
    fn equal_times_prefer_later_insertion() {
        let track = MarkerTrack::new(vec![marker("1", 10, "first"), marker("2", 10, "second")]);
        assert_eq!(track.len(), 2);
        assert_eq!(text_at(&track, 10.0), Some("second"));
    }
}
