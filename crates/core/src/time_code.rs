//! `MM:SS` time codes used by lyric markers and the player readout.
//!
//! Neither direction ever fails: malformed input degrades to zero. Hours are
//! not modeled, so positions of an hour or more render as `60:00` and up.

/// Rendered for negative, non-finite or absent positions.
pub const ZERO_TIMESTAMP: &str = "00:00";

/// Format a position in seconds as zero-padded `MM:SS`.
///
/// Fractional seconds are truncated.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIMESTAMP.to_string();
    }
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format an optional position; `None` renders as [`ZERO_TIMESTAMP`].
pub fn format_optional_timestamp(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| ZERO_TIMESTAMP.to_string(), format_timestamp)
}

/// Parse user-typed time text into whole seconds.
///
/// Everything except ASCII digits and `:` is discarded first. Two parts are
/// read as `minutes:seconds`, a single part as plain seconds. Any other shape,
/// an empty part, or a part that does not fit in `u32` yields `0`.
pub fn parse_timestamp(text: &str) -> u32 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    let parts: Vec<&str> = cleaned.split(':').collect();

    match parts.as_slice() {
        [secs] => parse_part(secs).unwrap_or(0),
        [mins, secs] => match (parse_part(mins), parse_part(secs)) {
            (Some(m), Some(s)) => m.saturating_mul(60).saturating_add(s),
            _ => 0,
        },
        _ => 0,
    }
}

fn parse_part(part: &str) -> Option<u32> {
    if part.is_empty() {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(425.9), "07:05");
        assert_eq!(format_timestamp(3599.0), "59:59");
    }

    #[test]
    fn formats_invalid_as_zero() {
        assert_eq!(format_timestamp(-5.0), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
        assert_eq!(format_timestamp(f64::INFINITY), "00:00");
        assert_eq!(format_optional_timestamp(None), "00:00");
        assert_eq!(format_optional_timestamp(Some(61.0)), "01:01");
    }

    #[test]
    fn hours_are_not_modeled() {
        assert_eq!(format_timestamp(3600.0), "60:00");
    }

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_timestamp("07:05"), 425);
        assert_eq!(parse_timestamp("1:30"), 90);
        assert_eq!(parse_timestamp(" 02m:10s "), 130);
    }

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_timestamp("125"), 125);
        assert_eq!(parse_timestamp("0"), 0);
    }

    #[test]
    fn malformed_input_is_zero() {
        assert_eq!(parse_timestamp("bad::text"), 0);
        assert_eq!(parse_timestamp(""), 0);
        assert_eq!(parse_timestamp("abc"), 0);
        assert_eq!(parse_timestamp("1:2:3"), 0);
        assert_eq!(parse_timestamp("5:"), 0);
        assert_eq!(parse_timestamp("99999999999"), 0);
    }

    #[test]
    fn round_trips_below_one_hour() {
        for x in (0..3600).step_by(7) {
            let formatted = format_timestamp(f64::from(x));
            let reparsed = parse_timestamp(&formatted);
            assert_eq!(format_timestamp(f64::from(reparsed)), formatted);
        }
        assert_eq!(format_timestamp(f64::from(parse_timestamp("07:05"))), "07:05");
    }
}
