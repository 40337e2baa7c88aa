use once_cell::sync::Lazy;
use regex::Regex;

// @module: Transcript timestamp markers and SRT time formatting

// @const: Timestamp marker alone on a line, `M:SS` or `H:MM:SS`
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?$").unwrap()
});

/// Returns true when the (already trimmed) line is a timestamp marker.
pub fn is_timestamp_line(line: &str) -> bool {
    MARKER_REGEX.is_match(line)
}

/// Parse a `M:SS` or `H:MM:SS` marker into elapsed seconds.
///
/// Parsing is lenient: anything that is not two or three numeric
/// colon-separated fields, or that overflows, yields 0 instead of an error.
pub fn parse_timestamp(marker: &str) -> u64 {
    let fields: Option<Vec<u64>> = marker
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect();

    let total = match fields.as_deref() {
        Some([minutes, seconds]) => minutes.checked_mul(60).and_then(|m| m.checked_add(*seconds)),
        Some([hours, minutes, seconds]) => hours
            .checked_mul(3600)
            .zip(minutes.checked_mul(60))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(*seconds)),
        _ => None,
    };

    total.unwrap_or(0)
}

/// Format whole seconds as an SRT time (`HH:MM:SS,mmm`).
///
/// Hours are not capped at 24; milliseconds are always zero because
/// transcript markers carry no sub-second precision.
pub fn format_srt_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    let millis = 0;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
