//! Media fragment resolution for timed segments.
//!
//! Segment boundaries arrive as loosely formatted time strings. Parsing is lenient throughout: a
//! component that cannot be read counts as zero, so a malformed attribute shifts a segment rather
//! than dropping the navigation panel.

use crate::section::Section;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved segment boundaries in seconds.
pub struct TimeRange {
    /// Segment start.
    pub start: f64,
    /// Segment end.
    pub end: f64,
}

impl TimeRange {
    #[must_use]
    /// Value of the `t` query parameter, e.g. `12.5,750.0`.
    pub fn query_value(&self) -> String {
        format!("{},{}", format_seconds(self.start), format_seconds(self.end))
    }
}

fn component(part: Option<&str>) -> f64 {
    let Some(part) = part else {
        return 0.0;
    };
    match part.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::trace!(component = part, "unreadable time component, using 0");
            0.0
        }
    }
}

#[must_use]
/// Parse `[[hours:]minutes:]seconds` into seconds.
///
/// Components are read right to left; anything beyond hours is ignored and unreadable components
/// count as zero. Only a missing string yields `None`.
pub fn parse_hour_min_sec(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let mut parts = s.split(':').rev();
    let seconds = component(parts.next());
    let minutes = component(parts.next());
    let hours = component(parts.next());
    Some(seconds + 60.0 * minutes + 3600.0 * hours)
}

#[must_use]
/// Parse a `start,end` media fragment.
///
/// A blank fragment resolves to `(0.0, None)`. Trailing empty pieces are dropped, so `"5,"` has
/// no end.
pub fn parse_media_fragment(fragment: &str) -> (f64, Option<f64>) {
    if fragment.trim().is_empty() {
        return (0.0, None);
    }
    let mut pieces: Vec<&str> = fragment.split(',').collect();
    while pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    let start = parse_hour_min_sec(pieces.first().copied()).unwrap_or(0.0);
    let end = parse_hour_min_sec(pieces.get(1).copied());
    (start, end)
}

#[must_use]
/// Resolve a segment's range from its raw attributes, falling back on the section duration.
pub fn resolve(begin: Option<&str>, end: Option<&str>, section: &Section) -> TimeRange {
    let start = begin.map_or_else(|| "0".to_string(), str::to_string);
    let stop = match (end, section.duration) {
        (Some(end), _) => end.to_string(),
        (None, Some(duration)) => format_milliseconds(duration),
        (None, None) => "0".to_string(),
    };
    let (start, end) = parse_media_fragment(&format!("{start},{stop}"));
    TimeRange {
        start,
        end: end.unwrap_or(0.0),
    }
}

#[must_use]
/// Format milliseconds as `H:MM:SS`, or `MM:SS` under an hour. Sub-second precision is dropped.
pub fn format_milliseconds(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
/// Human-readable length of a range.
///
/// Both ends are truncated to whole seconds before subtracting, so `1.7..3.2` reads as two
/// seconds.
pub fn duration_label(range: &TimeRange) -> String {
    let seconds = (range.end.trunc() - range.start.trunc()).max(0.0);
    format_milliseconds((seconds * 1000.0) as u64)
}

#[must_use]
/// Render seconds the way fragment attributes expect them: integral values keep a trailing `.0`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:?}")
}

#[cfg(test)]
#[path = "tests/fragment.rs"]
mod tests;
