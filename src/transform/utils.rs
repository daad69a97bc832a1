//! Small formatting and parsing helpers shared by the transformers.

use chrono::{DateTime, Utc};

/// Strip the workflow prefix from an action id.
///
/// `"document-pipeline:upload"` becomes `"upload"`; an id without a `:`
/// separator is returned unchanged.
pub fn extract_step_name(action_id: &str) -> String {
    let mut parts = action_id.split(':');
    match (parts.next(), parts.next()) {
        (Some(_), Some(step)) => step.to_string(),
        _ => action_id.to_string(),
    }
}

/// Parse an RFC 3339 timestamp, treating absent or malformed values as missing
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Milliseconds between two instants when both are known
pub fn elapsed_ms(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Option<i64> {
    Some((to? - from?).num_milliseconds())
}

/// Milliseconds as seconds with one decimal: `3001` → `"3.0s"`
pub fn format_duration(ms: i64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// Milliseconds as `"Xm Ys"`, or `"Ys"` under a minute
pub fn format_minutes_seconds(ms: f64) -> String {
    let seconds = (ms / 1000.0).floor().max(0.0) as u64;
    let minutes = seconds / 60;
    let remaining = seconds % 60;

    if minutes > 0 {
        format!("{minutes}m {remaining}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_step_name() {
        assert_eq!(extract_step_name("document-pipeline:upload"), "upload");
        assert_eq!(extract_step_name("upload"), "upload");
        assert_eq!(extract_step_name(""), "");
        assert_eq!(extract_step_name("a:b:c"), "b");
    }

    #[test]
    fn test_parse_timestamp_is_lenient() {
        assert!(parse_timestamp(Some("2025-03-01T10:00:00Z")).is_some());
        assert!(parse_timestamp(Some("2025-03-01T10:00:00.250+02:00")).is_some());
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(Some("")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn test_elapsed_ms() {
        let start = parse_timestamp(Some("2025-03-01T10:00:00Z"));
        let end = parse_timestamp(Some("2025-03-01T10:00:01.500Z"));
        assert_eq!(elapsed_ms(start, end), Some(1500));
        assert_eq!(elapsed_ms(start, None), None);
        assert_eq!(elapsed_ms(None, end), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3001), "3.0s");
        assert_eq!(format_duration(500), "0.5s");
        assert_eq!(format_duration(0), "0.0s");
    }

    #[test]
    fn test_format_minutes_seconds() {
        assert_eq!(format_minutes_seconds(42_000.0), "42s");
        assert_eq!(format_minutes_seconds(125_400.0), "2m 5s");
        assert_eq!(format_minutes_seconds(0.0), "0s");
    }
}
