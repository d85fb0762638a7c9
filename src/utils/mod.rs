//! Utility functions and helpers.

pub mod http;

use chrono::DateTime;
use unicode_segmentation::UnicodeSegmentation;

/// Collapse tabs, newlines and repeated spaces into single spaces.
///
/// # Examples
/// ```
/// use naver_crawler::utils::clean_text;
///
/// assert_eq!(clean_text("a\n\tb   c"), "a b c");
/// ```
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to at most `max_len` graphemes, appending `...` when cut.
///
/// Grapheme-aware so Hangul and other multi-byte text is never split
/// mid-character.
pub fn truncate(text: &str, max_len: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_len {
        text.to_string()
    } else {
        format!("{}...", graphemes[..max_len].concat())
    }
}

/// Decode a percent-encoded component such as an escaped post title.
///
/// `+` is treated as a space, matching standard query unescaping.
pub fn decode_component(input: &str) -> String {
    url::form_urlencoded::parse(input.as_bytes())
        .map(|(key, value)| {
            if value.is_empty() {
                key.into_owned()
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode a component for use in a query string.
pub fn encode_component(input: &str) -> String {
    url::form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// Format a millisecond epoch timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Returns an empty string for out-of-range values.
pub fn format_epoch_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
