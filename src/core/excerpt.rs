//! Trailing excerpt of a joined conversation.
//!
//! Summarization only needs the most recent part of a conversation. This
//! module cuts the last N separator-delimited segments from the text blob
//! produced by [`extract_conversation_text`](super::filter::extract_conversation_text).

/// Default number of trailing segments kept.
pub const DEFAULT_EXCERPT_SEGMENTS: usize = 50;

/// Returns the last `max_segments` segments of `text`, joined by `separator`.
///
/// Segment order is preserved. An empty separator treats the whole text as a
/// single segment.
///
/// # Example
///
/// ```
/// use kakaopack::core::excerpt::latest_conversation;
///
/// let text = "one\ntwo\nthree\nfour";
/// assert_eq!(latest_conversation(text, "\n", 2), "three\nfour");
/// assert_eq!(latest_conversation(text, "\n", 10), text);
/// ```
pub fn latest_conversation(text: &str, separator: &str, max_segments: usize) -> String {
    if max_segments == 0 || text.is_empty() {
        return String::new();
    }
    if separator.is_empty() {
        return text.to_string();
    }

    let segments: Vec<&str> = text.split(separator).collect();
    let skip = segments.len().saturating_sub(max_segments);
    segments[skip..].join(separator)
}
