//! Character-based text truncation used to bound prompt sizes.

/// First `max_chars` characters of `text`, or the whole text when shorter.
///
/// Counts characters, not bytes, so multi-byte input is never split inside
/// a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
