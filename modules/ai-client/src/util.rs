use std::sync::LazyLock;

use regex::Regex;

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```json(.*?)(?:```|$)").expect("valid regex"));
static BARE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)(?:```|$)").expect("valid regex"));

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Pull the payload out of a markdown code block.
///
/// A ```` ```json ```` block wins over an untagged one; text without any fence
/// comes back trimmed. Prose around the block is discarded.
pub fn strip_code_blocks(response: &str) -> &str {
    let trimmed = response.trim();
    let captured = JSON_FENCE_RE
        .captures(trimmed)
        .or_else(|| BARE_FENCE_RE.captures(trimmed))
        .and_then(|c| c.get(1));

    match captured {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}
