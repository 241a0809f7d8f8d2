// ============================================================================
// Text helpers shared by locator resolution, naming, emission and prompts
// ============================================================================

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Collapse every whitespace run (including newlines) into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character count, used wherever a length limit applies to visible text.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
