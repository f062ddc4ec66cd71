//! Context windowing over the accumulated story.

/// Truncate story context to its trailing `max_chars` characters.
///
/// The oldest content is dropped, never the newest, so the provider always
/// sees the most recent scenes. Operates on characters, not bytes, so the
/// cut never lands inside a multi-byte sequence.
///
/// # Examples
///
/// ```
/// use fabula_narrative::truncate_context;
///
/// assert_eq!(truncate_context("abcdef", 4), "cdef");
/// assert_eq!(truncate_context("short", 100), "short");
/// ```
pub fn truncate_context(text: &str, max_chars: usize) -> &str {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text;
    }
    let skip = char_count - max_chars;
    match text.char_indices().nth(skip) {
        Some((byte_idx, _)) => &text[byte_idx..],
        None => "",
    }
}

/// Count sentences in the accumulated story.
///
/// Used only to pace the narrative against the sentence budget, so a simple
/// period split is enough.
pub fn count_sentences(text: &str) -> usize {
    text.split('.').filter(|s| !s.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_exactly_the_trailing_chars() {
        let text = "x".repeat(100) + &"y".repeat(50);
        let truncated = truncate_context(&text, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.chars().all(|c| c == 'y'));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "ночь улица фонарь аптека";
        let truncated = truncate_context(text, 6);
        assert_eq!(truncated, "аптека");
    }

    #[test]
    fn short_context_is_untouched() {
        assert_eq!(truncate_context("tiny", 1000), "tiny");
    }

    #[test]
    fn sentence_count_ignores_trailing_period() {
        assert_eq!(count_sentences("One. Two. Three."), 3);
        assert_eq!(count_sentences(""), 0);
    }
}
