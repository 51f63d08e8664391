//! Reading metrics derived from sanitized text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Characters read per minute used by the reading-time estimate.
pub const DEFAULT_CHARS_PER_MINUTE: usize = 400;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("valid regex"));

/// Size and estimated reading time of the sanitized content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingMetrics {
    /// Length of the sanitized text in characters.
    pub char_count: usize,
    pub word_count: usize,
    /// `ceil(char_count / chars_per_minute)`; at least 1 for any non-empty text.
    pub reading_time_minutes: usize,
}

impl ReadingMetrics {
    pub fn from_text(text: &str, chars_per_minute: usize) -> Self {
        let char_count = text.chars().count();
        let word_count = count_words(text);
        let reading_time_minutes = char_count.div_ceil(chars_per_minute.max(1));

        Self { char_count, word_count, reading_time_minutes }
    }
}

/// Count words in text using a simple regex pattern
pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}
