//! Sentence segmentation and text statistics.
//!
//! The segmenter here is the single source of truth for sentence
//! boundaries: both the output formatter and the extractive fallback
//! summarizer go through [`split_sentences`], so a sentence means the
//! same thing everywhere in the pipeline.

pub mod extractive;
pub mod format;

use regex::Regex;
use std::sync::LazyLock;

/// Inputs shorter than this tend to produce poor summaries.
pub const MIN_RECOMMENDED_CHARS: usize = 500;
/// Inputs longer than this tend to exceed provider limits.
pub const MAX_RECOMMENDED_CHARS: usize = 50_000;

const WORDS_PER_MINUTE: usize = 200;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Split text into trimmed sentences.
///
/// Whitespace runs are collapsed to single spaces first, then the text is
/// split wherever `.`, `?`, or `!` is immediately followed by whitespace;
/// the punctuation stays with its sentence. Text without terminal
/// punctuation comes back as a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = WHITESPACE.replace_all(text.trim(), " ");
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = normalized.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '?' | '!') {
            if let Some(&(next_idx, next)) = chars.peek() {
                if next.is_whitespace() {
                    let sentence = normalized[start..next_idx].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    start = next_idx;
                }
            }
        }
    }

    let tail = normalized[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate reading time in minutes at 200 wpm, minimum 1.
pub fn estimate_reading_time(text: &str) -> usize {
    let words = count_words(text);
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
