use super::split_sentences;

/// Extractive fallback summarization.
///
/// Keeps the first `max(1, floor(n * ratio / 100))` sentences in their
/// original order and joins them with single spaces. Selection is purely
/// positional; there is no scoring. Deterministic and infallible: empty
/// segmentation yields an empty string.
pub fn summarize(text: &str, ratio: u8) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let count = (sentences.len() * ratio as usize / 100)
        .max(1)
        .min(sentences.len());

    sentences[..count].join(" ")
}
