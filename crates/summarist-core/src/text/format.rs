use regex::Regex;
use std::sync::LazyLock;

use super::split_sentences;
use crate::summarize::SummaryFormat;

static NUMBERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("numbered list regex is valid"));

/// Render a raw summary into the requested output style.
///
/// Providers that follow instructions may already return bulleted or
/// numbered output, so `bullet` and `key-points` pass pre-formatted text
/// through unchanged rather than formatting it a second time.
pub fn format_summary(text: &str, format: SummaryFormat) -> String {
    if text.is_empty() {
        return String::new();
    }

    match format {
        SummaryFormat::Paragraph => as_paragraphs(text),
        SummaryFormat::Bullet => as_bullet_points(text),
        SummaryFormat::KeyPoints => as_key_points(text),
    }
}

/// One sentence per paragraph block.
fn as_paragraphs(text: &str) -> String {
    split_sentences(text).join("\n\n")
}

fn as_bullet_points(text: &str) -> String {
    // Already bulleted output passes through untouched.
    if text.contains('•') || text.contains("* ") || text.contains("- ") {
        return text.to_string();
    }

    split_sentences(text)
        .iter()
        .map(|sentence| format!("• {sentence}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn as_key_points(text: &str) -> String {
    // Already numbered output passes through untouched.
    if NUMBERED_LIST.is_match(text) {
        return text.to_string();
    }

    split_sentences(text)
        .iter()
        .enumerate()
        .map(|(i, sentence)| format!("{}. {}", i + 1, sentence))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_SENTENCES: &str = "First point. Second point? Third point!";

    #[test]
    fn paragraph_produces_one_block_per_sentence() {
        let formatted = format_summary(THREE_SENTENCES, SummaryFormat::Paragraph);
        assert_eq!(formatted, "First point.\n\nSecond point?\n\nThird point!");
        assert_eq!(formatted.split("\n\n").count(), 3);
    }

    #[test]
    fn bullet_prefixes_each_sentence() {
        let formatted = format_summary(THREE_SENTENCES, SummaryFormat::Bullet);
        assert_eq!(formatted, "• First point.\n• Second point?\n• Third point!");
    }

    #[test]
    fn bullet_is_idempotent() {
        let once = format_summary(THREE_SENTENCES, SummaryFormat::Bullet);
        let twice = format_summary(&once, SummaryFormat::Bullet);
        assert_eq!(once, twice);
    }

    #[test]
    fn bullet_passes_through_dashed_lists() {
        let pre_formatted = "- already a list\n- second item";
        assert_eq!(
            format_summary(pre_formatted, SummaryFormat::Bullet),
            pre_formatted
        );
    }

    #[test]
    fn key_points_numbers_sentences() {
        let formatted = format_summary(THREE_SENTENCES, SummaryFormat::KeyPoints);
        assert_eq!(formatted, "1. First point.\n2. Second point?\n3. Third point!");
    }

    #[test]
    fn key_points_passes_through_numbered_lists() {
        let pre_formatted = "1. Already numbered. 2. Stays as is.";
        assert_eq!(
            format_summary(pre_formatted, SummaryFormat::KeyPoints),
            pre_formatted
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(format_summary("", SummaryFormat::Paragraph), "");
        assert_eq!(format_summary("", SummaryFormat::Bullet), "");
        assert_eq!(format_summary("", SummaryFormat::KeyPoints), "");
    }
}
