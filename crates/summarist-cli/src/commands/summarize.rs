use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use summarist_core::history::HistoryStore;
use summarist_core::text::{
    count_words, estimate_reading_time, MAX_RECOMMENDED_CHARS, MIN_RECOMMENDED_CHARS,
};
use summarist_core::{AppConfig, SummaryFormat, SummaryLength, SummaryOptions, Summarizer};

pub async fn run(
    config: &AppConfig,
    file: Option<PathBuf>,
    text: Option<String>,
    length: SummaryLength,
    format: SummaryFormat,
    ratio: u8,
    no_history: bool,
) -> Result<()> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    if input.trim().is_empty() {
        anyhow::bail!("no input text; provide FILE, --text, or pipe text to stdin");
    }

    let chars = input.chars().count();
    if chars < MIN_RECOMMENDED_CHARS {
        eprintln!(
            "Note: input is {chars} characters; at least {MIN_RECOMMENDED_CHARS} is recommended for better results."
        );
    } else if chars > MAX_RECOMMENDED_CHARS {
        eprintln!(
            "Note: input is {chars} characters; results may degrade above {MAX_RECOMMENDED_CHARS}."
        );
    }

    let options = SummaryOptions::new(length, format, ratio);
    let summarizer = Summarizer::new(config);
    let summary = summarizer.summarize(&input, &options).await?;

    println!("{summary}");
    println!();
    println!(
        "Summary: {} characters, {} words",
        summary.chars().count(),
        count_words(&summary)
    );
    println!(
        "Original: {} words (~{} min read)",
        count_words(&input),
        estimate_reading_time(&input)
    );

    if config.history.enabled && !no_history {
        let store = HistoryStore::new(config.history_path(), config.history.max_entries);
        if let Err(e) = store.add(&input, &summary, &options) {
            tracing::warn!(error = %e, "failed to record summary history");
        }
    }

    Ok(())
}
