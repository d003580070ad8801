use anyhow::Result;

use summarist_core::history::{HistoryEntry, HistoryStore};
use summarist_core::AppConfig;

fn store(config: &AppConfig) -> HistoryStore {
    HistoryStore::new(config.history_path(), config.history.max_entries)
}

/// Render one entry, keeping multi-line summaries intact.
fn render_entry(entry: &HistoryEntry) -> String {
    let mut out = format!(
        "  {} [{} / {} / {}%]\n    Input: {}\n    Summary:\n",
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.options.length,
        entry.options.format,
        entry.options.ratio,
        entry.snippet
    );
    for line in entry.summary.lines() {
        out.push_str("      ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn list(config: &AppConfig) -> Result<()> {
    let entries = store(config).load()?;

    if entries.is_empty() {
        println!("No summaries recorded yet.");
        println!("\nTo summarize some text, run:");
        println!("  summarist summarize <file>");
        return Ok(());
    }

    println!("Recent summaries ({}):\n", entries.len());

    for entry in &entries {
        print!("{}", render_entry(entry));
        println!();
    }

    Ok(())
}

pub fn clear(config: &AppConfig) -> Result<()> {
    store(config).clear()?;
    println!("History cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarist_core::{SummaryFormat, SummaryLength, SummaryOptions};

    #[test]
    fn multi_line_summaries_render_in_full() {
        let entry = HistoryEntry {
            snippet: "input text".to_string(),
            summary: "• First point.\n• Second point.\n• Third point.".to_string(),
            options: SummaryOptions::new(SummaryLength::Short, SummaryFormat::Bullet, 50),
            created_at: Default::default(),
        };

        let rendered = render_entry(&entry);
        assert!(rendered.contains("      • First point.\n"));
        assert!(rendered.contains("      • Second point.\n"));
        assert!(rendered.contains("      • Third point.\n"));
    }

    #[test]
    fn single_line_summary_renders_once() {
        let entry = HistoryEntry {
            snippet: "input".to_string(),
            summary: "Just one line.".to_string(),
            options: SummaryOptions::default(),
            created_at: Default::default(),
        };

        let rendered = render_entry(&entry);
        assert_eq!(rendered.matches("Just one line.").count(), 1);
    }
}
