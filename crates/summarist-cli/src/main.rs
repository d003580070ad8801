use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use summarist_core::{AppConfig, SummaryFormat, SummaryLength};

mod commands;

#[derive(Parser)]
#[command(name = "summarist")]
#[command(author, version, about = "Summarize text with layered AI providers and a local fallback")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text from a file, --text, or stdin
    Summarize {
        /// File to read; stdin is used when neither FILE nor --text is given
        file: Option<PathBuf>,
        /// Text to summarize (takes precedence over FILE)
        #[arg(short, long)]
        text: Option<String>,
        /// Summary length: short, medium, long
        #[arg(short, long, default_value = "medium")]
        length: SummaryLength,
        /// Output style: paragraph, bullet, key-points
        #[arg(short, long, default_value = "paragraph")]
        format: SummaryFormat,
        /// Target percentage of the original length (10-90)
        #[arg(short, long, default_value_t = 50)]
        ratio: u8,
        /// Skip recording this summary in the history file
        #[arg(long)]
        no_history: bool,
    },
    /// Manage the summary history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recent summaries
    List,
    /// Remove all recorded summaries
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            file,
            text,
            length,
            format,
            ratio,
            no_history,
        } => commands::summarize::run(&config, file, text, length, format, ratio, no_history).await,
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&config),
            HistoryAction::Clear => commands::history::clear(&config),
        },
    }
}
