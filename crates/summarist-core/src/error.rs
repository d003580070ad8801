use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter text to summarize")]
    EmptyInput,

    #[error("Rate limit exceeded. Try again in {retry_after_secs} seconds.")]
    RateLimit { retry_after_secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid summary option: {0}")]
    InvalidOption(String),

    #[error("Summarization provider error: {0}")]
    Provider(String),

    #[error("Failed to generate summary. Please try again.")]
    SummaryFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
