pub mod config;
pub mod error;
pub mod history;
pub mod ratelimit;
pub mod summarize;
pub mod text;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use summarize::{SummarizeState, Summarizer, SummaryFormat, SummaryLength, SummaryOptions};
