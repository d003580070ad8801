mod extractive;
mod huggingface;
mod local_model;
mod on_device;
mod openai;

pub use extractive::ExtractiveProvider;
pub use huggingface::HuggingFaceProvider;
pub use local_model::LocalModelProvider;
pub use on_device::{HostSummarizer, OnDeviceProvider};
pub use openai::OpenAiProvider;

use std::time::Duration;

use crate::summarize::SummaryOptions;

const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Outcome of a single provider attempt.
///
/// Adapters are firewalls: HTTP errors, timeouts, missing runtimes, and
/// malformed responses are all logged and downgraded to `Unavailable`.
/// No provider-internal error crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Summary(String),
    Unavailable,
}

/// One summarization backend in the fallback chain.
#[async_trait::async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Cheap availability probe; `false` skips the attempt entirely
    fn probe(&self) -> bool {
        true
    }

    /// Upper bound on one attempt, enforced by the orchestrator
    fn timeout(&self) -> Duration {
        Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS)
    }

    /// Try to produce a summary, or report unavailable
    async fn attempt(&self, text: &str, options: &SummaryOptions) -> ProviderOutcome;
}
