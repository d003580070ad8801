//! Summarization orchestration.
//!
//! A fixed-priority chain of providers is tried strictly in order until
//! one produces a non-empty summary; the deterministic extractive
//! fallback terminates the chain, so summarization succeeds for any
//! non-empty input even with every external backend down.

pub mod providers;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::ratelimit::RateLimiter;
use crate::text::format::format_summary;
use crate::{Error, Result};
use providers::{
    ExtractiveProvider, HostSummarizer, HuggingFaceProvider, LocalModelProvider,
    OnDeviceProvider, OpenAiProvider, ProviderOutcome, SummaryProvider,
};

pub const MIN_RATIO: u8 = 10;
pub const MAX_RATIO: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl FromStr for SummaryLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(Error::InvalidOption(format!(
                "unknown summary length '{other}' (expected short, medium, or long)"
            ))),
        }
    }
}

impl std::fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    Paragraph,
    Bullet,
    KeyPoints,
}

impl FromStr for SummaryFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "bullet" => Ok(Self::Bullet),
            "key-points" => Ok(Self::KeyPoints),
            other => Err(Error::InvalidOption(format!(
                "unknown summary format '{other}' (expected paragraph, bullet, or key-points)"
            ))),
        }
    }
}

impl std::fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Paragraph => "paragraph",
            Self::Bullet => "bullet",
            Self::KeyPoints => "key-points",
        })
    }
}

/// Options for one summarization request, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub length: SummaryLength,
    pub format: SummaryFormat,
    /// Target percentage of the original length, within [10, 90]
    pub ratio: u8,
}

impl SummaryOptions {
    pub fn new(length: SummaryLength, format: SummaryFormat, ratio: u8) -> Self {
        Self {
            length,
            format,
            ratio: ratio.clamp(MIN_RATIO, MAX_RATIO),
        }
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            length: SummaryLength::Medium,
            format: SummaryFormat::Paragraph,
            ratio: 50,
        }
    }
}

/// Progress of the current summarization request, for UI binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizeState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Summarizer that resolves a request through the provider chain.
pub struct Summarizer {
    providers: Vec<Arc<dyn SummaryProvider>>,
    state_tx: watch::Sender<SummarizeState>,
}

impl Summarizer {
    /// Build the default chain from configuration. Priority order is
    /// fixed: on-device capability, local model, Hugging Face, OpenAI,
    /// extractive fallback.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_host_capability(config, None)
    }

    /// Same as [`Summarizer::new`], with a host-provided on-device
    /// summarization capability at the front of the chain.
    pub fn with_host_capability(
        config: &AppConfig,
        capability: Option<Arc<dyn HostSummarizer>>,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.summarizer.rate_limit_calls,
            Duration::from_secs(config.summarizer.rate_limit_interval_secs),
        ));

        Self::with_providers(vec![
            Arc::new(OnDeviceProvider::new(capability)),
            Arc::new(LocalModelProvider::new(config)),
            Arc::new(HuggingFaceProvider::new(config, Arc::clone(&limiter))),
            Arc::new(OpenAiProvider::new(config, limiter)),
            Arc::new(ExtractiveProvider),
        ])
    }

    /// Build a summarizer over an explicit provider chain.
    pub fn with_providers(providers: Vec<Arc<dyn SummaryProvider>>) -> Self {
        let (state_tx, _) = watch::channel(SummarizeState::Idle);
        Self { providers, state_tx }
    }

    /// Observe summarization progress, e.g. for a spinner.
    pub fn subscribe(&self) -> watch::Receiver<SummarizeState> {
        self.state_tx.subscribe()
    }

    /// Summarize `text` and render it in the requested style.
    ///
    /// Empty or whitespace-only input fails without attempting any
    /// provider. Providers are tried sequentially, one attempt each, no
    /// retries; the first non-empty summary wins and later providers are
    /// never invoked.
    pub async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        if text.trim().is_empty() {
            self.state_tx.send_replace(SummarizeState::Failed);
            return Err(Error::EmptyInput);
        }

        self.state_tx.send_replace(SummarizeState::Running);

        match self.run_chain(text, options).await {
            Ok(summary) => {
                self.state_tx.send_replace(SummarizeState::Succeeded);
                Ok(summary)
            }
            Err(e) => {
                self.state_tx.send_replace(SummarizeState::Failed);
                Err(e)
            }
        }
    }

    async fn run_chain(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        for provider in &self.providers {
            if !provider.probe() {
                tracing::debug!(provider = provider.name(), "provider not present, skipping");
                continue;
            }

            tracing::debug!(provider = provider.name(), "attempting provider");

            let outcome =
                match tokio::time::timeout(provider.timeout(), provider.attempt(text, options))
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        // The underlying request is abandoned, not cancelled.
                        tracing::warn!(provider = provider.name(), "provider attempt timed out");
                        ProviderOutcome::Unavailable
                    }
                };

            match outcome {
                ProviderOutcome::Summary(raw) if !raw.trim().is_empty() => {
                    tracing::debug!(
                        provider = provider.name(),
                        chars = raw.len(),
                        "provider produced summary"
                    );
                    return Ok(format_summary(&raw, options.format));
                }
                ProviderOutcome::Summary(_) => {
                    tracing::warn!(provider = provider.name(), "provider returned empty summary");
                }
                ProviderOutcome::Unavailable => {}
            }
        }

        // The extractive fallback terminates the default chain, so this is
        // only reachable with a custom provider list or a fallback defect.
        Err(Error::SummaryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        name: &'static str,
        outcome: ProviderOutcome,
        present: bool,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn available(name: &'static str, summary: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                outcome: ProviderOutcome::Summary(summary.to_string()),
                present: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn unavailable(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                outcome: ProviderOutcome::Unavailable,
                present: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn absent(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                outcome: ProviderOutcome::Unavailable,
                present: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SummaryProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn probe(&self) -> bool {
            self.present
        }

        async fn attempt(&self, _text: &str, _options: &SummaryOptions) -> ProviderOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    const FOUR_SENTENCES: &str =
        "The first sentence. The second sentence. The third sentence. The fourth sentence.";

    #[tokio::test]
    async fn first_success_short_circuits_the_chain() {
        let first = MockProvider::unavailable("first");
        let second = MockProvider::available("second", "The summary.");
        let third = MockProvider::available("third", "Never used.");

        let summarizer = Summarizer::with_providers(vec![
            first.clone(),
            second.clone(),
            third.clone(),
        ]);

        let summary = summarizer
            .summarize("Some text.", &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(summary, "The summary.");
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(third.call_count(), 0);
    }

    #[tokio::test]
    async fn absent_providers_are_skipped_without_attempt() {
        let absent = MockProvider::absent("absent");
        let fallback = MockProvider::available("fallback", "Result.");

        let summarizer = Summarizer::with_providers(vec![absent.clone(), fallback.clone()]);
        summarizer
            .summarize("Some text.", &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(absent.call_count(), 0);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_provider_output_falls_through() {
        let empty = MockProvider::available("empty", "   ");
        let next = MockProvider::available("next", "Real summary.");

        let summarizer = Summarizer::with_providers(vec![empty.clone(), next.clone()]);
        let summary = summarizer
            .summarize("Some text.", &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(summary, "Real summary.");
        assert_eq!(next.call_count(), 1);
    }

    #[tokio::test]
    async fn all_externals_down_falls_back_to_extraction() {
        let summarizer = Summarizer::with_providers(vec![
            MockProvider::unavailable("on-device"),
            MockProvider::unavailable("local-model"),
            MockProvider::unavailable("huggingface"),
            MockProvider::unavailable("openai"),
            Arc::new(ExtractiveProvider),
        ]);

        let options = SummaryOptions::new(SummaryLength::Short, SummaryFormat::Bullet, 50);
        let summary = summarizer.summarize(FOUR_SENTENCES, &options).await.unwrap();

        assert_eq!(summary, "• The first sentence.\n• The second sentence.");
    }

    struct SlowProvider {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SummaryProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(50)
        }

        async fn attempt(&self, _text: &str, _options: &SummaryOptions) -> ProviderOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(3600)).await;
            ProviderOutcome::Summary("too late".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_provider_falls_through_to_next() {
        let slow = Arc::new(SlowProvider {
            calls: AtomicUsize::new(0),
        });
        let summarizer =
            Summarizer::with_providers(vec![slow.clone(), Arc::new(ExtractiveProvider)]);

        let summary = summarizer
            .summarize("One. Two.", &SummaryOptions::default())
            .await
            .unwrap();

        assert_eq!(summary, "One.\n\nTwo.");
        assert_eq!(slow.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_fails_without_attempting_providers() {
        let provider = MockProvider::available("only", "Unused.");
        let summarizer = Summarizer::with_providers(vec![provider.clone()]);

        let err = summarizer
            .summarize("   \n ", &SummaryOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyInput));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_chain_is_a_generic_failure() {
        let summarizer =
            Summarizer::with_providers(vec![MockProvider::unavailable("only")]);

        let err = summarizer
            .summarize("Some text.", &SummaryOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SummaryFailed));
    }

    #[tokio::test]
    async fn state_tracks_request_lifecycle() {
        let summarizer =
            Summarizer::with_providers(vec![MockProvider::available("only", "Done.")]);
        let state = summarizer.subscribe();
        assert_eq!(*state.borrow(), SummarizeState::Idle);

        summarizer
            .summarize("Some text.", &SummaryOptions::default())
            .await
            .unwrap();
        assert_eq!(*state.borrow(), SummarizeState::Succeeded);

        let _ = summarizer.summarize("", &SummaryOptions::default()).await;
        assert_eq!(*state.borrow(), SummarizeState::Failed);
    }

    #[tokio::test]
    async fn raw_summary_is_formatted_per_options() {
        let summarizer = Summarizer::with_providers(vec![MockProvider::available(
            "only",
            "Point one. Point two.",
        )]);

        let options = SummaryOptions::new(SummaryLength::Medium, SummaryFormat::KeyPoints, 50);
        let summary = summarizer.summarize("Input.", &options).await.unwrap();
        assert_eq!(summary, "1. Point one.\n2. Point two.");
    }

    #[test]
    fn ratio_is_clamped_to_valid_range() {
        assert_eq!(
            SummaryOptions::new(SummaryLength::Medium, SummaryFormat::Paragraph, 5).ratio,
            MIN_RATIO
        );
        assert_eq!(
            SummaryOptions::new(SummaryLength::Medium, SummaryFormat::Paragraph, 95).ratio,
            MAX_RATIO
        );
        assert_eq!(
            SummaryOptions::new(SummaryLength::Medium, SummaryFormat::Paragraph, 42).ratio,
            42
        );
    }

    #[test]
    fn option_spellings_round_trip() {
        assert_eq!(
            "key-points".parse::<SummaryFormat>().unwrap(),
            SummaryFormat::KeyPoints
        );
        assert_eq!(SummaryFormat::KeyPoints.to_string(), "key-points");
        assert_eq!(
            serde_json::to_string(&SummaryFormat::KeyPoints).unwrap(),
            "\"key-points\""
        );
        assert!("verbose".parse::<SummaryLength>().is_err());
    }
}
