use super::{ProviderOutcome, SummaryProvider};
use crate::summarize::SummaryOptions;
use crate::text::extractive;

/// Terminal member of the fallback chain.
///
/// Purely positional extraction with no I/O, so it can never report
/// unavailable; any non-empty input yields a summary.
pub struct ExtractiveProvider;

#[async_trait::async_trait]
impl SummaryProvider for ExtractiveProvider {
    fn name(&self) -> &'static str {
        "extractive"
    }

    async fn attempt(&self, text: &str, options: &SummaryOptions) -> ProviderOutcome {
        ProviderOutcome::Summary(extractive::summarize(text, options.ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_produces_a_summary() {
        let provider = ExtractiveProvider;
        let outcome = provider
            .attempt("One. Two. Three. Four.", &SummaryOptions::default())
            .await;
        assert_eq!(outcome, ProviderOutcome::Summary("One. Two.".to_string()));
    }
}
