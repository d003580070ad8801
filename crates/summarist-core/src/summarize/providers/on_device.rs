use std::sync::Arc;

use super::{ProviderOutcome, SummaryProvider};
use crate::summarize::SummaryOptions;
use crate::Result;

/// On-device summarization capability supplied by the host application.
///
/// Hosts that ship a native summarizer register one when constructing the
/// summarizer; hosts without one leave it unset and this provider is
/// skipped without error or network traffic.
#[async_trait::async_trait]
pub trait HostSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

pub struct OnDeviceProvider {
    capability: Option<Arc<dyn HostSummarizer>>,
}

impl OnDeviceProvider {
    pub fn new(capability: Option<Arc<dyn HostSummarizer>>) -> Self {
        Self { capability }
    }
}

#[async_trait::async_trait]
impl SummaryProvider for OnDeviceProvider {
    fn name(&self) -> &'static str {
        "on-device"
    }

    fn probe(&self) -> bool {
        self.capability.is_some()
    }

    async fn attempt(&self, text: &str, _options: &SummaryOptions) -> ProviderOutcome {
        let Some(capability) = &self.capability else {
            return ProviderOutcome::Unavailable;
        };

        match capability.summarize(text).await {
            Ok(summary) if !summary.trim().is_empty() => ProviderOutcome::Summary(summary),
            Ok(_) => {
                tracing::warn!("on-device summarizer returned empty output");
                ProviderOutcome::Unavailable
            }
            Err(e) => {
                tracing::warn!(error = %e, "on-device summarizer failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}
