use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ProviderOutcome, SummaryProvider};
use crate::config::AppConfig;
use crate::ratelimit::RateLimiter;
use crate::summarize::SummaryOptions;
use crate::{Error, Result};

const HF_INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";
const HF_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: Option<String>,
}

/// Hugging Face Inference API provider
pub struct HuggingFaceProvider {
    client: Client,
    api_token: Option<String>,
    model: String,
    limiter: Arc<RateLimiter>,
}

impl HuggingFaceProvider {
    pub fn new(config: &AppConfig, limiter: Arc<RateLimiter>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HF_REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build Hugging Face HTTP client");

        Self {
            client,
            api_token: config.summarizer.hf_api_token.clone(),
            model: config.summarizer.hf_model.clone(),
            limiter,
        }
    }

    async fn request(&self, token: &str, text: &str) -> Result<String> {
        let url = format!("{HF_INFERENCE_BASE}/{}", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&HfRequest { inputs: text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Hugging Face API returned {}",
                response.status()
            )));
        }

        let results: Vec<HfSummary> = response.json().await?;

        results
            .into_iter()
            .next()
            .and_then(|r| r.summary_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                Error::Provider("summary_text missing from Hugging Face response".to_string())
            })
    }
}

#[async_trait::async_trait]
impl SummaryProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(HF_REQUEST_TIMEOUT_SECS)
    }

    async fn attempt(&self, text: &str, _options: &SummaryOptions) -> ProviderOutcome {
        // Missing credential disables the provider, no network call.
        let Some(token) = self.api_token.as_deref() else {
            tracing::warn!("Hugging Face token not configured, skipping");
            return ProviderOutcome::Unavailable;
        };

        match self.limiter.run(|| self.request(token, text)).await {
            Ok(summary) => ProviderOutcome::Summary(summary),
            Err(e) => {
                tracing::warn!(error = %e, "Hugging Face provider failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}
