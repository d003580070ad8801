use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ProviderOutcome, SummaryProvider};
use crate::config::AppConfig;
use crate::ratelimit::RateLimiter;
use crate::summarize::{SummaryFormat, SummaryLength, SummaryOptions};
use crate::{Error, Result};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI chat-completions provider.
///
/// The instruction prompt is assembled from the requested length, style,
/// and ratio only, so identical options always produce identical
/// requests.
pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    limiter: Arc<RateLimiter>,
}

impl OpenAiProvider {
    pub fn new(config: &AppConfig, limiter: Arc<RateLimiter>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(OPENAI_REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build OpenAI HTTP client");

        Self {
            client,
            api_key: config.summarizer.openai_api_key.clone(),
            model: config.summarizer.openai_model.clone(),
            limiter,
        }
    }

    async fn request(&self, key: &str, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .header("Content-Type", "application/json")
            .bearer_auth(key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "OpenAI API returned {}",
                response.status()
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Provider("message content missing from OpenAI response".to_string()))
    }
}

/// Assemble the summarization instruction from the options and text.
fn build_prompt(text: &str, options: &SummaryOptions) -> String {
    let mut prompt = String::from("Summarize the following text");

    match options.length {
        SummaryLength::Short => prompt.push_str(" in a very brief way"),
        SummaryLength::Long => prompt.push_str(" comprehensively"),
        SummaryLength::Medium => {}
    }

    match options.format {
        SummaryFormat::Bullet => prompt.push_str(" into bullet points"),
        SummaryFormat::KeyPoints => prompt.push_str(" highlighting only the key points"),
        SummaryFormat::Paragraph => {}
    }

    prompt.push_str(&format!(
        ". Use approximately {}% of the original length: {}",
        options.ratio, text
    ));

    prompt
}

#[async_trait::async_trait]
impl SummaryProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(OPENAI_REQUEST_TIMEOUT_SECS)
    }

    async fn attempt(&self, text: &str, options: &SummaryOptions) -> ProviderOutcome {
        // Missing credential disables the provider, no network call.
        let Some(key) = self.api_key.as_deref() else {
            tracing::warn!("OpenAI key not configured, skipping");
            return ProviderOutcome::Unavailable;
        };

        let prompt = build_prompt(text, options);

        match self.limiter.run(|| self.request(key, prompt)).await {
            Ok(summary) => ProviderOutcome::Summary(summary),
            Err(e) => {
                tracing::warn!(error = %e, "OpenAI provider failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_for_long_key_points() {
        let options = SummaryOptions::new(SummaryLength::Long, SummaryFormat::KeyPoints, 30);
        assert_eq!(
            build_prompt("Hello world.", &options),
            "Summarize the following text comprehensively highlighting only the key points. \
             Use approximately 30% of the original length: Hello world."
        );
    }

    #[test]
    fn medium_paragraph_adds_no_qualifiers() {
        let options = SummaryOptions::new(SummaryLength::Medium, SummaryFormat::Paragraph, 50);
        assert_eq!(
            build_prompt("Text.", &options),
            "Summarize the following text. Use approximately 50% of the original length: Text."
        );
    }

    #[test]
    fn short_bullet_qualifiers_in_order() {
        let options = SummaryOptions::new(SummaryLength::Short, SummaryFormat::Bullet, 10);
        assert_eq!(
            build_prompt("T.", &options),
            "Summarize the following text in a very brief way into bullet points. \
             Use approximately 10% of the original length: T."
        );
    }

    #[tokio::test]
    async fn missing_key_is_unavailable_without_network() {
        let config = AppConfig::default();
        let provider = OpenAiProvider::new(&config, Arc::new(RateLimiter::default()));

        let outcome = provider
            .attempt("Some text.", &SummaryOptions::default())
            .await;
        assert_eq!(outcome, ProviderOutcome::Unavailable);
    }
}
