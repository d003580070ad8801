use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::OnceCell;

use super::{ProviderOutcome, SummaryProvider};
use crate::config::AppConfig;
use crate::summarize::SummaryOptions;

const LOCAL_MODEL_TIMEOUT_SECS: u64 = 60;

/// Local model pipeline provider.
///
/// Drives a locally installed inference runtime (`ollama` by default)
/// with the prompt on stdin and reads the summary from stdout. The
/// runtime is probed once on first use and the result cached, so a host
/// without it pays one failed spawn per process, not per request.
pub struct LocalModelProvider {
    command: String,
    model: String,
    runtime_ready: OnceCell<bool>,
}

impl LocalModelProvider {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            command: config.summarizer.local_model_command.clone(),
            model: config.summarizer.local_model.clone(),
            runtime_ready: OnceCell::new(),
        }
    }

    async fn runtime_available(&self) -> bool {
        *self
            .runtime_ready
            .get_or_init(|| async {
                let probe = Command::new(&self.command)
                    .arg("--version")
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .await;

                match probe {
                    Ok(status) => status.success(),
                    Err(e) => {
                        tracing::debug!(command = %self.command, error = %e, "local model runtime not found");
                        false
                    }
                }
            })
            .await
    }

    async fn run_model(&self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut child = Command::new(&self.command)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(command = %self.command, model = %self.model, %stderr, "local model exited with error");
            return Ok(None);
        }

        let summary = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!summary.is_empty()).then_some(summary))
    }
}

#[async_trait::async_trait]
impl SummaryProvider for LocalModelProvider {
    fn name(&self) -> &'static str {
        "local-model"
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(LOCAL_MODEL_TIMEOUT_SECS)
    }

    async fn attempt(&self, text: &str, options: &SummaryOptions) -> ProviderOutcome {
        if !self.runtime_available().await {
            return ProviderOutcome::Unavailable;
        }

        let prompt = format!(
            "Summarize the following text. Use approximately {}% of the original length:\n\n{}",
            options.ratio, text
        );

        match self.run_model(&prompt).await {
            Ok(Some(summary)) => ProviderOutcome::Summary(summary),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::warn!(error = %e, "local model invocation failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}
