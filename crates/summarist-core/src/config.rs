use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            summarizer: SummarizerConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Hugging Face Inference API token (absent disables the provider)
    #[serde(default)]
    pub hf_api_token: Option<String>,
    /// Hugging Face summarization model
    #[serde(default = "default_hf_model")]
    pub hf_model: String,
    /// OpenAI API key (absent disables the provider)
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Local inference runtime command
    #[serde(default = "default_local_model_command")]
    pub local_model_command: String,
    /// Model name passed to the local runtime
    #[serde(default = "default_local_model")]
    pub local_model: String,
    /// Max remote API calls per rate-limit window
    #[serde(default = "default_rate_limit_calls")]
    pub rate_limit_calls: u32,
    /// Rate-limit window length in seconds
    #[serde(default = "default_rate_limit_interval")]
    pub rate_limit_interval_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            hf_api_token: None,
            hf_model: default_hf_model(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            local_model_command: default_local_model_command(),
            local_model: default_local_model(),
            rate_limit_calls: default_rate_limit_calls(),
            rate_limit_interval_secs: default_rate_limit_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record summaries in the history file
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of retained history entries
    #[serde(default = "default_max_history")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_entries: default_max_history(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("summarist")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_hf_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_local_model_command() -> String {
    "ollama".to_string()
}

fn default_local_model() -> String {
    "llama3.2".to_string()
}

fn default_rate_limit_calls() -> u32 {
    5
}

fn default_rate_limit_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_max_history() -> usize {
    10
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults.
    ///
    /// Credentials in the environment (`HF_API_TOKEN`, `OPENAI_API_KEY`)
    /// override the config file. A missing credential is a valid state:
    /// it disables the corresponding provider without error.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("HF_API_TOKEN") {
            if !token.is_empty() {
                self.summarizer.hf_api_token = Some(token);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.summarizer.openai_api_key = Some(key);
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/summarist/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("summarist")
            .join("config.toml")
    }

    /// Get the history file path
    pub fn history_path(&self) -> PathBuf {
        self.data_dir().join("history.json")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: AppConfig = toml::from_str("[summarizer]\nhf_model = \"t5-small\"").unwrap();
        assert_eq!(config.summarizer.hf_model, "t5-small");
        assert_eq!(config.summarizer.openai_model, "gpt-3.5-turbo");
        assert!(config.summarizer.hf_api_token.is_none());
        assert_eq!(config.summarizer.rate_limit_calls, 5);
        assert_eq!(config.history.max_entries, 10);
        assert!(config.history.enabled);
    }

    #[test]
    fn missing_credentials_are_valid() {
        let config = AppConfig::default();
        assert!(config.summarizer.hf_api_token.is_none());
        assert!(config.summarizer.openai_api_key.is_none());
    }
}
