//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// OpenAI-compatible chat-completions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider name recorded on registered agents (default: "groq").
    pub name: String,
    /// Base URL; requests go to `{base_url}/chat/completions`.
    pub base_url: String,
    /// Environment variable holding the API key (default: "GROQ_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Model used when neither the agent nor `--model` names one.
    pub default_model: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            name: "groq".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            default_model: "llama3-70b-8192".to_string(),
            timeout_seconds: Some(60),
        }
    }
}

impl FileProviderConfig {
    /// The API key: the env var wins over an inline key.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }
}
