//! Conversation settings: use case parameter control.
//!
//! [`ConversationSettings`] groups the static parameters that control how
//! [`RunConversationUseCase`](crate::use_cases::run_conversation::RunConversationUseCase)
//! asks agents for turns. These are application-layer concerns, not domain
//! policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_PROVIDER: &str = "groq";

/// Sampling and budget parameters for agent turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSettings {
    /// Model used when an agent does not name one.
    pub default_model: String,
    /// Provider name recorded in the agent registry and prompt context.
    pub provider: String,
    pub temperature: f64,
    /// `max_tokens` sent with every turn request.
    pub max_tokens: u32,
    /// Visible content is truncated to this many estimated tokens.
    pub content_token_limit: usize,
    /// Reasoning is truncated to this many estimated tokens.
    pub thinking_token_limit: usize,
    /// Upper bound for one gateway call.
    pub timeout: Option<Duration>,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            content_token_limit: 500,
            thinking_token_limit: 300,
            timeout: None,
        }
    }
}

impl ConversationSettings {
    // ==================== Builder Methods ====================

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_token_limits(mut self, content: usize, thinking: usize) -> Self {
        self.content_token_limit = content;
        self.thinking_token_limit = thinking;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConversationSettings::default();
        assert_eq!(settings.default_model, "llama3-70b-8192");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.content_token_limit, 500);
        assert_eq!(settings.thinking_token_limit, 300);
        assert!(settings.timeout.is_none());
    }

    #[test]
    fn test_builders() {
        let settings = ConversationSettings::default()
            .with_temperature(0.9)
            .with_max_tokens(200)
            .with_token_limits(100, 50)
            .with_timeout_seconds(Some(30));
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.max_tokens, 200);
        assert_eq!(settings.content_token_limit, 100);
        assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
    }
}
