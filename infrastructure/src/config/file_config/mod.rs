//! Raw TOML configuration data types
//!
//! These structs mirror the TOML config file section by section. They are
//! deserialized directly and use domain types where appropriate.

mod analytics;
mod conversation;
mod logging;
mod output;
mod provider;

pub use analytics::FileAnalyticsConfig;
pub use conversation::FileConversationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileProviderConfig};

use sandbox_application::ConversationSettings;
use sandbox_domain::presets::interaction_style;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("conversation.temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f64),

    #[error("conversation.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("conversation.turns cannot be 0")]
    InvalidTurns,

    #[error("conversation.style '{0}' is not a known interaction style")]
    UnknownStyle(String),

    #[error("analytics.shift_threshold must be positive, got {0}")]
    InvalidShiftThreshold(f64),

    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.default_model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completions endpoint and credentials
    pub provider: FileProviderConfig,
    /// Turn count, sampling and token budgets
    pub conversation: FileConversationConfig,
    /// Analytics thresholds
    pub analytics: FileAnalyticsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let temperature = self.conversation.effective_temperature();
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }

        if self.conversation.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        if self.conversation.turns == 0 {
            return Err(ConfigValidationError::InvalidTurns);
        }

        if interaction_style(&self.conversation.style).is_none() {
            return Err(ConfigValidationError::UnknownStyle(
                self.conversation.style.clone(),
            ));
        }

        // NaN fails this check too
        if !(self.analytics.shift_threshold > 0.0) {
            return Err(ConfigValidationError::InvalidShiftThreshold(
                self.analytics.shift_threshold,
            ));
        }

        if let Some(0) = self.provider.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.provider.default_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        Ok(())
    }

    /// Settings for the conversation use case.
    pub fn conversation_settings(&self) -> ConversationSettings {
        ConversationSettings::default()
            .with_default_model(self.provider.default_model.clone())
            .with_provider(self.provider.name.clone())
            .with_temperature(self.conversation.effective_temperature())
            .with_max_tokens(self.conversation.max_tokens)
            .with_token_limits(
                self.conversation.content_token_limit,
                self.conversation.thinking_token_limit,
            )
            .with_timeout_seconds(self.provider.timeout_seconds)
    }
}
