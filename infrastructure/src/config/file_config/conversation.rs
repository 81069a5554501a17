//! Conversation configuration from TOML (`[conversation]` section)

use sandbox_domain::presets::interaction_style;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    /// Total number of turns, the opening turn included.
    pub turns: usize,
    /// Interaction style id ("balanced", "exploratory", "structured", "custom").
    pub style: String,
    /// Overrides the style's temperature when set.
    pub temperature: Option<f64>,
    pub max_tokens: u32,
    pub content_token_limit: usize,
    pub thinking_token_limit: usize,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        Self {
            turns: 6,
            style: "balanced".to_string(),
            temperature: None,
            max_tokens: 500,
            content_token_limit: 500,
            thinking_token_limit: 300,
        }
    }
}

impl FileConversationConfig {
    /// Explicit temperature, else the style's, else 0.7.
    pub fn effective_temperature(&self) -> f64 {
        self.temperature
            .or_else(|| interaction_style(&self.style).map(|s| s.temperature))
            .unwrap_or(0.7)
    }
}
