//! LLM Gateway port
//!
//! Defines the interface for sending chat completions to an LLM provider.

use async_trait::async_trait;
use sandbox_domain::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API key not configured: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// One message of a chat-completions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

/// The first choice of a completion, plus usage if the provider sent it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<ChatUsage>,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a chat request and return the first choice
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, GatewayError>;
}
