//! Wire types for the OpenAI-compatible chat-completions API.
//!
//! Requests are [`ChatRequest`](sandbox_application::ChatRequest) serialized
//! as-is; only the response side needs its own shapes.

use sandbox_application::{ChatCompletion, ChatUsage, GatewayError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Take the first choice; a response without choices is invalid.
    pub(crate) fn into_completion(self) -> Result<ChatCompletion, GatewayError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

        Ok(ChatCompletion {
            content: choice.message.content.unwrap_or_default(),
            usage: self.usage,
        })
    }
}

/// Pull the error message out of an error body.
///
/// Accepts `{"error": {"message": "..."}}` and `{"error": "..."}`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
