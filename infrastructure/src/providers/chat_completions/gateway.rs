//! Chat-completions LLM Gateway implementation

use super::types::{ChatCompletionResponse, error_message};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use sandbox_application::{ChatCompletion, ChatRequest, GatewayError, LlmGateway};
use std::time::Duration;
use tracing::{debug, info};

/// LLM Gateway for any OpenAI-compatible `/chat/completions` endpoint
/// (Groq by default).
pub struct ChatCompletionsGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionsGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a gateway from the `[provider]` section.
    ///
    /// Fails with [`GatewayError::MissingApiKey`] when no key is configured.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GatewayError::MissingApiKey(config.api_key_env.clone()))?;

        let gateway = Self::new(
            config.base_url.clone(),
            api_key,
            config.timeout_seconds.map(Duration::from_secs),
        )?;
        info!("Chat-completions gateway initialized ({})", gateway.base_url);
        Ok(gateway)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionsGateway {
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, GatewayError> {
        debug!(
            "POST {} model={} messages={}",
            self.endpoint(),
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body
                }
            });
            return Err(GatewayError::RequestFailed(format!(
                "{} (HTTP {})",
                message,
                status.as_u16()
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        body.into_completion()
    }
}

impl std::fmt::Debug for ChatCompletionsGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsGateway")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = ChatCompletionsGateway::new("https://api.groq.com/openai/v1/", "k", None).unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_missing_key_is_reported() {
        let config = FileProviderConfig {
            api_key_env: "LLM_SANDBOX_TEST_UNSET_KEY".to_string(),
            api_key: None,
            ..FileProviderConfig::default()
        };
        match ChatCompletionsGateway::from_config(&config) {
            Err(GatewayError::MissingApiKey(var)) => assert_eq!(var, "LLM_SANDBOX_TEST_UNSET_KEY"),
            other => panic!("expected MissingApiKey, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_inline_key_is_used_without_env() {
        let config = FileProviderConfig {
            api_key_env: "LLM_SANDBOX_TEST_UNSET_KEY".to_string(),
            api_key: Some("inline".to_string()),
            ..FileProviderConfig::default()
        };
        let gateway = ChatCompletionsGateway::from_config(&config).unwrap();
        assert!(!format!("{:?}", gateway).contains("inline"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let gateway = ChatCompletionsGateway::new(
            "http://127.0.0.1:1/v1",
            "k",
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let request = ChatRequest {
            model: "llama3-70b-8192".to_string(),
            messages: vec![],
            temperature: 0.7,
            max_tokens: 10,
        };
        let err = gateway.chat(request).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConnectionError(_) | GatewayError::Timeout
        ));
    }
}
