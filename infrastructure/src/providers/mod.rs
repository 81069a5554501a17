//! LLM provider adapters implementing the
//! [`LlmGateway`](sandbox_application::LlmGateway) port.

pub mod chat_completions;

pub use chat_completions::ChatCompletionsGateway;
