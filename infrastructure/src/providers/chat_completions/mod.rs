//! OpenAI-compatible chat-completions provider
//!
//! One POST per turn to `{base_url}/chat/completions` with a bearer key.

mod gateway;
mod types;

pub use gateway::ChatCompletionsGateway;
