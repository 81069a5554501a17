//! Application layer for llm-sandbox
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ConversationSettings;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatCompletion, ChatMessage, ChatRequest, ChatUsage, GatewayError, LlmGateway},
    progress::{ConversationProgress, NoProgress},
};
pub use use_cases::analyze_conversation::{
    AgentSentiment, AnalyzeConversationUseCase, ConversationReport, MessageAnalysis,
};
pub use use_cases::run_conversation::{RunConversationError, RunConversationUseCase};
