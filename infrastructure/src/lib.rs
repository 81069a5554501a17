//! Infrastructure layer for llm-sandbox
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the chat-completions gateway, the JSONL
//! conversation logger and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnalyticsConfig, FileConfig, FileConversationConfig,
    FileLoggingConfig, FileOutputConfig, FileProviderConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::ChatCompletionsGateway;
