//! Domain layer for llm-sandbox
//!
//! This crate contains the core logic of the sandbox: the prompt-building
//! protocol, the agent-to-agent registry and the conversation analytics.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Protocols
//!
//! - **MCP** ([`protocol::mcp`]): assembles ranked instructions and message
//!   history into one prompt, and splits a model's reply into visible content
//!   and the reasoning after the `"Thinking:"` marker
//! - **A2A** ([`protocol::a2a`]): a registry of agents, conversations and
//!   tasks with participant and authorization checks
//!
//! ## Analytics
//!
//! Deterministic text heuristics over a transcript: sentiment, emergent
//! leadership, information flow and cognitive-dimension vectors.

pub mod analytics;
pub mod config;
pub mod core;
pub mod presets;
pub mod prompt;
pub mod protocol;
pub mod sandbox;

// Re-export commonly used types
pub use analytics::{
    AnalyticsError, AverageSentiment, CognitiveDimension, CognitiveShift, CognitiveSnapshot,
    CognitiveVector, InformationFlow, LeadershipScores, Sentiment, SentimentLabel,
    TrajectoryPoint, Utterance,
};
pub use config::OutputFormat;
pub use core::tokens::{estimate_tokens, truncate_to_token_limit};
pub use presets::{AgentPreset, ConversationTemplate, InteractionStyle};
pub use prompt::SandboxPromptTemplate;
pub use protocol::a2a::{A2aError, AgentToAgentProtocol, InMemoryA2aStore};
pub use protocol::mcp::{InstructionKind, ModelContextProtocol, Role, UsageMetadata};
pub use sandbox::{AgentConfig, MessageTokens, SandboxConversation, SandboxMessage};
