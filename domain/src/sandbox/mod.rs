//! Sandbox domain
//!
//! Agents, messages and conversations as the controller records them.

pub mod entities;

pub use entities::{AgentConfig, MessageTokens, SandboxConversation, SandboxMessage};
