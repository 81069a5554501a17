//! Application-level configuration.
//!
//! - [`ConversationSettings`]: sampling, token budgets and timeouts for agent turns

pub mod conversation_settings;

pub use conversation_settings::ConversationSettings;
