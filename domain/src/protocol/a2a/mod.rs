//! Agent-to-agent registry (A2A)
//!
//! - [`AgentToAgentProtocol`]: participant-checked message passing and tasks
//! - [`A2aStore`] / [`InMemoryA2aStore`]: the owned storage behind it
//! - [`A2aError`]: precondition violations

mod entities;
mod error;
mod protocol;
mod store;

pub use entities::{
    A2aAgent, A2aConversation, A2aMessage, A2aMessageMetadata, A2aTask, AgentMetadata,
    ConversationStatus, MessageKind, Priority, Receiver, SendOptions, TaskMetadata, TaskOptions,
    TaskStatus,
};
pub use error::A2aError;
pub use protocol::AgentToAgentProtocol;
pub use store::{A2aStore, InMemoryA2aStore};
