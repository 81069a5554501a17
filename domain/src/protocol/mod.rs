//! In-memory protocols used to structure multi-agent turns.
//!
//! - [`mcp`]: renders one agent's instructions and history into a prompt
//! - [`a2a`]: registry of agents, conversations and tasks with
//!   participant-checked message passing
//!
//! [`a2a::AgentToAgentProtocol::convert_to_mcp_messages`] is the bridge
//! between the two.

pub mod a2a;
pub mod mcp;
