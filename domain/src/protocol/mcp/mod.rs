//! Prompt-building protocol (MCP)
//!
//! - [`ModelContextProtocol`]: instructions + history for one agent turn
//! - [`split_thinking`]: the `"Thinking:"` response convention

mod entities;
mod protocol;

pub use entities::{
    ContextWindow, Instruction, InstructionKind, McpContext, McpContextInit, McpMessage,
    McpResponse, Memory, MessageMetadata, MessageReferences, MetadataPatch, ModelMetadata,
    ResponseMetadata, Role, UsageMetadata,
};
pub use protocol::{ModelContextProtocol, THINKING_MARKER, split_thinking};
