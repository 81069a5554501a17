//! Progress notification port
//!
//! Defines the interface for reporting progress while a conversation runs.

use sandbox_domain::{AgentConfig, SandboxMessage};

/// Callback for progress updates during a conversation
///
/// Implementations live in the presentation layer (console spinner, ...).
pub trait ConversationProgress: Send + Sync {
    /// Called before an agent is asked for its turn. `turn` is 1-based.
    fn on_turn_start(&self, turn: usize, total_turns: usize, agent: &AgentConfig);

    /// Called when a turn produced a message
    fn on_turn_complete(&self, turn: usize, agent: &AgentConfig, message: &SandboxMessage);

    /// Called when a turn failed; the run stops afterwards
    fn on_turn_failed(&self, _turn: usize, _agent: &AgentConfig, _error: &str) {}

    /// Called once all turns are done
    fn on_run_complete(&self, _total_messages: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConversationProgress for NoProgress {
    fn on_turn_start(&self, _turn: usize, _total_turns: usize, _agent: &AgentConfig) {}
    fn on_turn_complete(&self, _turn: usize, _agent: &AgentConfig, _message: &SandboxMessage) {}
}
