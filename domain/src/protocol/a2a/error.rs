//! A2A registry errors

use thiserror::Error;

/// Precondition violations raised by the agent registry.
///
/// Every variant is fatal to the operation that produced it; no operation
/// leaves partial state behind when it fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum A2aError {
    #[error("Agent with ID {0} is not registered")]
    UnregisteredAgent(String),

    #[error("Conversation with ID {0} not found")]
    ConversationNotFound(String),

    #[error("Agent with ID {agent_id} is not a participant in conversation {conversation_id}")]
    NotParticipant {
        conversation_id: String,
        agent_id: String,
    },

    #[error("Task with ID {0} not found")]
    TaskNotFound(String),

    #[error("Agent with ID {agent_id} is not authorized to update task {task_id}")]
    NotAuthorized { task_id: String, agent_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            A2aError::UnregisteredAgent("x".to_string()).to_string(),
            "Agent with ID x is not registered"
        );
        let err = A2aError::NotParticipant {
            conversation_id: "c1".to_string(),
            agent_id: "a9".to_string(),
        };
        assert!(err.to_string().contains("a9"));
        assert!(err.to_string().contains("c1"));
    }
}
