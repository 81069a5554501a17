//! A2A registry entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presentation hints and profile data for an agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personality: Vec<String>,
}

/// A registered agent (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aAgent {
    pub id: String,
    pub name: String,
    pub role: String,
    pub capabilities: Vec<String>,
    pub description: String,
    pub instructions: String,
    pub model: String,
    pub provider: String,
    #[serde(default)]
    pub metadata: AgentMetadata,
}

impl A2aAgent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            capabilities: Vec::new(),
            description: String::new(),
            instructions: String::new(),
            model: String::new(),
            provider: String::new(),
            metadata: AgentMetadata::default(),
        }
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Addressee of an A2A message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// Every participant
    Broadcast,
    Agent(String),
}

impl Receiver {
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Receiver::Broadcast)
    }

    /// Whether a message with this receiver is visible to `agent_id` as an addressee.
    pub fn reaches(&self, agent_id: &str) -> bool {
        match self {
            Receiver::Broadcast => true,
            Receiver::Agent(id) => id == agent_id,
        }
    }
}

impl std::fmt::Display for Receiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Receiver::Broadcast => write!(f, "broadcast"),
            Receiver::Agent(id) => write!(f, "{}", id),
        }
    }
}

/// Kind of A2A message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Request,
    Response,
    #[default]
    Notification,
    Query,
    Command,
}

/// Urgency shared by messages and tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Message-specific annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct A2aMessageMetadata {
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requires_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,
    /// Reasoning the sender attached to its response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

/// A message exchanged inside a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver: Receiver,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<A2aMessageMetadata>,
}

/// Lifecycle status of a conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

/// A multi-agent conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aConversation {
    pub id: String,
    pub title: String,
    pub participants: Vec<String>,
    pub messages: Vec<A2aMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: ConversationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
}

impl A2aConversation {
    pub fn is_participant(&self, agent_id: &str) -> bool {
        self.participants.iter().any(|p| p == agent_id)
    }
}

/// Status of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// Task-specific annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Percentage, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<String>,
}

/// A unit of work assigned to one or more agents (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TaskMetadata>,
}

impl A2aTask {
    /// Assignees and the creator may change a task's status.
    pub fn can_be_updated_by(&self, agent_id: &str) -> bool {
        self.created_by == agent_id || self.assigned_to.iter().any(|a| a == agent_id)
    }
}

/// Optional fields for [`send_message`](super::AgentToAgentProtocol::send_message)
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Defaults to [`Receiver::Broadcast`]
    pub receiver: Option<Receiver>,
    pub kind: MessageKind,
    pub metadata: Option<A2aMessageMetadata>,
}

impl SendOptions {
    pub fn to(agent_id: impl Into<String>) -> Self {
        Self {
            receiver: Some(Receiver::Agent(agent_id.into())),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_metadata(mut self, metadata: A2aMessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Optional fields for [`create_task`](super::AgentToAgentProtocol::create_task)
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub metadata: Option<TaskMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_reaches() {
        assert!(Receiver::Broadcast.reaches("anyone"));
        assert!(Receiver::Agent("a".to_string()).reaches("a"));
        assert!(!Receiver::Agent("a".to_string()).reaches("b"));
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(MessageKind::default(), MessageKind::Notification);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(ConversationStatus::default(), ConversationStatus::Active);
    }

    #[test]
    fn test_task_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_agent_capability() {
        let agent = A2aAgent::new("a", "Analyst", "Analyzer").with_capabilities(["Analyzer", "logic"]);
        assert!(agent.has_capability("logic"));
        assert!(!agent.has_capability("Logic"));
    }
}
