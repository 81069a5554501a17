//! Sandbox conversation entities
//!
//! These are the records the conversation controller produces and the
//! analytics consume. They serialize to the camelCase JSON transcript format.

use crate::analytics::Utterance;
use crate::core::id::{new_id, now};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured participant (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub avatar: String,
    pub instructions: String,
    #[serde(default)]
    pub color: String,
    pub role: String,
}

/// Token accounting for one message.
///
/// `content` and `thinking` are estimates taken before the caps are applied;
/// `truncated` records whether either cap fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTokens {
    pub content: u32,
    pub thinking: u32,
    pub total: u32,
    pub truncated: bool,
}

/// One generated turn in a sandbox conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxMessage {
    pub id: String,
    pub conversation_id: String,
    pub agent_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// The speaker as configured when the message was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default)]
    pub tokens: MessageTokens,
    #[serde(default)]
    pub latency_ms: u64,
}

impl SandboxMessage {
    pub fn new(
        conversation_id: impl Into<String>,
        agent_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            conversation_id: conversation_id.into(),
            agent_id: agent_id.into(),
            content: content.into(),
            timestamp: now(),
            agent: None,
            thinking: None,
            tokens: MessageTokens::default(),
            latency_ms: 0,
        }
    }

    pub fn with_thinking(mut self, thinking: Option<String>) -> Self {
        self.thinking = thinking;
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = Some(agent);
        self
    }
}

impl Utterance for SandboxMessage {
    fn agent_id(&self) -> &str {
        &self.agent_id
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// A sandbox conversation and its transcript (Aggregate root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxConversation {
    pub id: String,
    pub topic: String,
    pub objective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub messages: Vec<SandboxMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SandboxConversation {
    pub fn new(
        id: impl Into<String>,
        topic: impl Into<String>,
        objective: impl Into<String>,
        system_prompt: Option<String>,
    ) -> Self {
        let created_at = now();
        Self {
            id: id.into(),
            topic: topic.into(),
            objective: objective.into(),
            system_prompt: system_prompt.filter(|p| !p.trim().is_empty()),
            messages: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Append a message and bump `updated_at`.
    pub fn push(&mut self, message: SandboxMessage) {
        self.updated_at = message.timestamp.max(self.updated_at);
        self.messages.push(message);
    }

    /// Ids of every agent that has spoken, in order of first appearance.
    pub fn speaker_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for message in &self.messages {
            if !ids.iter().any(|id| id == &message.agent_id) {
                ids.push(message.agent_id.clone());
            }
        }
        ids
    }

    /// Speaker configs recorded in the transcript, in order of first appearance.
    pub fn agents(&self) -> Vec<AgentConfig> {
        let mut agents: Vec<AgentConfig> = Vec::new();
        for agent in self.messages.iter().filter_map(|m| m.agent.as_ref()) {
            if !agents.iter().any(|a| a.id == agent.id) {
                agents.push(agent.clone());
            }
        }
        agents
    }

    /// Display name of `agent_id` as recorded on its messages.
    pub fn speaker_name(&self, agent_id: &str) -> Option<&str> {
        self.messages_by(agent_id)
            .find_map(|m| m.agent.as_ref())
            .map(|a| a.name.as_str())
    }

    pub fn messages_by<'a, 'b>(&'a self, agent_id: &'b str) -> impl Iterator<Item = &'a SandboxMessage> {
        self.messages.iter().filter(move |m| m.agent_id == agent_id)
    }

    pub fn last_message(&self) -> Option<&SandboxMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_speakers() {
        let mut conv = SandboxConversation::new("c1", "topic", "objective", None);
        conv.push(SandboxMessage::new("c1", "b", "one"));
        conv.push(SandboxMessage::new("c1", "a", "two"));
        conv.push(SandboxMessage::new("c1", "b", "three"));

        assert_eq!(conv.speaker_ids(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(conv.messages_by("b").count(), 2);
        assert_eq!(conv.last_message().unwrap().content, "three");
        assert!(conv.updated_at >= conv.created_at);
    }

    #[test]
    fn test_blank_system_prompt_is_dropped() {
        let conv = SandboxConversation::new("c1", "t", "o", Some("   ".to_string()));
        assert!(conv.system_prompt.is_none());
    }

    #[test]
    fn test_transcript_json_is_camel_case() {
        let mut conv = SandboxConversation::new("c1", "t", "o", Some("be brief".to_string()));
        conv.push(SandboxMessage::new("c1", "a", "hi").with_thinking(Some("hmm".to_string())));

        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(json["systemPrompt"], "be brief");
        assert_eq!(json["messages"][0]["agentId"], "a");
        assert_eq!(json["messages"][0]["conversationId"], "c1");
        assert_eq!(json["messages"][0]["thinking"], "hmm");

        let back: SandboxConversation = serde_json::from_value(json).unwrap();
        assert_eq!(back, conv);
    }

    #[test]
    fn test_minimal_transcript_parses() {
        let json = r#"{
            "id": "c1",
            "topic": "t",
            "objective": "o",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z",
            "messages": [
                {"id": "m1", "conversationId": "c1", "agentId": "a",
                 "content": "hello", "timestamp": "2025-01-01T00:00:01Z"}
            ]
        }"#;
        let conv: SandboxConversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.messages[0].tokens, MessageTokens::default());
        assert!(conv.messages[0].thinking.is_none());
        assert!(conv.messages[0].agent.is_none());
        assert!(conv.agents().is_empty());
    }

    fn speaker(id: &str, name: &str) -> AgentConfig {
        AgentConfig {
            id: id.to_string(),
            name: name.to_string(),
            model: "m".to_string(),
            avatar: String::new(),
            instructions: "i".to_string(),
            color: String::new(),
            role: "r".to_string(),
        }
    }

    #[test]
    fn test_speakers_survive_serialization() {
        let mut conv = SandboxConversation::new("c1", "t", "o", None);
        conv.push(SandboxMessage::new("c1", "a", "one").with_agent(speaker("a", "Ada")));
        conv.push(SandboxMessage::new("c1", "b", "two").with_agent(speaker("b", "Bo")));
        conv.push(SandboxMessage::new("c1", "a", "three").with_agent(speaker("a", "Ada")));
        conv.push(SandboxMessage::new("c1", "x", "no config"));

        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(json["messages"][0]["agent"]["name"], "Ada");
        assert!(json["messages"][3].get("agent").is_none());

        let back: SandboxConversation = serde_json::from_value(json).unwrap();
        let names: Vec<String> = back.agents().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Ada".to_string(), "Bo".to_string()]);
        assert_eq!(back.speaker_name("b"), Some("Bo"));
        assert_eq!(back.speaker_name("x"), None);
    }

    #[test]
    fn test_token_breakdown_json() {
        let mut message = SandboxMessage::new("c1", "a", "hi");
        message.tokens = MessageTokens {
            content: 501,
            thinking: 3,
            total: 504,
            truncated: true,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["tokens"]["total"], 504);
        assert_eq!(json["tokens"]["truncated"], true);
    }
}
