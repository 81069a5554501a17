//! Entities of the prompt-building protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in the protocol history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
            Role::Tool => "tool",
        }
    }

    /// Upper-case label used when rendering a prompt (`USER: ...`).
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "SYSTEM",
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
            Role::Function => "FUNCTION",
            Role::Tool => "TOOL",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of instruction placed ahead of the conversation history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    Directive,
    Constraint,
    Preference,
    Goal,
}

impl InstructionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionKind::Directive => "directive",
            InstructionKind::Constraint => "constraint",
            InstructionKind::Preference => "preference",
            InstructionKind::Goal => "goal",
        }
    }

    /// Upper-case tag used when rendering a prompt (`[DIRECTIVE] ...`).
    pub fn tag(&self) -> &'static str {
        match self {
            InstructionKind::Directive => "DIRECTIVE",
            InstructionKind::Constraint => "CONSTRAINT",
            InstructionKind::Preference => "PREFERENCE",
            InstructionKind::Goal => "GOAL",
        }
    }
}

/// A prioritized instruction (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: String,
    pub kind: InstructionKind,
    pub content: String,
    /// Higher priorities render first
    pub priority: i32,
}

/// Annotations attached to a protocol message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
}

impl MessageMetadata {
    pub fn with_thinking(thinking: Option<String>) -> Self {
        Self {
            thinking,
            ..Self::default()
        }
    }
}

/// Links from a message to other messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageReferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrections: Vec<String>,
}

/// A message in the protocol history (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<MessageReferences>,
}

/// Token budget record.
///
/// Populated for callers to inspect; nothing in the protocol enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub max_tokens: u32,
    pub used_tokens: u32,
    pub remaining_tokens: u32,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            max_tokens: 8192,
            used_tokens: 0,
            remaining_tokens: 8192,
        }
    }
}

/// Model settings for the call the context is built for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    pub provider: String,
    pub version: String,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            model_id: "default".to_string(),
            provider: "unknown".to_string(),
            version: "1.0".to_string(),
            temperature: 0.7,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }
}

impl ModelMetadata {
    pub fn new(model_id: impl Into<String>, provider: impl Into<String>, temperature: f64) -> Self {
        Self {
            model_id: model_id.into(),
            provider: provider.into(),
            temperature,
            ..Self::default()
        }
    }

    /// Apply every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: MetadataPatch) {
        if let Some(model_id) = patch.model_id {
            self.model_id = model_id;
        }
        if let Some(provider) = patch.provider {
            self.provider = provider;
        }
        if let Some(version) = patch.version {
            self.version = version;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if patch.top_p.is_some() {
            self.top_p = patch.top_p;
        }
        if patch.frequency_penalty.is_some() {
            self.frequency_penalty = patch.frequency_penalty;
        }
        if patch.presence_penalty.is_some() {
            self.presence_penalty = patch.presence_penalty;
        }
    }
}

/// Partial update for [`ModelMetadata`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataPatch {
    pub model_id: Option<String>,
    pub provider: Option<String>,
    pub version: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

/// Memory bag carried along with a context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub short_term: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodic: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<Vec<String>>,
}

/// Context for one turn-generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpContext {
    pub conversation_id: String,
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    pub context_window: ContextWindow,
    pub metadata: ModelMetadata,
    pub memory: Memory,
}

/// Initial values for a context; `None` fields receive defaults.
#[derive(Debug, Clone, Default)]
pub struct McpContextInit {
    pub conversation_id: Option<String>,
    pub message_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub context_window: Option<ContextWindow>,
    pub metadata: Option<ModelMetadata>,
    pub memory: Option<Memory>,
}

impl McpContextInit {
    pub fn for_conversation(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: Some(conversation_id.into()),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Usage figures reported by the provider for one completion.
///
/// Every field is optional; missing values are reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageMetadata {
    pub completion_tokens: Option<u32>,
    pub prompt_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
    pub latency_ms: Option<u64>,
    pub confidence: Option<f64>,
}

/// Metadata of a processed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub completion_tokens: u32,
    pub prompt_tokens: u32,
    pub total_tokens: u32,
    pub latency_ms: u64,
}

/// A processed model response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    pub message_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: ResponseMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "USER");
        assert_eq!(Role::Tool.as_str(), "tool");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_metadata_patch_only_touches_present_fields() {
        let mut metadata = ModelMetadata::default();
        metadata.apply(MetadataPatch {
            temperature: Some(0.2),
            top_p: Some(0.9),
            ..MetadataPatch::default()
        });
        assert_eq!(metadata.temperature, 0.2);
        assert_eq!(metadata.top_p, Some(0.9));
        assert_eq!(metadata.model_id, "default");
        assert_eq!(metadata.provider, "unknown");
    }

    #[test]
    fn test_context_window_default() {
        let window = ContextWindow::default();
        assert_eq!(window.max_tokens, 8192);
        assert_eq!(window.remaining_tokens, 8192);
        assert_eq!(window.used_tokens, 0);
    }
}
