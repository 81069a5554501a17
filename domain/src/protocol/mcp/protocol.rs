//! The prompt-building protocol.
//!
//! A [`ModelContextProtocol`] is created fresh for every completion call. It
//! accumulates prioritized instructions and the turn history for one agent,
//! renders them into a single flat prompt, and turns the raw completion text
//! back into a structured [`McpResponse`].
//!
//! # Prompt layout
//!
//! ```text
//! [DIRECTIVE] highest priority instruction
//!
//! [GOAL] next instruction
//!
//! USER: first message
//!
//! ASSISTANT: second message
//! ```
//!
//! Downstream prompt parsing depends on this exact layout.

use super::entities::{
    Instruction, InstructionKind, McpContext, McpContextInit, McpMessage, McpResponse,
    MessageMetadata, MetadataPatch, ResponseMetadata, Role, UsageMetadata,
};
use crate::core::id::{new_id, now};

/// Separator between a response's public content and its reasoning.
pub const THINKING_MARKER: &str = "Thinking:";

/// Split a raw completion into `(content, thinking)`.
///
/// Everything before the first [`THINKING_MARKER`] is the content, everything
/// after it is the thinking; both are trimmed. Without the marker the whole
/// text is content.
///
/// A response that uses the word "Thinking:" for any other purpose is split
/// there all the same.
///
/// ```
/// use sandbox_domain::protocol::mcp::split_thinking;
///
/// assert_eq!(split_thinking("Hello world"), ("Hello world".to_string(), None));
/// assert_eq!(
///     split_thinking("Hello\n\nThinking: because reasons"),
///     ("Hello".to_string(), Some("because reasons".to_string())),
/// );
/// ```
pub fn split_thinking(raw: &str) -> (String, Option<String>) {
    match raw.split_once(THINKING_MARKER) {
        Some((content, thinking)) => (content.trim().to_string(), Some(thinking.trim().to_string())),
        None => (raw.to_string(), None),
    }
}

/// Prompt-building protocol for one agent turn
#[derive(Debug, Clone)]
pub struct ModelContextProtocol {
    context: McpContext,
    messages: Vec<McpMessage>,
    instructions: Vec<Instruction>,
}

impl ModelContextProtocol {
    /// Create a protocol instance, filling unspecified context fields with defaults.
    pub fn new(init: McpContextInit) -> Self {
        let context = McpContext {
            conversation_id: init.conversation_id.unwrap_or_else(new_id),
            message_id: init.message_id.unwrap_or_else(new_id),
            timestamp: init.timestamp.unwrap_or_else(now),
            context_window: init.context_window.unwrap_or_default(),
            metadata: init.metadata.unwrap_or_default(),
            memory: init.memory.unwrap_or_default(),
        };

        Self {
            context,
            messages: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Append a message to the history and return its generated id.
    pub fn add_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        name: Option<String>,
        metadata: Option<MessageMetadata>,
    ) -> String {
        let id = new_id();
        self.messages.push(McpMessage {
            id: id.clone(),
            role,
            content: content.into(),
            name,
            timestamp: now(),
            metadata,
            references: None,
        });
        id
    }

    /// Append an already-built message (e.g. converted from an A2A conversation).
    pub fn push_message(&mut self, message: McpMessage) {
        self.messages.push(message);
    }

    /// Append an instruction and return its generated id.
    pub fn add_instruction(
        &mut self,
        kind: InstructionKind,
        content: impl Into<String>,
        priority: i32,
    ) -> String {
        let id = new_id();
        self.instructions.push(Instruction {
            id: id.clone(),
            kind,
            content: content.into(),
            priority,
        });
        id
    }

    pub fn context(&self) -> &McpContext {
        &self.context
    }

    pub fn messages(&self) -> &[McpMessage] {
        &self.messages
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Merge `patch` into the context's model metadata.
    pub fn update_metadata(&mut self, patch: MetadataPatch) {
        self.context.metadata.apply(patch);
    }

    /// Render instructions and history into a single prompt.
    ///
    /// Instructions are ordered by priority, highest first; equal priorities
    /// keep insertion order.
    pub fn create_prompt(&self) -> String {
        let mut sorted: Vec<&Instruction> = self.instructions.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

        let system_prompt = sorted
            .iter()
            .map(|i| format!("[{}] {}", i.kind.tag(), i.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let history = self
            .messages
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{}\n\n{}", system_prompt, history)
    }

    /// Process a raw completion.
    ///
    /// Splits off the reasoning with [`split_thinking`], records the content as
    /// an assistant message, and reports usage (zero where not provided).
    pub fn process_response(&mut self, raw: &str, usage: UsageMetadata) -> McpResponse {
        let (content, thinking) = split_thinking(raw);
        self.record_response(content, thinking, usage)
    }

    /// Process a completion whose reasoning arrived as a separate field.
    ///
    /// No splitting happens; `content` is taken verbatim.
    #[cfg(feature = "structured-thinking")]
    pub fn process_structured_response(
        &mut self,
        content: &str,
        thinking: Option<&str>,
        usage: UsageMetadata,
    ) -> McpResponse {
        self.record_response(
            content.to_string(),
            thinking.map(|t| t.trim().to_string()),
            usage,
        )
    }

    fn record_response(
        &mut self,
        content: String,
        thinking: Option<String>,
        usage: UsageMetadata,
    ) -> McpResponse {
        let message_id = new_id();
        let timestamp = now();

        self.add_message(
            Role::Assistant,
            content.clone(),
            None,
            Some(MessageMetadata::with_thinking(thinking.clone())),
        );

        McpResponse {
            message_id,
            content,
            timestamp,
            metadata: ResponseMetadata {
                thinking,
                confidence: usage.confidence,
                completion_tokens: usage.completion_tokens.unwrap_or(0),
                prompt_tokens: usage.prompt_tokens.unwrap_or(0),
                total_tokens: usage.total_tokens.unwrap_or(0),
                latency_ms: usage.latency_ms.unwrap_or(0),
            },
        }
    }
}

impl Default for ModelContextProtocol {
    fn default() -> Self {
        Self::new(McpContextInit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::mcp::entities::ModelMetadata;

    fn protocol() -> ModelContextProtocol {
        ModelContextProtocol::new(McpContextInit::for_conversation("conv-1"))
    }

    #[test]
    fn test_new_fills_defaults() {
        let mcp = protocol();
        let ctx = mcp.context();
        assert_eq!(ctx.conversation_id, "conv-1");
        assert!(!ctx.message_id.is_empty());
        assert_eq!(ctx.context_window.max_tokens, 8192);
        assert_eq!(ctx.metadata.model_id, "default");
        assert_eq!(ctx.metadata.temperature, 0.7);
        assert!(ctx.memory.short_term.is_empty());
        assert!(ctx.memory.long_term.is_none());
    }

    #[test]
    fn test_new_keeps_provided_metadata() {
        let mcp = ModelContextProtocol::new(
            McpContextInit::default().with_metadata(ModelMetadata::new("llama3-70b-8192", "groq", 0.5)),
        );
        assert_eq!(mcp.context().metadata.provider, "groq");
        assert_eq!(mcp.context().metadata.temperature, 0.5);
    }

    #[test]
    fn test_add_returns_distinct_ids() {
        let mut mcp = protocol();
        let a = mcp.add_instruction(InstructionKind::Goal, "goal", 1);
        let b = mcp.add_message(Role::User, "hi", None, None);
        assert_ne!(a, b);
        assert_eq!(mcp.instructions()[0].id, a);
        assert_eq!(mcp.messages()[0].id, b);
    }

    #[test]
    fn test_prompt_priority_is_stable() {
        let mut mcp = protocol();
        mcp.add_instruction(InstructionKind::Directive, "A", 10);
        mcp.add_instruction(InstructionKind::Directive, "B", 5);
        mcp.add_instruction(InstructionKind::Directive, "C", 10);

        let prompt = mcp.create_prompt();
        assert_eq!(prompt, "[DIRECTIVE] A\n\n[DIRECTIVE] C\n\n[DIRECTIVE] B\n\n");
    }

    #[test]
    fn test_prompt_exact_layout() {
        let mut mcp = protocol();
        mcp.add_message(Role::User, "Hello", Some("Alice".to_string()), None);
        mcp.add_instruction(InstructionKind::Constraint, "Be brief", 1);
        mcp.add_message(Role::Assistant, "Hi there", None, None);
        mcp.add_instruction(InstructionKind::Goal, "Reach consensus", 3);

        assert_eq!(
            mcp.create_prompt(),
            "[GOAL] Reach consensus\n\n[CONSTRAINT] Be brief\n\nUSER: Hello\n\nASSISTANT: Hi there"
        );
    }

    #[test]
    fn test_prompt_independent_of_interleaving() {
        let mut first = protocol();
        first.add_instruction(InstructionKind::Goal, "g", 2);
        first.add_instruction(InstructionKind::Preference, "p", 1);
        first.add_message(Role::User, "u", None, None);
        first.add_message(Role::Tool, "t", None, None);

        let mut second = protocol();
        second.add_message(Role::User, "u", None, None);
        second.add_instruction(InstructionKind::Goal, "g", 2);
        second.add_message(Role::Tool, "t", None, None);
        second.add_instruction(InstructionKind::Preference, "p", 1);

        assert_eq!(first.create_prompt(), second.create_prompt());
        // Idempotent
        assert_eq!(first.create_prompt(), first.create_prompt());
    }

    #[test]
    fn test_prompt_without_instructions_keeps_separator() {
        let mut mcp = protocol();
        mcp.add_message(Role::System, "setup", None, None);
        assert_eq!(mcp.create_prompt(), "\n\nSYSTEM: setup");
    }

    #[test]
    fn test_process_response_without_thinking() {
        let mut mcp = protocol();
        let response = mcp.process_response("Hello world", UsageMetadata::default());
        assert_eq!(response.content, "Hello world");
        assert!(response.metadata.thinking.is_none());
        assert_eq!(response.metadata.total_tokens, 0);
        assert_eq!(response.metadata.latency_ms, 0);
    }

    #[test]
    fn test_process_response_with_thinking() {
        let mut mcp = protocol();
        let response = mcp.process_response(
            "Hello\n\nThinking: because reasons",
            UsageMetadata {
                total_tokens: Some(42),
                ..UsageMetadata::default()
            },
        );
        assert_eq!(response.content, "Hello");
        assert_eq!(response.metadata.thinking.as_deref(), Some("because reasons"));
        assert_eq!(response.metadata.total_tokens, 42);
        assert_eq!(response.metadata.prompt_tokens, 0);
    }

    #[test]
    fn test_process_response_records_assistant_message() {
        let mut mcp = protocol();
        mcp.process_response("Answer Thinking: reasoning", UsageMetadata::default());

        let last = mcp.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Answer");
        assert_eq!(
            last.metadata.as_ref().and_then(|m| m.thinking.as_deref()),
            Some("reasoning")
        );
    }

    #[test]
    fn test_split_thinking_uses_first_marker() {
        let (content, thinking) = split_thinking("A Thinking: B Thinking: C");
        assert_eq!(content, "A");
        assert_eq!(thinking.as_deref(), Some("B Thinking: C"));
    }

    #[test]
    fn test_update_metadata() {
        let mut mcp = protocol();
        mcp.update_metadata(MetadataPatch {
            provider: Some("groq".to_string()),
            ..MetadataPatch::default()
        });
        assert_eq!(mcp.context().metadata.provider, "groq");
        assert_eq!(mcp.context().metadata.version, "1.0");
    }

    #[cfg(feature = "structured-thinking")]
    #[test]
    fn test_structured_response_does_not_split() {
        let mut mcp = protocol();
        let response = mcp.process_structured_response(
            "Thinking: is part of the answer",
            Some(" separate "),
            UsageMetadata::default(),
        );
        assert_eq!(response.content, "Thinking: is part of the answer");
        assert_eq!(response.metadata.thinking.as_deref(), Some("separate"));
    }
}
