//! Run Conversation use case
//!
//! Drives a turn-taking conversation between configured agents: each turn
//! builds an MCP prompt for the speaking agent, asks the gateway for a reply,
//! splits off the agent's reasoning and records the message in both the
//! sandbox transcript and the A2A registry.

use crate::config::ConversationSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatCompletion, ChatMessage, ChatRequest, GatewayError, LlmGateway};
use crate::ports::progress::{ConversationProgress, NoProgress};
use sandbox_domain::core::tokens::{estimate_tokens, truncate_to_token_limit};
use sandbox_domain::protocol::a2a::{
    A2aAgent, A2aError, A2aMessageMetadata, AgentMetadata, AgentToAgentProtocol, MessageKind,
    SendOptions,
};
use sandbox_domain::protocol::mcp::{
    InstructionKind, McpContextInit, ModelContextProtocol, ModelMetadata, Role, UsageMetadata,
};
use sandbox_domain::{
    AgentConfig, MessageTokens, SandboxConversation, SandboxMessage, SandboxPromptTemplate,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Priority of the persona and analyst directives
pub const DIRECTIVE_PRIORITY: i32 = 10;
pub const QUERY_TEMPERATURE: f64 = 0.5;
pub const QUERY_MAX_TOKENS: u32 = 1000;

/// Errors that can occur while running a conversation
#[derive(Error, Debug)]
pub enum RunConversationError {
    #[error("No agents configured")]
    NoAgents,

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Agent registry error: {0}")]
    RegistryError(#[from] A2aError),
}

/// Use case for running a multi-agent conversation
pub struct RunConversationUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    settings: ConversationSettings,
    registry: AgentToAgentProtocol,
    agents: Vec<AgentConfig>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunConversationUseCase<G> {
    pub fn new(gateway: Arc<G>, settings: ConversationSettings) -> Self {
        Self {
            gateway,
            settings,
            registry: AgentToAgentProtocol::new(),
            agents: Vec::new(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.settings
    }

    /// Agents taking part, in speaking order
    pub fn agents(&self) -> &[AgentConfig] {
        &self.agents
    }

    pub fn registry(&self) -> &AgentToAgentProtocol {
        &self.registry
    }

    /// Register `agents`, open the conversation and generate the first turn.
    ///
    /// The A2A conversation id is reused as the sandbox conversation id.
    pub async fn start(
        &mut self,
        agents: Vec<AgentConfig>,
        topic: &str,
        objective: &str,
        system_prompt: Option<String>,
    ) -> Result<SandboxConversation, RunConversationError> {
        if agents.is_empty() {
            return Err(RunConversationError::NoAgents);
        }

        info!("Starting conversation on '{}' with {} agents", topic, agents.len());

        for agent in &agents {
            let registered = self.to_registry_agent(agent);
            self.registry.register_agent(registered);
        }

        let participants = agents.iter().map(|a| a.id.clone()).collect();
        let conversation_id = self.registry.create_conversation(topic, participants)?;
        self.registry
            .describe_conversation(&conversation_id, topic, objective)?;

        let mut conversation =
            SandboxConversation::new(conversation_id, topic, objective, system_prompt);
        self.agents = agents;

        self.logger.log(ConversationEvent::new(
            "conversation_started",
            json!({
                "conversation_id": conversation.id,
                "topic": conversation.topic,
                "objective": conversation.objective,
                "agents": self.agents.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            }),
        ));

        let first = self.agents[0].clone();
        self.generate_agent_message(&first, &mut conversation).await?;

        Ok(conversation)
    }

    /// Ask `agent` for its next turn and append it to `conversation`.
    pub async fn generate_agent_message(
        &mut self,
        agent: &AgentConfig,
        conversation: &mut SandboxConversation,
    ) -> Result<SandboxMessage, RunConversationError> {
        let model = self.model_for(agent);
        debug!("Generating turn for {} ({})", agent.name, model);

        let mut mcp = ModelContextProtocol::new(
            McpContextInit::for_conversation(conversation.id.clone()).with_metadata(
                ModelMetadata::new(
                    model.clone(),
                    self.settings.provider.clone(),
                    self.settings.temperature,
                ),
            ),
        );

        mcp.add_instruction(
            InstructionKind::Directive,
            SandboxPromptTemplate::persona_directive(agent, conversation),
            DIRECTIVE_PRIORITY,
        );

        for previous in &conversation.messages {
            let role = if previous.agent_id == agent.id {
                Role::Assistant
            } else {
                Role::User
            };
            mcp.add_message(
                role,
                previous.content.clone(),
                Some(self.agent_name(conversation, &previous.agent_id)),
                None,
            );
        }

        let request = ChatRequest {
            model: model.clone(),
            messages: vec![
                ChatMessage::system(mcp.create_prompt()),
                ChatMessage::user(SandboxPromptTemplate::turn_nudge()),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let started = Instant::now();
        let completion = self.send(request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let usage = completion.usage.unwrap_or_default();
        let response = mcp.process_response(
            &completion.content,
            UsageMetadata {
                completion_tokens: usage.completion_tokens,
                prompt_tokens: usage.prompt_tokens,
                total_tokens: usage.total_tokens,
                latency_ms: Some(latency_ms),
                confidence: None,
            },
        );

        let content_tokens = estimate_tokens(&response.content);
        let thinking_tokens = response.metadata.thinking.as_deref().map_or(0, estimate_tokens);
        let tokens = MessageTokens {
            content: content_tokens as u32,
            thinking: thinking_tokens as u32,
            total: if response.metadata.total_tokens > 0 {
                response.metadata.total_tokens
            } else {
                (content_tokens + thinking_tokens) as u32
            },
            truncated: content_tokens > self.settings.content_token_limit
                || thinking_tokens > self.settings.thinking_token_limit,
        };

        let content = truncate_to_token_limit(&response.content, self.settings.content_token_limit);
        let thinking = response
            .metadata
            .thinking
            .map(|t| truncate_to_token_limit(&t, self.settings.thinking_token_limit));

        let mut message = SandboxMessage::new(conversation.id.clone(), agent.id.clone(), content)
            .with_agent(agent.clone())
            .with_thinking(thinking);
        message.tokens = tokens;
        message.latency_ms = latency_ms;

        self.mirror_to_registry(&message);

        self.logger.log(ConversationEvent::new(
            "agent_message",
            json!({
                "conversation_id": message.conversation_id,
                "message_id": message.id,
                "agent_id": agent.id,
                "agent_name": agent.name,
                "model": model,
                "content": message.content,
                "thinking": message.thinking,
                "tokens": message.tokens.total,
                "truncated": message.tokens.truncated,
                "latency_ms": message.latency_ms,
            }),
        ));

        info!(
            "{} responded ({} tokens, {} ms)",
            agent.name, message.tokens.total, message.latency_ms
        );

        conversation.push(message.clone());
        Ok(message)
    }

    /// Generate the turn of the agent at `next_agent_index` (round-robin).
    pub async fn continue_conversation(
        &mut self,
        conversation: &mut SandboxConversation,
        next_agent_index: usize,
    ) -> Result<SandboxMessage, RunConversationError> {
        let agent = self.agent_at(next_agent_index)?;
        self.generate_agent_message(&agent, conversation).await
    }

    /// Run `turns` more turns with default (no-op) progress
    pub async fn run(
        &mut self,
        conversation: &mut SandboxConversation,
        turns: usize,
    ) -> Result<(), RunConversationError> {
        self.run_with_progress(conversation, turns, &NoProgress).await
    }

    /// Run `turns` more turns, continuing the rotation after the last speaker.
    ///
    /// Stops at the first failed turn; messages generated so far stay in
    /// `conversation`.
    pub async fn run_with_progress(
        &mut self,
        conversation: &mut SandboxConversation,
        turns: usize,
        progress: &dyn ConversationProgress,
    ) -> Result<(), RunConversationError> {
        for turn in 1..=turns {
            let index = conversation.messages.len();
            let agent = self.agent_at(index)?;
            progress.on_turn_start(turn, turns, &agent);

            match self.continue_conversation(conversation, index).await {
                Ok(message) => progress.on_turn_complete(turn, &agent, &message),
                Err(e) => {
                    warn!("Turn {} by {} failed: {}", turn, agent.name, e);
                    progress.on_turn_failed(turn, &agent, &e.to_string());
                    return Err(e);
                }
            }
        }

        progress.on_run_complete(conversation.messages.len());
        Ok(())
    }

    /// Ask an analyst model a free-form question about the transcript.
    pub async fn query_conversation(
        &self,
        conversation: &SandboxConversation,
        query: &str,
    ) -> Result<String, RunConversationError> {
        info!("Querying conversation {}", conversation.id);

        let model = self.settings.default_model.clone();
        let mut mcp = ModelContextProtocol::new(
            McpContextInit::for_conversation(conversation.id.clone()).with_metadata(
                ModelMetadata::new(model.clone(), self.settings.provider.clone(), QUERY_TEMPERATURE),
            ),
        );

        mcp.add_instruction(
            InstructionKind::Directive,
            SandboxPromptTemplate::analyst_directive(query),
            DIRECTIVE_PRIORITY,
        );

        for message in &conversation.messages {
            let name = self.agent_name(conversation, &message.agent_id);
            mcp.add_message(
                Role::User,
                format!("{}: {}", name, message.content),
                Some(name),
                None,
            );
        }

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage::system(mcp.create_prompt())],
            temperature: QUERY_TEMPERATURE,
            max_tokens: QUERY_MAX_TOKENS,
        };

        let completion = self.send(request).await?;
        let answer = completion.content.trim();
        let answer = if answer.is_empty() {
            SandboxPromptTemplate::no_analysis().to_string()
        } else {
            answer.to_string()
        };

        self.logger.log(ConversationEvent::new(
            "conversation_query",
            json!({
                "conversation_id": conversation.id,
                "query": query,
                "answer": answer,
            }),
        ));

        Ok(answer)
    }

    async fn send(&self, request: ChatRequest) -> Result<ChatCompletion, GatewayError> {
        match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.chat(request))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => self.gateway.chat(request).await,
        }
    }

    fn mirror_to_registry(&mut self, message: &SandboxMessage) {
        if self.registry.conversation(&message.conversation_id).is_none() {
            debug!(
                "Conversation {} is not in the agent registry; not mirroring",
                message.conversation_id
            );
            return;
        }

        let options = SendOptions::default()
            .with_kind(MessageKind::Response)
            .with_metadata(A2aMessageMetadata {
                thinking: message.thinking.clone(),
                ..A2aMessageMetadata::default()
            });

        if let Err(e) = self.registry.send_message(
            &message.conversation_id,
            &message.agent_id,
            message.content.clone(),
            options,
        ) {
            warn!("Failed to add message to agent registry conversation: {}", e);
        }
    }

    fn agent_at(&self, index: usize) -> Result<AgentConfig, RunConversationError> {
        if self.agents.is_empty() {
            return Err(RunConversationError::NoAgents);
        }
        Ok(self.agents[index % self.agents.len()].clone())
    }

    /// Configured agents first, then the registry, then the speaker recorded
    /// in the transcript; the id as a last resort.
    fn agent_name(&self, conversation: &SandboxConversation, agent_id: &str) -> String {
        self.agents
            .iter()
            .find(|a| a.id == agent_id)
            .map(|a| a.name.clone())
            .or_else(|| self.registry.agent(agent_id).map(|a| a.name.clone()))
            .or_else(|| conversation.speaker_name(agent_id).map(str::to_string))
            .unwrap_or_else(|| agent_id.to_string())
    }

    fn model_for(&self, agent: &AgentConfig) -> String {
        if agent.model.trim().is_empty() {
            self.settings.default_model.clone()
        } else {
            agent.model.clone()
        }
    }

    fn to_registry_agent(&self, agent: &AgentConfig) -> A2aAgent {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        let mut registered = A2aAgent::new(agent.id.clone(), agent.name.clone(), agent.role.clone())
            .with_capabilities([agent.role.clone()]);
        registered.description = format!("{} is a {}", agent.name, agent.role);
        registered.instructions = agent.instructions.clone();
        registered.model = self.model_for(agent);
        registered.provider = self.settings.provider.clone();
        registered.metadata = AgentMetadata {
            avatar: non_empty(&agent.avatar),
            color: non_empty(&agent.color),
            ..AgentMetadata::default()
        };
        registered
    }
}
