//! The agent-to-agent registry.

use super::entities::{
    A2aAgent, A2aConversation, A2aMessage, A2aTask, ConversationStatus, Receiver, SendOptions,
    TaskOptions, TaskStatus,
};
use super::error::A2aError;
use super::store::{A2aStore, InMemoryA2aStore};
use crate::core::id::{new_id, now};
use crate::protocol::mcp::{McpMessage, MessageMetadata, Role};

/// Registry of agents, conversations and tasks.
///
/// Mediates message passing with participant-membership checks. All
/// precondition violations are returned as [`A2aError`] before anything is
/// mutated.
#[derive(Debug, Clone, Default)]
pub struct AgentToAgentProtocol<S: A2aStore = InMemoryA2aStore> {
    store: S,
}

impl AgentToAgentProtocol<InMemoryA2aStore> {
    pub fn new() -> Self {
        Self::with_store(InMemoryA2aStore::new())
    }
}

impl<S: A2aStore> AgentToAgentProtocol<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register an agent; an agent with the same id is replaced.
    pub fn register_agent(&mut self, agent: A2aAgent) {
        self.store.upsert_agent(agent);
    }

    pub fn agent(&self, agent_id: &str) -> Option<&A2aAgent> {
        self.store.agent(agent_id)
    }

    pub fn agents(&self) -> Vec<&A2aAgent> {
        self.store.agents()
    }

    /// Create an active conversation between registered agents.
    pub fn create_conversation(
        &mut self,
        title: impl Into<String>,
        participants: Vec<String>,
    ) -> Result<String, A2aError> {
        self.ensure_registered(&participants)?;

        let id = new_id();
        let timestamp = now();
        self.store.insert_conversation(A2aConversation {
            id: id.clone(),
            title: title.into(),
            participants,
            messages: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
            status: ConversationStatus::Active,
            topic: None,
            objective: None,
        });
        Ok(id)
    }

    pub fn conversation(&self, conversation_id: &str) -> Option<&A2aConversation> {
        self.store.conversation(conversation_id)
    }

    /// Set topic and objective on an existing conversation.
    pub fn describe_conversation(
        &mut self,
        conversation_id: &str,
        topic: impl Into<String>,
        objective: impl Into<String>,
    ) -> Result<(), A2aError> {
        let conversation = self
            .store
            .conversation_mut(conversation_id)
            .ok_or_else(|| A2aError::ConversationNotFound(conversation_id.to_string()))?;
        conversation.topic = Some(topic.into());
        conversation.objective = Some(objective.into());
        Ok(())
    }

    /// Change a conversation's status. Any status may follow any other.
    pub fn set_conversation_status(
        &mut self,
        conversation_id: &str,
        status: ConversationStatus,
    ) -> Result<(), A2aError> {
        let conversation = self
            .store
            .conversation_mut(conversation_id)
            .ok_or_else(|| A2aError::ConversationNotFound(conversation_id.to_string()))?;
        conversation.status = status;
        conversation.updated_at = now();
        Ok(())
    }

    /// Append a message to a conversation and return its id.
    ///
    /// The sender, and an explicit non-broadcast receiver, must both be
    /// participants.
    pub fn send_message(
        &mut self,
        conversation_id: &str,
        sender_id: &str,
        content: impl Into<String>,
        options: SendOptions,
    ) -> Result<String, A2aError> {
        let conversation = self
            .store
            .conversation(conversation_id)
            .ok_or_else(|| A2aError::ConversationNotFound(conversation_id.to_string()))?;

        if !conversation.is_participant(sender_id) {
            return Err(A2aError::NotParticipant {
                conversation_id: conversation_id.to_string(),
                agent_id: sender_id.to_string(),
            });
        }

        let receiver = options.receiver.unwrap_or(Receiver::Broadcast);
        if let Receiver::Agent(receiver_id) = &receiver
            && !conversation.is_participant(receiver_id)
        {
            return Err(A2aError::NotParticipant {
                conversation_id: conversation_id.to_string(),
                agent_id: receiver_id.clone(),
            });
        }

        let id = new_id();
        let timestamp = now();
        let message = A2aMessage {
            id: id.clone(),
            sender_id: sender_id.to_string(),
            receiver,
            content: content.into(),
            timestamp,
            kind: options.kind,
            metadata: options.metadata,
        };

        if let Some(conversation) = self.store.conversation_mut(conversation_id) {
            conversation.messages.push(message);
            conversation.updated_at = timestamp;
        }
        Ok(id)
    }

    /// Create a pending task assigned to registered agents.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: Vec<String>,
        created_by: impl Into<String>,
        options: TaskOptions,
    ) -> Result<String, A2aError> {
        self.ensure_registered(&assigned_to)?;

        let id = new_id();
        let timestamp = now();
        self.store.insert_task(A2aTask {
            id: id.clone(),
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            assigned_to,
            created_by: created_by.into(),
            created_at: timestamp,
            updated_at: timestamp,
            deadline: options.deadline,
            priority: options.priority,
            metadata: options.metadata,
        });
        Ok(id)
    }

    pub fn task(&self, task_id: &str) -> Option<&A2aTask> {
        self.store.task(task_id)
    }

    /// Set a task's status on behalf of an assignee or the creator.
    ///
    /// No transition table is enforced. Completing a task that carries
    /// metadata marks its progress as 100.
    pub fn update_task_status(
        &mut self,
        task_id: &str,
        status: TaskStatus,
        agent_id: &str,
    ) -> Result<(), A2aError> {
        let task = self
            .store
            .task_mut(task_id)
            .ok_or_else(|| A2aError::TaskNotFound(task_id.to_string()))?;

        if !task.can_be_updated_by(agent_id) {
            return Err(A2aError::NotAuthorized {
                task_id: task_id.to_string(),
                agent_id: agent_id.to_string(),
            });
        }

        task.status = status;
        task.updated_at = now();
        if status == TaskStatus::Completed
            && let Some(metadata) = task.metadata.as_mut()
        {
            metadata.progress = Some(100);
        }
        Ok(())
    }

    /// Agents whose capability list contains `capability` exactly.
    pub fn find_agents_by_capability(&self, capability: &str) -> Vec<&A2aAgent> {
        self.store
            .agents()
            .into_iter()
            .filter(|agent| agent.has_capability(capability))
            .collect()
    }

    /// Project a conversation onto the prompt history of one agent.
    ///
    /// Keeps messages that are broadcast, addressed to the agent, or sent by
    /// it. The agent's own messages become `assistant`, everything else
    /// `user`, named after the sender.
    pub fn convert_to_mcp_messages(
        &self,
        conversation_id: &str,
        agent_id: &str,
    ) -> Result<Vec<McpMessage>, A2aError> {
        let conversation = self
            .store
            .conversation(conversation_id)
            .ok_or_else(|| A2aError::ConversationNotFound(conversation_id.to_string()))?;

        if !conversation.is_participant(agent_id) {
            return Err(A2aError::NotParticipant {
                conversation_id: conversation_id.to_string(),
                agent_id: agent_id.to_string(),
            });
        }

        let messages = conversation
            .messages
            .iter()
            .filter(|msg| msg.receiver.reaches(agent_id) || msg.sender_id == agent_id)
            .map(|msg| {
                let name = self
                    .store
                    .agent(&msg.sender_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| msg.sender_id.clone());
                let role = if msg.sender_id == agent_id {
                    Role::Assistant
                } else {
                    Role::User
                };
                McpMessage {
                    id: msg.id.clone(),
                    role,
                    content: msg.content.clone(),
                    name: Some(name),
                    timestamp: msg.timestamp,
                    metadata: msg
                        .metadata
                        .as_ref()
                        .map(|m| MessageMetadata::with_thinking(m.thinking.clone())),
                    references: None,
                }
            })
            .collect();

        Ok(messages)
    }

    fn ensure_registered(&self, agent_ids: &[String]) -> Result<(), A2aError> {
        match agent_ids.iter().find(|id| !self.store.contains_agent(id)) {
            Some(missing) => Err(A2aError::UnregisteredAgent(missing.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::a2a::entities::{A2aMessageMetadata, MessageKind, TaskMetadata};

    fn registry() -> AgentToAgentProtocol {
        let mut a2a = AgentToAgentProtocol::new();
        a2a.register_agent(A2aAgent::new("A", "Alice", "Analyzer").with_capabilities(["Analyzer"]));
        a2a.register_agent(A2aAgent::new("B", "Bob", "Innovator").with_capabilities(["Innovator"]));
        a2a.register_agent(A2aAgent::new("C", "Carol", "Analyzer").with_capabilities(["Analyzer"]));
        a2a
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_register_is_upsert() {
        let mut a2a = registry();
        a2a.register_agent(A2aAgent::new("A", "Alicia", "Analyzer"));
        assert_eq!(a2a.agent("A").unwrap().name, "Alicia");
        assert_eq!(a2a.agents().len(), 3);
    }

    #[test]
    fn test_create_conversation_requires_registered_participants() {
        let mut a2a = registry();
        let err = a2a
            .create_conversation("t", ids(&["A", "Z"]))
            .unwrap_err();
        assert_eq!(err, A2aError::UnregisteredAgent("Z".to_string()));
    }

    #[test]
    fn test_create_conversation_starts_active_and_empty() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A", "B"])).unwrap();
        let conversation = a2a.conversation(&id).unwrap();
        assert_eq!(conversation.status, ConversationStatus::Active);
        assert!(conversation.messages.is_empty());
        assert_eq!(conversation.participants, ids(&["A", "B"]));
    }

    #[test]
    fn test_send_rejects_non_participant_sender() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A", "B"])).unwrap();

        let err = a2a
            .send_message(&id, "C", "hello", SendOptions::default())
            .unwrap_err();
        assert!(matches!(err, A2aError::NotParticipant { ref agent_id, .. } if agent_id == "C"));
        assert!(a2a.conversation(&id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_send_appends_exactly_one_message() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A", "B"])).unwrap();
        let created = a2a.conversation(&id).unwrap().updated_at;

        let msg_id = a2a
            .send_message(&id, "A", "hello", SendOptions::to("B"))
            .unwrap();

        let conversation = a2a.conversation(&id).unwrap();
        assert_eq!(conversation.messages.len(), 1);
        let msg = &conversation.messages[0];
        assert_eq!(msg.id, msg_id);
        assert_eq!(msg.receiver, Receiver::Agent("B".to_string()));
        assert_eq!(msg.kind, MessageKind::Notification);
        assert!(conversation.updated_at >= created);
    }

    #[test]
    fn test_send_rejects_non_participant_receiver() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A", "B"])).unwrap();
        let err = a2a
            .send_message(&id, "A", "psst", SendOptions::to("C"))
            .unwrap_err();
        assert!(matches!(err, A2aError::NotParticipant { ref agent_id, .. } if agent_id == "C"));
        assert!(a2a.conversation(&id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_send_unknown_conversation() {
        let mut a2a = registry();
        let err = a2a
            .send_message("nope", "A", "x", SendOptions::default())
            .unwrap_err();
        assert_eq!(err, A2aError::ConversationNotFound("nope".to_string()));
    }

    #[test]
    fn test_task_lifecycle() {
        let mut a2a = registry();
        let task_id = a2a
            .create_task(
                "Draft",
                "Write a draft",
                ids(&["B"]),
                "A",
                TaskOptions {
                    metadata: Some(TaskMetadata::default()),
                    ..TaskOptions::default()
                },
            )
            .unwrap();
        assert_eq!(a2a.task(&task_id).unwrap().status, TaskStatus::Pending);

        // Neither assignee nor creator
        let err = a2a
            .update_task_status(&task_id, TaskStatus::InProgress, "C")
            .unwrap_err();
        assert!(matches!(err, A2aError::NotAuthorized { .. }));

        // Any transition is allowed
        a2a.update_task_status(&task_id, TaskStatus::Failed, "B").unwrap();
        a2a.update_task_status(&task_id, TaskStatus::Completed, "A").unwrap();

        let task = a2a.task(&task_id).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.metadata.as_ref().unwrap().progress, Some(100));
    }

    #[test]
    fn test_create_task_requires_registered_assignees() {
        let mut a2a = registry();
        let err = a2a
            .create_task("t", "d", ids(&["A", "Q"]), "A", TaskOptions::default())
            .unwrap_err();
        assert_eq!(err, A2aError::UnregisteredAgent("Q".to_string()));
    }

    #[test]
    fn test_update_unknown_task() {
        let mut a2a = registry();
        let err = a2a
            .update_task_status("missing", TaskStatus::Completed, "A")
            .unwrap_err();
        assert_eq!(err, A2aError::TaskNotFound("missing".to_string()));
    }

    #[test]
    fn test_find_agents_by_capability() {
        let a2a = registry();
        let found: Vec<_> = a2a
            .find_agents_by_capability("Analyzer")
            .iter()
            .map(|a| a.id.clone())
            .collect();
        assert_eq!(found, ids(&["A", "C"]));
        assert!(a2a.find_agents_by_capability("analyzer").is_empty());
    }

    #[test]
    fn test_set_conversation_status() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A"])).unwrap();
        a2a.set_conversation_status(&id, ConversationStatus::Completed)
            .unwrap();
        a2a.set_conversation_status(&id, ConversationStatus::Active)
            .unwrap();
        assert_eq!(a2a.conversation(&id).unwrap().status, ConversationStatus::Active);
    }

    #[test]
    fn test_convert_to_mcp_messages_filters_and_maps_roles() {
        let mut a2a = registry();
        let id = a2a
            .create_conversation("t", ids(&["A", "B", "C"]))
            .unwrap();

        a2a.send_message(&id, "A", "to everyone", SendOptions::default())
            .unwrap();
        a2a.send_message(&id, "B", "to carol only", SendOptions::to("C"))
            .unwrap();
        a2a.send_message(
            &id,
            "C",
            "to alice",
            SendOptions::to("A")
                .with_kind(MessageKind::Response)
                .with_metadata(A2aMessageMetadata {
                    thinking: Some("hmm".to_string()),
                    ..A2aMessageMetadata::default()
                }),
        )
        .unwrap();

        let messages = a2a.convert_to_mcp_messages(&id, "A").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].name.as_deref(), Some("Alice"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "to alice");
        assert_eq!(messages[1].name.as_deref(), Some("Carol"));
        assert_eq!(
            messages[1].metadata.as_ref().unwrap().thinking.as_deref(),
            Some("hmm")
        );
    }

    #[test]
    fn test_convert_requires_participant() {
        let mut a2a = registry();
        let id = a2a.create_conversation("t", ids(&["A", "B"])).unwrap();
        assert!(matches!(
            a2a.convert_to_mcp_messages(&id, "C"),
            Err(A2aError::NotParticipant { .. })
        ));
    }
}
