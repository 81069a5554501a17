//! Storage behind the A2A registry.
//!
//! [`A2aStore`] is the repository seam: the registry owns one store value and
//! every mutation goes through `&mut self`, so there is no hidden shared
//! state. [`InMemoryA2aStore`] keeps everything in insertion order.

use super::entities::{A2aAgent, A2aConversation, A2aTask};
use std::collections::HashMap;

/// Repository for agents, conversations and tasks
pub trait A2aStore {
    fn agent(&self, id: &str) -> Option<&A2aAgent>;

    /// All agents in registration order
    fn agents(&self) -> Vec<&A2aAgent>;

    /// Insert or replace the agent with the same id.
    fn upsert_agent(&mut self, agent: A2aAgent);

    fn conversation(&self, id: &str) -> Option<&A2aConversation>;

    fn conversation_mut(&mut self, id: &str) -> Option<&mut A2aConversation>;

    fn insert_conversation(&mut self, conversation: A2aConversation);

    fn task(&self, id: &str) -> Option<&A2aTask>;

    fn task_mut(&mut self, id: &str) -> Option<&mut A2aTask>;

    fn insert_task(&mut self, task: A2aTask);

    fn contains_agent(&self, id: &str) -> bool {
        self.agent(id).is_some()
    }
}

/// Ordered collection with id lookup.
#[derive(Debug, Clone)]
struct Keyed<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Keyed<T> {
    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&i| &mut self.items[i])
    }

    fn upsert(&mut self, id: String, item: T) {
        match self.index.get(&id) {
            Some(&i) => self.items[i] = item,
            None => {
                self.index.insert(id, self.items.len());
                self.items.push(item);
            }
        }
    }
}

/// In-process store; lives as long as the registry that owns it
#[derive(Debug, Clone, Default)]
pub struct InMemoryA2aStore {
    agents: Keyed<A2aAgent>,
    conversations: Keyed<A2aConversation>,
    tasks: Keyed<A2aTask>,
}

impl InMemoryA2aStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl A2aStore for InMemoryA2aStore {
    fn agent(&self, id: &str) -> Option<&A2aAgent> {
        self.agents.get(id)
    }

    fn agents(&self) -> Vec<&A2aAgent> {
        self.agents.items.iter().collect()
    }

    fn upsert_agent(&mut self, agent: A2aAgent) {
        self.agents.upsert(agent.id.clone(), agent);
    }

    fn conversation(&self, id: &str) -> Option<&A2aConversation> {
        self.conversations.get(id)
    }

    fn conversation_mut(&mut self, id: &str) -> Option<&mut A2aConversation> {
        self.conversations.get_mut(id)
    }

    fn insert_conversation(&mut self, conversation: A2aConversation) {
        self.conversations
            .upsert(conversation.id.clone(), conversation);
    }

    fn task(&self, id: &str) -> Option<&A2aTask> {
        self.tasks.get(id)
    }

    fn task_mut(&mut self, id: &str) -> Option<&mut A2aTask> {
        self.tasks.get_mut(id)
    }

    fn insert_task(&mut self, task: A2aTask) {
        self.tasks.upsert(task.id.clone(), task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut store = InMemoryA2aStore::new();
        store.upsert_agent(A2aAgent::new("a", "First", "r"));
        store.upsert_agent(A2aAgent::new("b", "Second", "r"));
        store.upsert_agent(A2aAgent::new("a", "Renamed", "r"));

        let names: Vec<_> = store.agents().iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, vec!["Renamed", "Second"]);
        assert!(store.contains_agent("b"));
        assert!(!store.contains_agent("c"));
    }
}
