//! Prompt templates for the sandbox conversation flow

use crate::sandbox::{AgentConfig, SandboxConversation};

/// Templates for the directives and nudges sent to agents
pub struct SandboxPromptTemplate;

impl SandboxPromptTemplate {
    /// Persona directive placed at the top of every agent prompt
    pub fn persona_directive(agent: &AgentConfig, conversation: &SandboxConversation) -> String {
        let mut directive = format!(
            r#"You are {name}, with the following instructions: {instructions}

You are participating in a multi-agent conversation about {topic}.

Objective: {objective}"#,
            name = agent.name,
            instructions = agent.instructions,
            topic = conversation.topic,
            objective = conversation.objective,
        );

        if let Some(system_prompt) = &conversation.system_prompt {
            directive.push_str("\n\n");
            directive.push_str(system_prompt);
        }

        directive.push_str(&format!(
            r#"

Respond as {}. Keep your response concise (under 150 words).

Include your thinking process by adding 'Thinking: [your thought process]' at the end of your response."#,
            agent.name
        ));

        directive
    }

    /// User message that asks the agent for its turn
    pub fn turn_nudge() -> &'static str {
        "Now it's your turn to respond. Remember to stay in character."
    }

    /// Directive for the analyst answering a question about a transcript
    pub fn analyst_directive(query: &str) -> String {
        format!(
            r#"You are an expert conversation analyst. Analyze the conversation and provide insights based on the query.

Query: {}

Provide a detailed analysis with specific examples from the conversation."#,
            query
        )
    }

    /// Returned when the analyst produced no text
    pub fn no_analysis() -> &'static str {
        "No analysis available."
    }
}
