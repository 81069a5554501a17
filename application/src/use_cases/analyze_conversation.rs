//! Analyze Conversation use case
//!
//! Runs every heuristic analysis over a transcript and gathers the results
//! into a [`ConversationReport`]. Nothing here talks to a model.

use sandbox_domain::analytics::{
    AverageSentiment, COGNITIVE_DIMENSION_COUNT, CognitiveShift, CognitiveSnapshot,
    CognitiveVector, DEFAULT_SHIFT_THRESHOLD, InformationFlow, LeadershipScores, Sentiment,
    TrajectoryPoint, analyze_cognitive_dimensions, analyze_sentiment, average_sentiment,
    calculate_cognitive_trajectory, calculate_information_flow, cosine_similarity,
    detect_cognitive_shifts, detect_emergent_leadership,
};
use sandbox_domain::SandboxConversation;
use serde::Serialize;
use tracing::debug;

/// Per-message results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageAnalysis {
    pub message_id: String,
    pub agent_id: String,
    pub sentiment: Sentiment,
    pub cognitive: CognitiveVector,
}

/// Average sentiment of one agent's messages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSentiment {
    pub agent_id: String,
    pub sentiment: AverageSentiment,
}

/// Everything the analytics can say about one conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationReport {
    pub conversation_id: String,
    pub topic: String,
    pub agent_ids: Vec<String>,
    pub messages: Vec<MessageAnalysis>,
    pub average_sentiment: AverageSentiment,
    pub agent_sentiment: Vec<AgentSentiment>,
    pub leadership: LeadershipScores,
    pub information_flow: InformationFlow,
    /// Mean cognitive vector over all messages
    pub average_cognitive: CognitiveVector,
    /// Cosine similarity of each message's cognitive vector to the previous one
    pub cognitive_alignment: Vec<f64>,
    /// `None` for conversations with fewer than two messages
    pub trajectory: Option<Vec<TrajectoryPoint>>,
    pub shifts: Vec<CognitiveShift>,
}

/// Use case for analyzing a finished (or ongoing) conversation
pub struct AnalyzeConversationUseCase {
    shift_threshold: f64,
}

impl Default for AnalyzeConversationUseCase {
    fn default() -> Self {
        Self::new(DEFAULT_SHIFT_THRESHOLD)
    }
}

impl AnalyzeConversationUseCase {
    pub fn new(shift_threshold: f64) -> Self {
        Self { shift_threshold }
    }

    /// Analyze `conversation` over the agents that spoke in it.
    pub fn execute(&self, conversation: &SandboxConversation) -> ConversationReport {
        let agent_ids = conversation.speaker_ids();
        self.execute_for(conversation, agent_ids)
    }

    /// Analyze `conversation` over an explicit agent list.
    ///
    /// Agents that never spoke score zero; messages from agents not in the
    /// list are left out of leadership and information flow.
    pub fn execute_for(
        &self,
        conversation: &SandboxConversation,
        agent_ids: Vec<String>,
    ) -> ConversationReport {
        debug!(
            "Analyzing conversation {} ({} messages)",
            conversation.id,
            conversation.messages.len()
        );

        let messages: Vec<MessageAnalysis> = conversation
            .messages
            .iter()
            .map(|m| MessageAnalysis {
                message_id: m.id.clone(),
                agent_id: m.agent_id.clone(),
                sentiment: analyze_sentiment(&m.content),
                cognitive: analyze_cognitive_dimensions(&m.content, m.thinking.as_deref()),
            })
            .collect();

        let sentiments: Vec<Sentiment> = messages.iter().map(|m| m.sentiment).collect();

        let agent_sentiment = agent_ids
            .iter()
            .map(|id| {
                let own: Vec<Sentiment> = messages
                    .iter()
                    .filter(|m| &m.agent_id == id)
                    .map(|m| m.sentiment)
                    .collect();
                AgentSentiment {
                    agent_id: id.clone(),
                    sentiment: average_sentiment(&own),
                }
            })
            .collect();

        let snapshots: Vec<CognitiveSnapshot> = conversation
            .messages
            .iter()
            .zip(&messages)
            .map(|(m, analysis)| CognitiveSnapshot {
                timestamp: m.timestamp,
                dimensions: analysis.cognitive,
            })
            .collect();

        let trajectory = calculate_cognitive_trajectory(&snapshots);
        let shifts = trajectory
            .as_deref()
            .map(|t| detect_cognitive_shifts(t, self.shift_threshold))
            .unwrap_or_default();

        let cognitive_alignment = messages
            .windows(2)
            .map(|pair| cosine_similarity(&pair[0].cognitive, &pair[1].cognitive).unwrap_or_default())
            .collect();

        ConversationReport {
            conversation_id: conversation.id.clone(),
            topic: conversation.topic.clone(),
            leadership: detect_emergent_leadership(&conversation.messages, &agent_ids),
            information_flow: calculate_information_flow(&conversation.messages, &agent_ids),
            agent_ids,
            average_sentiment: average_sentiment(&sentiments),
            agent_sentiment,
            average_cognitive: mean_vector(&messages),
            cognitive_alignment,
            trajectory,
            shifts,
            messages,
        }
    }
}

fn mean_vector(messages: &[MessageAnalysis]) -> CognitiveVector {
    let mut mean = [0.0; COGNITIVE_DIMENSION_COUNT];
    if messages.is_empty() {
        return mean;
    }
    for message in messages {
        for (total, value) in mean.iter_mut().zip(message.cognitive) {
            *total += value;
        }
    }
    let n = messages.len() as f64;
    mean.iter_mut().for_each(|v| *v /= n);
    mean
}
