//! Emergent leadership detection.
//!
//! An agent earns points for coordinating (asking questions), directing
//! (`let's`, `we should`, ...) and summarizing (`in summary`, ...). Points are
//! averaged over the agent's own messages and scaled to 0-10.

use super::Utterance;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const QUESTION_WEIGHT: f64 = 0.5;
pub const DIRECTIVE_WEIGHT: f64 = 0.7;
pub const SUMMARIZATION_WEIGHT: f64 = 1.0;
pub const MAX_LEADERSHIP_SCORE: f64 = 10.0;

fn case_insensitive(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid regex"))
        .collect()
}

static DIRECTIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    case_insensitive(&[
        "let's",
        "we should",
        "I suggest",
        "consider",
        "what if we",
        "it would be better to",
    ])
});

static SUMMARIZATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    case_insensitive(&[
        "in summary",
        "to summarize",
        "so far",
        "up to this point",
        "we've discussed",
        "to recap",
    ])
});

/// Leadership score per agent, in the order the agents were given
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadershipScores {
    pub scores: Vec<(String, f64)>,
}

impl LeadershipScores {
    pub fn get(&self, agent_id: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(id, _)| id == agent_id)
            .map(|(_, score)| *score)
    }

    /// The highest-scoring agent; the first listed wins ties.
    pub fn leader(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (id, score) in &self.scores {
            if best.is_none_or(|(_, top)| *score > top) {
                best = Some((id.as_str(), *score));
            }
        }
        best
    }
}

/// Raw (unnormalized) leadership points earned by a single message.
pub fn message_leadership_points(content: &str) -> f64 {
    let mut points = 0.0;
    if content.contains('?') {
        points += QUESTION_WEIGHT;
    }
    for pattern in DIRECTIVE_PATTERNS.iter() {
        if pattern.is_match(content) {
            points += DIRECTIVE_WEIGHT;
        }
    }
    for pattern in SUMMARIZATION_PATTERNS.iter() {
        if pattern.is_match(content) {
            points += SUMMARIZATION_WEIGHT;
        }
    }
    points
}

/// Score each agent in `agent_ids` for leadership behaviour.
///
/// Messages from agents not in `agent_ids` are ignored. Agents without
/// messages score 0.
pub fn detect_emergent_leadership<M: Utterance>(messages: &[M], agent_ids: &[String]) -> LeadershipScores {
    let scores = agent_ids
        .iter()
        .map(|id| {
            let own: Vec<&M> = messages.iter().filter(|m| m.agent_id() == id).collect();
            if own.is_empty() {
                return (id.clone(), 0.0);
            }
            let points: f64 = own.iter().map(|m| message_leadership_points(m.content())).sum();
            let score = (points / own.len() as f64 * 10.0).min(MAX_LEADERSHIP_SCORE);
            (id.clone(), score)
        })
        .collect();

    LeadershipScores { scores }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(agent: &str, content: &str) -> (String, String) {
        (agent.to_string(), content.to_string())
    }

    fn agents(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_directive_question_caps_at_ten() {
        let messages = vec![msg("A", "Let's consider option X?")];
        let scores = detect_emergent_leadership(&messages, &agents(&["A"]));
        assert_eq!(scores.get("A"), Some(10.0));
    }

    #[test]
    fn test_points_per_message() {
        assert_eq!(message_leadership_points("plain statement"), 0.0);
        assert_eq!(message_leadership_points("really?"), 0.5);
        assert!((message_leadership_points("To recap, we should stop") - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_by_message_count() {
        let messages = vec![
            msg("A", "really?"),
            msg("A", "nothing here"),
            msg("A", "nothing here either"),
            msg("A", "nor here"),
            msg("A", "still nothing"),
            msg("A", "done"),
            msg("A", "ok"),
            msg("A", "fine"),
            msg("A", "sure"),
            msg("A", "yes"),
        ];
        let scores = detect_emergent_leadership(&messages, &agents(&["A"]));
        // 0.5 / 10 messages * 10
        assert!((scores.get("A").unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_silent_and_unknown_agents() {
        let messages = vec![msg("Z", "Let's go?"), msg("A", "hello")];
        let scores = detect_emergent_leadership(&messages, &agents(&["A", "B"]));
        assert_eq!(scores.get("A"), Some(0.0));
        assert_eq!(scores.get("B"), Some(0.0));
        assert_eq!(scores.get("Z"), None);
    }

    #[test]
    fn test_leader() {
        let messages = vec![msg("A", "hello"), msg("B", "In summary, we agree")];
        let scores = detect_emergent_leadership(&messages, &agents(&["A", "B"]));
        assert_eq!(scores.leader().map(|(id, _)| id), Some("B"));
    }
}
