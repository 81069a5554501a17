//! Information flow between agents.
//!
//! When one agent's message follows another's, the word overlap between the
//! two is treated as information flowing from the earlier speaker to the
//! later one.

use super::{Utterance, split_on_whitespace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Square flow matrix indexed by agent order.
///
/// `matrix[from][to]` accumulates the similarity of every adjacent
/// `from` -> `to` message pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationFlow {
    pub matrix: Vec<Vec<f64>>,
    pub agent_indices: BTreeMap<String, usize>,
}

impl InformationFlow {
    /// Flow accumulated from `from` to `to`, if both agents are known.
    pub fn flow(&self, from: &str, to: &str) -> Option<f64> {
        let i = *self.agent_indices.get(from)?;
        let j = *self.agent_indices.get(to)?;
        Some(self.matrix[i][j])
    }

    /// Total flow leaving each agent, by index.
    pub fn outgoing_totals(&self) -> Vec<f64> {
        self.matrix.iter().map(|row| row.iter().sum()).collect()
    }
}

/// Jaccard index of the lowercase word sets.
///
/// Words come from splitting on whitespace runs, so leading or trailing
/// whitespace contributes an empty word and two empty texts are identical.
///
/// ```
/// use sandbox_domain::analytics::jaccard_similarity;
///
/// assert_eq!(jaccard_similarity("the cat sat", "the cat ran"), 0.5);
/// assert_eq!(jaccard_similarity("the cat sat\n", "the cat ran"), 0.4);
/// ```
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: HashSet<&str> = split_on_whitespace(&a).collect();
    let words_b: HashSet<&str> = split_on_whitespace(&b).collect();

    // never zero: every text yields at least one (possibly empty) word
    let union = words_a.union(&words_b).count();
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Build the flow matrix for `messages` over `agent_ids`.
///
/// Pairs from the same agent, or involving an agent not in `agent_ids`, are
/// skipped.
pub fn calculate_information_flow<M: Utterance>(messages: &[M], agent_ids: &[String]) -> InformationFlow {
    let n = agent_ids.len();
    let mut matrix = vec![vec![0.0; n]; n];
    let agent_indices: BTreeMap<String, usize> = agent_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    for pair in messages.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let (Some(&from), Some(&to)) = (
            agent_indices.get(prev.agent_id()),
            agent_indices.get(current.agent_id()),
        ) else {
            continue;
        };
        if from == to {
            continue;
        }
        matrix[from][to] += jaccard_similarity(prev.content(), current.content());
    }

    InformationFlow {
        matrix,
        agent_indices,
    }
}
