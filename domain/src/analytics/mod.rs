//! Heuristic conversation analytics.
//!
//! Everything here is deterministic text heuristics: word lists, regular
//! expressions and counts. None of it calls a model.

pub mod cognitive;
pub mod information_flow;
pub mod leadership;
pub mod sentiment;
pub mod vector;

pub use cognitive::{
    BASELINE, COGNITIVE_DIMENSION_COUNT, CognitiveDimension, CognitiveShift, CognitiveSnapshot,
    CognitiveVector, DEFAULT_SHIFT_THRESHOLD, TrajectoryPoint, analyze_cognitive_dimensions,
    calculate_cognitive_trajectory, detect_cognitive_shifts,
};
pub use information_flow::{InformationFlow, calculate_information_flow, jaccard_similarity};
pub use leadership::{LeadershipScores, detect_emergent_leadership, message_leadership_points};
pub use sentiment::{
    AverageSentiment, LABEL_THRESHOLD, Sentiment, SentimentLabel, analyze_sentiment,
    average_sentiment,
};
pub use vector::{AnalyticsError, cosine_similarity, euclidean_distance};

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Split on whitespace runs.
///
/// Leading or trailing whitespace leaves an empty piece at that end, and an
/// empty text is a single empty piece.
pub(crate) fn split_on_whitespace(text: &str) -> impl Iterator<Item = &str> {
    WHITESPACE.split(text)
}

/// A message as seen by the analytics: who said it and what was said.
pub trait Utterance {
    fn agent_id(&self) -> &str;
    fn content(&self) -> &str;
}

impl Utterance for (String, String) {
    fn agent_id(&self) -> &str {
        &self.0
    }

    fn content(&self) -> &str {
        &self.1
    }
}

impl<T: Utterance + ?Sized> Utterance for &T {
    fn agent_id(&self) -> &str {
        (**self).agent_id()
    }

    fn content(&self) -> &str {
        (**self).content()
    }
}

impl Utterance for crate::protocol::a2a::A2aMessage {
    fn agent_id(&self) -> &str {
        &self.sender_id
    }

    fn content(&self) -> &str {
        &self.content
    }
}
