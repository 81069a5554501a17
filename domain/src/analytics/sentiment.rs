//! Word-list sentiment scoring.
//!
//! Counts fixed positive and negative words; no model, no calibration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "positive",
    "wonderful",
    "fantastic",
    "amazing",
    "love",
    "happy",
    "joy",
    "excited",
    "optimistic",
    "beneficial",
    "success",
    "successful",
    "advantage",
    "advantages",
    "helpful",
    "impressive",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "negative",
    "horrible",
    "disappointing",
    "hate",
    "sad",
    "unhappy",
    "angry",
    "pessimistic",
    "detrimental",
    "failure",
    "disadvantage",
    "disadvantages",
    "problem",
    "difficult",
    "poor",
];

/// Scores above this are positive, below its negation negative.
pub const LABEL_THRESHOLD: f64 = 0.2;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// Sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    fn from_score(score: f64) -> Self {
        if score > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scoring one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1.0 (all negative) to 1.0 (all positive)
    pub score: f64,
    pub label: SentimentLabel,
    /// 0.0 to 1.0, grows with the number of sentiment words
    pub confidence: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

/// Score the sentiment of `text`.
///
/// ```
/// use sandbox_domain::analytics::{analyze_sentiment, SentimentLabel};
///
/// let sentiment = analyze_sentiment("This is great and wonderful");
/// assert_eq!(sentiment.label, SentimentLabel::Positive);
/// assert!(sentiment.score > 0.2);
/// ```
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let normalized = text.to_lowercase();

    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in WORD.find_iter(&normalized).map(|m| m.as_str()) {
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    let total = positive + negative;
    let score = if total > 0 {
        (positive as f64 - negative as f64) / total as f64
    } else {
        0.0
    };

    Sentiment {
        score,
        label: SentimentLabel::from_score(score),
        confidence: (total as f64 / 10.0).min(1.0),
    }
}

/// Aggregate sentiment over several texts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageSentiment {
    pub avg_score: f64,
    pub most_common_label: SentimentLabel,
    pub avg_confidence: f64,
}

/// Average a set of sentiment results.
///
/// The most common label wins; on a tie, the label seen first wins. An empty
/// input yields a neutral zero result.
pub fn average_sentiment(results: &[Sentiment]) -> AverageSentiment {
    if results.is_empty() {
        return AverageSentiment {
            avg_score: 0.0,
            most_common_label: SentimentLabel::Neutral,
            avg_confidence: 0.0,
        };
    }

    let n = results.len() as f64;
    let avg_score = results.iter().map(|s| s.score).sum::<f64>() / n;
    let avg_confidence = results.iter().map(|s| s.confidence).sum::<f64>() / n;

    // (label, count) in first-seen order
    let mut counts: Vec<(SentimentLabel, usize)> = Vec::new();
    for result in results {
        match counts.iter_mut().find(|(label, _)| *label == result.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((result.label, 1)),
        }
    }
    let mut most_common_label = counts[0].0;
    let mut best = counts[0].1;
    for &(label, count) in &counts[1..] {
        if count > best {
            most_common_label = label;
            best = count;
        }
    }

    AverageSentiment {
        avg_score,
        most_common_label,
        avg_confidence,
    }
}
