//! Cognitive-dimension vectors.
//!
//! A ten-dimension vector derived from a message and the reasoning the agent
//! attached to it. Every dimension starts at 0.5; the ones that can be read
//! off the reasoning text are overwritten with simple clamped ratios and
//! counts. Same text in, same vector out.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Number of cognitive dimensions.
pub const COGNITIVE_DIMENSION_COUNT: usize = 10;

/// Value every dimension starts from.
pub const BASELINE: f64 = 0.5;

/// Fixed value for pattern persistence; measuring it needs more than one message.
pub const PATTERN_PERSISTENCE_DEFAULT: f64 = 0.7;

pub type CognitiveVector = [f64; COGNITIVE_DIMENSION_COUNT];

/// Named index into a [`CognitiveVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CognitiveDimension {
    AsymmetricCognition,
    MetaLanguageCoherence,
    RecursiveDepth,
    IncompletenessTolerance,
    CognitiveTransparency,
    NonMonotonicExploration,
    PatternPersistence,
    LeadershipEmergence,
    InformationSynthesis,
    EpistemicHumility,
}

impl CognitiveDimension {
    pub const ALL: [CognitiveDimension; COGNITIVE_DIMENSION_COUNT] = [
        CognitiveDimension::AsymmetricCognition,
        CognitiveDimension::MetaLanguageCoherence,
        CognitiveDimension::RecursiveDepth,
        CognitiveDimension::IncompletenessTolerance,
        CognitiveDimension::CognitiveTransparency,
        CognitiveDimension::NonMonotonicExploration,
        CognitiveDimension::PatternPersistence,
        CognitiveDimension::LeadershipEmergence,
        CognitiveDimension::InformationSynthesis,
        CognitiveDimension::EpistemicHumility,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CognitiveDimension::AsymmetricCognition => "ASYMMETRIC_COGNITION",
            CognitiveDimension::MetaLanguageCoherence => "META_LANGUAGE_COHERENCE",
            CognitiveDimension::RecursiveDepth => "RECURSIVE_DEPTH",
            CognitiveDimension::IncompletenessTolerance => "INCOMPLETENESS_TOLERANCE",
            CognitiveDimension::CognitiveTransparency => "COGNITIVE_TRANSPARENCY",
            CognitiveDimension::NonMonotonicExploration => "NON_MONOTONIC_EXPLORATION",
            CognitiveDimension::PatternPersistence => "PATTERN_PERSISTENCE",
            CognitiveDimension::LeadershipEmergence => "LEADERSHIP_EMERGENCE",
            CognitiveDimension::InformationSynthesis => "INFORMATION_SYNTHESIS",
            CognitiveDimension::EpistemicHumility => "EPISTEMIC_HUMILITY",
        }
    }
}

impl std::fmt::Display for CognitiveDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

const META_TERMS: &[&str] = &[
    "think",
    "believe",
    "know",
    "understand",
    "realize",
    "consider",
    "analyze",
];

const UNCERTAINTY_TERMS: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "might",
    "could",
    "uncertain",
    "unclear",
];

fn word_patterns(terms: &[&str]) -> Vec<Regex> {
    terms
        .iter()
        .map(|t| Regex::new(&format!(r"(?i)\b{}\b", t)).expect("valid regex"))
        .collect()
}

static META: LazyLock<Vec<Regex>> = LazyLock::new(|| word_patterns(META_TERMS));
static UNCERTAINTY: LazyLock<Vec<Regex>> = LazyLock::new(|| word_patterns(UNCERTAINTY_TERMS));
static RECURSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)I think.*?because.*?which means").expect("valid regex"));
static REASONING_STEPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)first|second|third|finally|therefore|thus|hence").expect("valid regex")
});
static ALTERNATIVES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)alternatively|on the other hand|however|but|instead").expect("valid regex")
});

/// Pieces left after splitting on whitespace runs (an empty text counts as one).
fn segment_count(text: &str) -> usize {
    super::split_on_whitespace(text).count()
}

fn count_terms(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|p| p.find_iter(text).count()).sum()
}

fn ratio(count: usize, divisor: f64) -> f64 {
    (count as f64 / divisor).min(1.0)
}

/// Derive the cognitive vector for one message.
///
/// Without `thinking` the baseline vector is returned unchanged.
pub fn analyze_cognitive_dimensions(content: &str, thinking: Option<&str>) -> CognitiveVector {
    let mut vector = [BASELINE; COGNITIVE_DIMENSION_COUNT];

    let Some(thinking) = thinking else {
        return vector;
    };

    let content_words = segment_count(content) as f64;
    let thinking_words = segment_count(thinking) as f64;
    vector[CognitiveDimension::AsymmetricCognition.index()] =
        (thinking_words / (content_words + 1.0)).min(1.0);

    vector[CognitiveDimension::MetaLanguageCoherence.index()] =
        ratio(count_terms(&META, thinking), 10.0);

    vector[CognitiveDimension::RecursiveDepth.index()] =
        ratio(RECURSIVE.find_iter(thinking).count(), 3.0);

    vector[CognitiveDimension::IncompletenessTolerance.index()] =
        ratio(count_terms(&UNCERTAINTY, thinking), 5.0);

    vector[CognitiveDimension::CognitiveTransparency.index()] =
        ratio(REASONING_STEPS.find_iter(thinking).count(), 4.0);

    vector[CognitiveDimension::NonMonotonicExploration.index()] =
        ratio(ALTERNATIVES.find_iter(thinking).count(), 3.0);

    vector[CognitiveDimension::PatternPersistence.index()] = PATTERN_PERSISTENCE_DEFAULT;

    vector
}

/// A cognitive vector observed at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSnapshot {
    pub timestamp: DateTime<Utc>,
    pub dimensions: CognitiveVector,
}

/// Change between two consecutive snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Timestamp of the later snapshot
    pub timestamp: DateTime<Utc>,
    pub trajectory: CognitiveVector,
    /// Euclidean length of `trajectory`
    pub magnitude: f64,
}

/// A trajectory step large enough to count as a shift in thinking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveShift {
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    /// Dimensions that moved by more than half the threshold
    pub dimensions: Vec<CognitiveDimension>,
}

/// Default magnitude above which a trajectory step is a shift.
pub const DEFAULT_SHIFT_THRESHOLD: f64 = 0.3;

/// Per-step change of the cognitive vector. `None` for fewer than two snapshots.
pub fn calculate_cognitive_trajectory(history: &[CognitiveSnapshot]) -> Option<Vec<TrajectoryPoint>> {
    if history.len() < 2 {
        return None;
    }

    let points = history
        .windows(2)
        .map(|pair| {
            let mut trajectory = [0.0; COGNITIVE_DIMENSION_COUNT];
            for (i, delta) in trajectory.iter_mut().enumerate() {
                *delta = pair[1].dimensions[i] - pair[0].dimensions[i];
            }
            let magnitude = trajectory.iter().map(|d| d * d).sum::<f64>().sqrt();
            TrajectoryPoint {
                timestamp: pair[1].timestamp,
                trajectory,
                magnitude,
            }
        })
        .collect();

    Some(points)
}

/// Trajectory points whose magnitude exceeds `threshold`.
pub fn detect_cognitive_shifts(trajectory: &[TrajectoryPoint], threshold: f64) -> Vec<CognitiveShift> {
    trajectory
        .iter()
        .filter(|point| point.magnitude > threshold)
        .map(|point| CognitiveShift {
            timestamp: point.timestamp,
            magnitude: point.magnitude,
            dimensions: CognitiveDimension::ALL
                .into_iter()
                .filter(|d| point.trajectory[d.index()].abs() > threshold / 2.0)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_without_thinking_returns_baseline() {
        assert_eq!(analyze_cognitive_dimensions("anything", None), [BASELINE; 10]);
    }

    #[test]
    fn test_asymmetric_cognition() {
        // 2 content words, 3 thinking words -> 3 / 3
        let v = analyze_cognitive_dimensions("two words", Some("one two three"));
        assert_eq!(v[CognitiveDimension::AsymmetricCognition.index()], 1.0);

        // 3 content words, 2 thinking words -> 2 / 4
        let v = analyze_cognitive_dimensions("a b c", Some("x y"));
        assert_eq!(v[CognitiveDimension::AsymmetricCognition.index()], 0.5);
    }

    #[test]
    fn test_meta_terms_use_word_boundaries() {
        let v = analyze_cognitive_dimensions("c", Some("I think we know. Thinking is not counted."));
        // "think" and "know" only
        assert!((v[CognitiveDimension::MetaLanguageCoherence.index()] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_recursive_depth() {
        let v = analyze_cognitive_dimensions(
            "c",
            Some("I think so because of X, which means Y. I think not because Z which means W."),
        );
        assert!((v[CognitiveDimension::RecursiveDepth.index()] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncertainty_transparency_alternatives() {
        let v = analyze_cognitive_dimensions(
            "c",
            Some("Maybe first, perhaps second. However, instead we could go."),
        );
        // maybe, perhaps, could
        assert!((v[CognitiveDimension::IncompletenessTolerance.index()] - 0.6).abs() < 1e-9);
        // first, second
        assert!((v[CognitiveDimension::CognitiveTransparency.index()] - 0.5).abs() < 1e-9);
        // however, instead
        assert!((v[CognitiveDimension::NonMonotonicExploration.index()] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_dimensions() {
        let v = analyze_cognitive_dimensions("c", Some("t"));
        assert_eq!(v[CognitiveDimension::PatternPersistence.index()], 0.7);
        assert_eq!(v[CognitiveDimension::LeadershipEmergence.index()], 0.5);
        assert_eq!(v[CognitiveDimension::InformationSynthesis.index()], 0.5);
        assert_eq!(v[CognitiveDimension::EpistemicHumility.index()], 0.5);
    }

    #[test]
    fn test_deterministic() {
        let a = analyze_cognitive_dimensions("content", Some("I believe, but maybe not"));
        let b = analyze_cognitive_dimensions("content", Some("I believe, but maybe not"));
        assert_eq!(a, b);
    }

    fn snapshot(secs: i64, dims: CognitiveVector) -> CognitiveSnapshot {
        CognitiveSnapshot {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            dimensions: dims,
        }
    }

    #[test]
    fn test_trajectory_requires_two_points() {
        assert!(calculate_cognitive_trajectory(&[]).is_none());
        assert!(calculate_cognitive_trajectory(&[snapshot(0, [0.5; 10])]).is_none());
    }

    #[test]
    fn test_trajectory_and_shifts() {
        let mut moved = [0.5; 10];
        moved[0] = 0.9; // +0.4
        moved[1] = 0.6; // +0.1
        let history = vec![snapshot(0, [0.5; 10]), snapshot(10, moved), snapshot(20, moved)];

        let trajectory = calculate_cognitive_trajectory(&history).unwrap();
        assert_eq!(trajectory.len(), 2);
        let expected = (0.4f64 * 0.4 + 0.1 * 0.1).sqrt();
        assert!((trajectory[0].magnitude - expected).abs() < 1e-9);
        assert_eq!(trajectory[1].magnitude, 0.0);

        let shifts = detect_cognitive_shifts(&trajectory, DEFAULT_SHIFT_THRESHOLD);
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].timestamp, history[1].timestamp);
        assert_eq!(shifts[0].dimensions, vec![CognitiveDimension::AsymmetricCognition]);
    }
}
