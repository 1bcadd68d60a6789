//! Built-in lexicon sentiment scorer.
//!
//! Stand-in for the external VADER-style scoring collaborator, behind the
//! same `SentimentScorer` contract: sum per-token valences, then squash
//! into [-1, 1] with the usual `s / sqrt(s² + α)` normalization.
//! Deterministic and process-stateless, so it can be shared freely across
//! worker tasks.

use crate::traits::SentimentScorer;

/// Normalization constant, matching the reference lexicon implementation.
const ALPHA: f64 = 15.0;

/// Token valences on the [-4, 4] scale. Matched against lowercased,
/// whitespace-split tokens; no intensifier or negation handling.
const VALENCES: &[(&str, f64)] = &[
    // Negative
    ("abuse", -3.2),
    ("afraid", -2.0),
    ("alone", -1.0),
    ("anxious", -1.9),
    ("anxiety", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("broken", -1.6),
    ("cry", -1.9),
    ("crying", -1.9),
    ("dark", -0.7),
    ("dead", -3.3),
    ("depressed", -2.3),
    ("depression", -2.7),
    ("despair", -2.9),
    ("die", -2.9),
    ("dying", -2.9),
    ("empty", -0.9),
    ("exhausted", -1.6),
    ("fear", -2.2),
    ("grief", -2.2),
    ("hate", -2.7),
    ("hopeless", -2.0),
    ("hurt", -2.4),
    ("insomnia", -1.4),
    ("kill", -3.4),
    ("lonely", -1.5),
    ("lost", -1.3),
    ("miserable", -2.8),
    ("numb", -1.3),
    ("overwhelmed", -1.4),
    ("pain", -2.5),
    ("panic", -2.4),
    ("sad", -2.1),
    ("scared", -2.2),
    ("stress", -1.9),
    ("stressed", -1.9),
    ("struggling", -1.7),
    ("suicidal", -3.4),
    ("suicide", -3.4),
    ("terrible", -2.1),
    ("tired", -1.2),
    ("trauma", -2.0),
    ("worthless", -2.7),
    // Positive
    ("better", 1.9),
    ("calm", 1.3),
    ("care", 2.2),
    ("good", 1.9),
    ("grateful", 2.3),
    ("great", 3.1),
    ("happy", 2.7),
    ("healing", 2.0),
    ("help", 1.7),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("joy", 2.8),
    ("love", 3.2),
    ("peace", 2.5),
    ("proud", 2.2),
    ("safe", 1.8),
    ("strong", 2.3),
    ("support", 1.7),
    ("thankful", 2.7),
    ("thanks", 1.9),
];

fn valence(token: &str) -> Option<f64> {
    VALENCES
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, v)| *v)
}

/// Lexicon-based compound scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let sum: f64 = text
            .to_lowercase()
            .split_whitespace()
            .filter_map(valence)
            .sum();
        if sum == 0.0 {
            return 0.0;
        }
        sum / (sum * sum + ALPHA).sqrt()
    }
}
