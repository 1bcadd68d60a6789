//! Risk and sentiment classification.
//!
//! Two independent pure reads of the same text: sentiment thresholds an
//! external compound score, risk walks an ordered phrase table. Neither
//! consults the other and neither label is ever mutated once assigned.

use crisismap_common::types::{RiskLevel, Sentiment};

use crate::traits::SentimentScorer;

/// Direct crisis language. Any match short-circuits to High-Risk.
const HIGH_RISK_PHRASES: &[&str] = &[
    "don't want to be here",
    "end it all",
    "kill myself",
    "suicide",
    "i want to die",
    "cant go on",
    "can not go on",
];

/// Indications of struggle. Checked only after the high-risk list.
const MODERATE_PHRASES: &[&str] = &[
    "feel lost",
    "need help",
    "struggling",
    "hard to cope",
    "feeling overwhelmed",
    "depressed",
    "anxious",
    "lonely",
    "feeling down",
    "feeling sad",
];

/// Risk tiers in strict precedence order. Only the category of the first
/// matching list determines the outcome; position within a list is
/// irrelevant. Fallback when nothing matches is Low Concern.
const RISK_RULES: &[(RiskLevel, &[&str])] = &[
    (RiskLevel::HighRisk, HIGH_RISK_PHRASES),
    (RiskLevel::ModerateConcern, MODERATE_PHRASES),
];

/// Phrase-match the lowercased text against the risk table. Substring
/// containment, not token-boundary matching: a phrase embedded inside a
/// longer word still counts.
pub fn classify_risk(text: &str) -> RiskLevel {
    let lower = text.to_lowercase();
    for (level, phrases) in RISK_RULES {
        if phrases.iter().any(|phrase| lower.contains(phrase)) {
            return *level;
        }
    }
    RiskLevel::LowConcern
}

/// Map a compound score in [-1, 1] to a sentiment label. Both boundary
/// values are inclusive: 0.05 is Positive, -0.05 is Negative.
pub fn classify_sentiment(score: f64) -> Sentiment {
    if score >= 0.05 {
        Sentiment::Positive
    } else if score <= -0.05 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Classify a post's text. Sentiment delegates to the injected scorer;
/// risk is computed from the text alone.
pub fn classify(text: &str, scorer: &dyn SentimentScorer) -> (Sentiment, RiskLevel) {
    (classify_sentiment(scorer.score(text)), classify_risk(text))
}
