use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Geo types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

// --- Classification enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    HighRisk,
    ModerateConcern,
    LowConcern,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::HighRisk => write!(f, "High-Risk"),
            RiskLevel::ModerateConcern => write!(f, "Moderate Concern"),
            RiskLevel::LowConcern => write!(f, "Low Concern"),
        }
    }
}

// --- Pipeline records ---
//
// Data flows strictly forward: RawPost → NormalizedPost → ClassifiedPost →
// LocatedPost. No stage mutates a record produced by a later stage.

/// A post as delivered by the source collaborator, after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// Wire form of a raw post at the ingestion boundary. Sources deserialize
/// into this; `validate` promotes it to a `RawPost` or reports what is
/// missing so the orchestrator can skip it with a diagnostic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPostRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub shares: Option<u64>,
}

impl RawPostRecord {
    /// Promote to a `RawPost`. Engagement counts default to zero when the
    /// platform omits them; id, timestamp and text are required.
    pub fn validate(self) -> Result<RawPost, String> {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => return Err("missing id".to_string()),
        };
        let created_at = self.created_at.ok_or("missing created_at")?;
        let text = match self.text {
            Some(text) if !text.is_empty() => text,
            _ => return Err("missing text".to_string()),
        };
        Ok(RawPost {
            id,
            created_at,
            text,
            likes: self.likes.unwrap_or(0),
            comments: self.comments.unwrap_or(0),
            shares: self.shares.unwrap_or(0),
        })
    }
}

/// A post after text normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub id: String,
    pub clean_text: String,
}

/// A post after sentiment and risk classification. Both labels are pure
/// functions of `clean_text` and are never mutated once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub id: String,
    pub clean_text: String,
    pub sentiment: Sentiment,
    pub risk_level: RiskLevel,
}

/// A post after place extraction and geocoding. `coordinates` is present
/// only when `detected_location` is present and the resolver returned a
/// hit; a miss or absent location leaves both fields absent. The record is
/// retained either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedPost {
    pub raw: RawPost,
    pub clean_text: String,
    pub sentiment: Sentiment,
    pub risk_level: RiskLevel,
    pub detected_location: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

// --- Aggregate ---

/// One entry in the top-location ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
    pub name: String,
    pub count: usize,
}

/// The spatial summary over a batch: heatmap density points plus the
/// ranked location table. Recomputed whole each run, never patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub heatmap_points: Vec<GeoPoint>,
    pub top_locations: Vec<LocationCount>,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.heatmap_points.is_empty() && self.top_locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: Option<&str>, text: Option<&str>) -> RawPostRecord {
        RawPostRecord {
            id: id.map(String::from),
            created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
            text: text.map(String::from),
            likes: Some(3),
            comments: None,
            shares: Some(1),
        }
    }

    #[test]
    fn validate_promotes_complete_record() {
        let post = record(Some("42"), Some("feeling overwhelmed")).validate().unwrap();
        assert_eq!(post.id, "42");
        assert_eq!(post.likes, 3);
        assert_eq!(post.comments, 0);
        assert_eq!(post.shares, 1);
    }

    #[test]
    fn validate_rejects_missing_fields() {
        assert_eq!(record(None, Some("hi")).validate().unwrap_err(), "missing id");
        assert_eq!(record(Some("1"), None).validate().unwrap_err(), "missing text");
        assert_eq!(record(Some("1"), Some("")).validate().unwrap_err(), "missing text");

        let no_ts = RawPostRecord {
            id: Some("1".into()),
            text: Some("hi".into()),
            ..Default::default()
        };
        assert_eq!(no_ts.validate().unwrap_err(), "missing created_at");
    }

    #[test]
    fn risk_level_displays_original_labels() {
        assert_eq!(RiskLevel::HighRisk.to_string(), "High-Risk");
        assert_eq!(RiskLevel::ModerateConcern.to_string(), "Moderate Concern");
        assert_eq!(RiskLevel::LowConcern.to_string(), "Low Concern");
    }
}
