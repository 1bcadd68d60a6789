// Test mocks for the pipeline's trait boundaries.
//
// Four mocks matching the four collaborator traits:
// - StaticSource (PostSource) — canned record batches, optional failure
// - FixedScorer (SentimentScorer) — HashMap-based text→score
// - MockRecognizer (EntityRecognizer) — HashMap-based text→entities
// - MockGeocoder (Geocoder) — per-name scripted outcomes with call counts
//
// Plus helpers for constructing posts. No network, no models, no API keys.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crisismap_common::types::{GeoPoint, LocatedPost, RawPost, RawPostRecord, RiskLevel, Sentiment};

use crate::traits::{Entity, EntityRecognizer, Geocoder, PostSource, SentimentScorer};

// ---------------------------------------------------------------------------
// Record helpers
// ---------------------------------------------------------------------------

/// A raw record with the given id and text and fixed engagement numbers.
pub fn raw_record(id: &str, text: &str) -> RawPostRecord {
    RawPostRecord {
        id: Some(id.to_string()),
        created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
        text: Some(text.to_string()),
        likes: Some(1),
        comments: Some(0),
        shares: Some(0),
    }
}

/// A located post with fixed classification labels, for aggregator and
/// export tests where only the location fields matter.
pub fn located_post(id: &str, location: Option<&str>, coordinates: Option<GeoPoint>) -> LocatedPost {
    LocatedPost {
        raw: RawPost {
            id: id.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            text: "feeling overwhelmed".to_string(),
            likes: 1,
            comments: 0,
            shares: 0,
        },
        clean_text: "feeling overwhelmed".to_string(),
        sentiment: Sentiment::Negative,
        risk_level: RiskLevel::ModerateConcern,
        detected_location: location.map(String::from),
        coordinates,
    }
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

/// Canned post source. `failing()` simulates an unreachable collaborator.
pub struct StaticSource {
    records: Vec<RawPostRecord>,
    fail: bool,
}

impl StaticSource {
    pub fn new(records: Vec<RawPostRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl PostSource for StaticSource {
    async fn fetch(&self, _query: &str, max_results: u32) -> Result<Vec<RawPostRecord>> {
        if self.fail {
            bail!("source unavailable: 401 Unauthorized");
        }
        Ok(self
            .records
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// FixedScorer
// ---------------------------------------------------------------------------

/// Deterministic scorer: registered texts get their score, everything else
/// gets the default.
pub struct FixedScorer {
    scores: HashMap<String, f64>,
    default: f64,
}

impl FixedScorer {
    pub fn new(default: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default,
        }
    }

    pub fn on(mut self, text: &str, score: f64) -> Self {
        self.scores.insert(text.to_string(), score);
        self
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> f64 {
        self.scores.get(text).copied().unwrap_or(self.default)
    }
}

// ---------------------------------------------------------------------------
// MockRecognizer
// ---------------------------------------------------------------------------

/// HashMap-based recognizer. Unregistered texts yield no entities;
/// `failing()` errors on every call.
pub struct MockRecognizer {
    entities: HashMap<String, Vec<Entity>>,
    fail: bool,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entities: HashMap::new(),
            fail: true,
        }
    }

    pub fn on(mut self, text: &str, entities: Vec<Entity>) -> Self {
        self.entities.insert(text.to_string(), entities);
        self
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for MockRecognizer {
    fn entities(&self, text: &str) -> Result<Vec<Entity>> {
        if self.fail {
            bail!("recognizer model unavailable");
        }
        Ok(self.entities.get(text).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockGeocoder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Scripted {
    Hit(GeoPoint),
    Miss,
    Fail,
    Hang,
}

/// Scripted geocoder with per-name call counting. Unregistered names are
/// misses; `Hang` never returns, for timeout tests under a paused clock.
pub struct MockGeocoder {
    outcomes: HashMap<String, Scripted>,
    calls: Mutex<HashMap<String, u64>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn on_hit(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.outcomes
            .insert(name.to_string(), Scripted::Hit(GeoPoint { lat, lng }));
        self
    }

    pub fn on_miss(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), Scripted::Miss);
        self
    }

    pub fn on_fail(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), Scripted::Fail);
        self
    }

    pub fn on_hang(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), Scripted::Hang);
        self
    }

    /// External calls issued for one name.
    pub fn call_count(&self, name: &str) -> u64 {
        self.calls
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// External calls issued across all names.
    pub fn total_calls(&self) -> u64 {
        self.calls.lock().unwrap().values().sum()
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<GeoPoint>> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert(0) += 1;

        match self.outcomes.get(name).copied().unwrap_or(Scripted::Miss) {
            Scripted::Hit(point) => Ok(Some(point)),
            Scripted::Miss => Ok(None),
            Scripted::Fail => bail!("connection reset by peer"),
            Scripted::Hang => {
                futures::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
