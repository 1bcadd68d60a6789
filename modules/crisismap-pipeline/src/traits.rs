// Trait abstractions for the pipeline's external collaborators.
//
// PostSource — raw post acquisition (fatal on failure).
// SentimentScorer — lexicon-style compound scoring (total, no failure path).
// EntityRecognizer — named-entity recognition (failure reported as absent).
// Geocoder — place name → coordinates (throttled and cached by Resolver).
//
// All four are injected as constructor-passed capabilities so tests can
// substitute deterministic mocks: no network, no models, no API keys.

use anyhow::Result;
use async_trait::async_trait;

use crisismap_common::types::{GeoPoint, RawPostRecord};
use nominatim_client::NominatimClient;

// ---------------------------------------------------------------------------
// PostSource
// ---------------------------------------------------------------------------

/// Yields raw post records for a crisis-keyword query. A source failure
/// (auth, quota, unreadable export) is fatal to the whole run.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch(&self, query: &str, max_results: u32) -> Result<Vec<RawPostRecord>>;
}

// ---------------------------------------------------------------------------
// SentimentScorer
// ---------------------------------------------------------------------------

/// Compound sentiment score in [-1, 1] for a normalized text. Total: every
/// input scores, there is no failure path.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

// ---------------------------------------------------------------------------
// EntityRecognizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Geopolitical entity (city, state, country).
    Gpe,
    /// Non-political location (region, landmark, body of water).
    Loc,
    Other,
}

/// A recognized span, in the recognizer's native entity order.
#[derive(Debug, Clone)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_place(&self) -> bool {
        matches!(self.kind, EntityKind::Gpe | EntityKind::Loc)
    }
}

/// Named-entity recognition over post text. Errors are tolerated by the
/// caller (treated as "no entities"), never retried.
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Result<Vec<Entity>>;
}

// ---------------------------------------------------------------------------
// Geocoder
// ---------------------------------------------------------------------------

/// Place name → coordinates. `Ok(None)` is a definitive no-match; `Err` is
/// a transient failure (network, decode, service error). The Resolver is
/// the only caller and turns both into cached absent results.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, name: &str) -> Result<Option<GeoPoint>>;
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, name: &str) -> Result<Option<GeoPoint>> {
        match self.search(name).await? {
            None => Ok(None),
            Some(result) => {
                let coords = result
                    .coordinates()
                    .ok_or_else(|| anyhow::anyhow!("malformed coordinates in response"))?;
                Ok(Some(GeoPoint {
                    lat: coords.lat,
                    lng: coords.lon,
                }))
            }
        }
    }
}
