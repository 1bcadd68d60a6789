//! Rate-limited, cached geocoding.
//!
//! The resolver is the pipeline's one serialization point. The cache maps
//! each exact location string (case preserved) to a per-key once-cell, so
//! at most one external call is ever in flight per distinct name and later
//! callers for the same name await the first result. Cache misses then
//! pass through the shared `RateGate` before reaching the geocoder, which
//! keeps the global one-call-per-interval contract across all workers. A
//! cancelled lookup leaves its cell unset, never half-written.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OnceCell;

use crisismap_common::types::GeoPoint;

use crate::rate_gate::RateGate;
use crate::traits::Geocoder;

/// Outcome of one external lookup, cached per location name. `Failed` is
/// distinguished from `Miss` so the boundary can log causes, but both read
/// back as absent coordinates and neither retries the external call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    Hit(GeoPoint),
    Miss,
    Failed,
}

impl GeocodeOutcome {
    pub fn coordinates(self) -> Option<GeoPoint> {
        match self {
            GeocodeOutcome::Hit(point) => Some(point),
            GeocodeOutcome::Miss | GeocodeOutcome::Failed => None,
        }
    }
}

/// External-call counters for one run.
#[derive(Debug, Default)]
struct Counters {
    calls: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time view of the resolver's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub external_calls: u64,
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
}

pub struct Resolver {
    geocoder: Arc<dyn Geocoder>,
    gate: RateGate,
    timeout: Duration,
    cache: Mutex<HashMap<String, Arc<OnceCell<GeocodeOutcome>>>>,
    counters: Counters,
}

impl Resolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, interval: Duration, timeout: Duration) -> Self {
        Self {
            geocoder,
            gate: RateGate::new(interval),
            timeout,
            cache: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Resolve a place name to coordinates. Cache hits (including recorded
    /// misses and failures) return without any external call or delay; a
    /// single failed resolution never aborts the batch.
    pub async fn resolve(&self, name: &str) -> Option<GeoPoint> {
        let cell = {
            let mut cache = self.cache.lock().expect("resolver cache poisoned");
            cache.entry(name.to_string()).or_default().clone()
        };
        let outcome = cell.get_or_init(|| self.lookup(name)).await;
        outcome.coordinates()
    }

    /// Counter snapshot for run stats.
    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            external_calls: self.counters.calls.load(Ordering::Relaxed),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    async fn lookup(&self, name: &str) -> GeocodeOutcome {
        self.gate.acquire().await;
        self.counters.calls.fetch_add(1, Ordering::Relaxed);

        match tokio::time::timeout(self.timeout, self.geocoder.geocode(name)).await {
            Ok(Ok(Some(point))) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(name, lat = point.lat, lng = point.lng, "Geocoded location");
                GeocodeOutcome::Hit(point)
            }
            Ok(Ok(None)) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(name, "No geocoding match");
                GeocodeOutcome::Miss
            }
            Ok(Err(err)) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(name, error = %err, "Geocoding failed, caching as miss");
                GeocodeOutcome::Failed
            }
            Err(_) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(name, timeout_ms = self.timeout.as_millis() as u64, "Geocoding timed out, caching as miss");
                GeocodeOutcome::Failed
            }
        }
    }
}
