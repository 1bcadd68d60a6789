//! Pipeline orchestration.
//!
//! For each raw post: normalize → classify → extract place → resolve,
//! producing a `LocatedPost`; then one aggregation pass over the whole
//! batch. Records never affect each other's classification, so they are
//! processed with bounded concurrency in input order; the resolver's gate
//! and cache are the only cross-record shared state. The aggregate is
//! computed only after every resolution has settled.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crisismap_common::error::CrisisMapError;
use crisismap_common::types::{Aggregate, LocatedPost, RawPost, RawPostRecord};

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::extract::extract_place;
use crate::normalize::normalize;
use crate::resolve::{Resolver, ResolverStats};
use crate::traits::{EntityRecognizer, PostSource, SentimentScorer};

/// Per-run counters, reported alongside the results.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub records_in: usize,
    pub skipped_malformed: usize,
    pub located: usize,
    pub geocoding: ResolverStats,
}

/// Everything one run produces: the full record set (every valid post is
/// retained, located or not), the spatial aggregate, and counters.
#[derive(Debug)]
pub struct PipelineRun {
    pub posts: Vec<LocatedPost>,
    pub aggregate: Aggregate,
    pub stats: RunStats,
}

pub struct Pipeline {
    scorer: Arc<dyn SentimentScorer>,
    recognizer: Arc<dyn EntityRecognizer>,
    resolver: Arc<Resolver>,
    concurrency: usize,
    top_locations: usize,
}

impl Pipeline {
    pub fn new(
        scorer: Arc<dyn SentimentScorer>,
        recognizer: Arc<dyn EntityRecognizer>,
        resolver: Arc<Resolver>,
        concurrency: usize,
        top_locations: usize,
    ) -> Self {
        Self {
            scorer,
            recognizer,
            resolver,
            concurrency: concurrency.max(1),
            top_locations,
        }
    }

    /// Fetch from the source and process the batch. Source failure is the
    /// one fatal error; once records are in hand the run always completes
    /// with partial results.
    pub async fn run_query(
        &self,
        source: &dyn PostSource,
        query: &str,
        max_results: u32,
    ) -> Result<PipelineRun, CrisisMapError> {
        let batch = source
            .fetch(query, max_results)
            .await
            .map_err(|err| CrisisMapError::Source(err.to_string()))?;
        info!(records = batch.len(), "Fetched posts from source");
        Ok(self.run(batch).await)
    }

    /// Process an already-fetched batch. Malformed records are skipped
    /// with a diagnostic; an empty batch yields an empty run.
    pub async fn run(&self, batch: Vec<RawPostRecord>) -> PipelineRun {
        let records_in = batch.len();

        let mut valid = Vec::with_capacity(batch.len());
        let mut skipped_malformed = 0;
        for record in batch {
            match record.validate() {
                Ok(post) => valid.push(post),
                Err(reason) => {
                    skipped_malformed += 1;
                    warn!(reason = %reason, "Skipping malformed record");
                }
            }
        }

        // `buffered` preserves input order, which the aggregate's
        // first-seen tie-break depends on.
        let posts: Vec<LocatedPost> = stream::iter(valid.into_iter().map(|post| self.process(post)))
            .buffered(self.concurrency)
            .collect()
            .await;

        let aggregate = aggregate(&posts, self.top_locations);
        let stats = RunStats {
            records_in,
            skipped_malformed,
            located: posts.iter().filter(|p| p.coordinates.is_some()).count(),
            geocoding: self.resolver.stats(),
        };
        info!(
            records = records_in,
            skipped = stats.skipped_malformed,
            located = stats.located,
            external_calls = stats.geocoding.external_calls,
            "Pipeline run complete"
        );

        PipelineRun {
            posts,
            aggregate,
            stats,
        }
    }

    async fn process(&self, raw: RawPost) -> LocatedPost {
        let clean_text = normalize(&raw.text);
        let (sentiment, risk_level) = classify(&clean_text, self.scorer.as_ref());
        let detected_location = extract_place(&clean_text, self.recognizer.as_ref());
        let coordinates = match &detected_location {
            Some(name) => self.resolver.resolve(name).await,
            None => None,
        };

        LocatedPost {
            raw,
            clean_text,
            sentiment,
            risk_level,
            detected_location,
            coordinates,
        }
    }
}
