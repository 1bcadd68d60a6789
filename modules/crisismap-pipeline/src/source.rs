//! Post acquisition.
//!
//! The live search collaborator is external; what ships here is the
//! crisis-keyword query it is driven with and a `PostSource` over the flat
//! JSON-Lines export that collaborator produces. An unreadable export is
//! fatal (source failure); an unparseable line is a malformed record,
//! skipped with a diagnostic.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

use crisismap_common::types::RawPostRecord;

use crate::traits::PostSource;

/// Crisis-related search keywords.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "depressed",
    "depression",
    "addiction help",
    "overwhelmed",
    "suicidal",
    "substance abuse",
    "mental health",
    "anxiety",
    "hopeless",
    "lonely",
    "self-harm",
    "trauma",
    "stress",
    "anxious",
    "insomnia",
];

/// Build the source query string: quoted keywords OR-ed together, reshared
/// content excluded.
pub fn search_query(keywords: &[&str]) -> String {
    let quoted: Vec<String> = keywords.iter().map(|kw| format!("\"{kw}\"")).collect();
    format!("{} -is:retweet", quoted.join(" OR "))
}

/// Reads raw post records from a JSON-Lines export, one object per line.
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for JsonlSource {
    async fn fetch(&self, _query: &str, max_results: u32) -> Result<Vec<RawPostRecord>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading post export {}", self.path.display()))?;

        let mut records = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RawPostRecord>(line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(line = idx + 1, error = %err, "Skipping unparseable export line");
                }
            }
            if records.len() >= max_results as usize {
                break;
            }
        }
        Ok(records)
    }
}
