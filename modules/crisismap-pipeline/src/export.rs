//! Flat record and aggregate export.
//!
//! The record table carries a fixed column set — every raw field plus the
//! derived classification and location columns — with absent values
//! serialized as null. One JSON object per line for the records, a single
//! JSON document for the aggregate; rendering into tables or maps is a
//! downstream concern.

use std::io::Write;

use serde::Serialize;

use crisismap_common::error::CrisisMapError;
use crisismap_common::types::{Aggregate, LocatedPost};

/// One row of the flat export table.
#[derive(Debug, Serialize)]
pub struct FlatRecord<'a> {
    pub post_id: &'a str,
    pub timestamp: String,
    pub text: &'a str,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub clean_text: &'a str,
    pub sentiment: String,
    pub risk_level: String,
    pub detected_location: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl<'a> From<&'a LocatedPost> for FlatRecord<'a> {
    fn from(post: &'a LocatedPost) -> Self {
        Self {
            post_id: &post.raw.id,
            timestamp: post.raw.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            text: &post.raw.text,
            likes: post.raw.likes,
            comments: post.raw.comments,
            shares: post.raw.shares,
            clean_text: &post.clean_text,
            sentiment: post.sentiment.to_string(),
            risk_level: post.risk_level.to_string(),
            detected_location: post.detected_location.as_deref(),
            latitude: post.coordinates.map(|p| p.lat),
            longitude: post.coordinates.map(|p| p.lng),
        }
    }
}

/// Write the full record table as JSON Lines.
pub fn write_records<W: Write>(mut out: W, posts: &[LocatedPost]) -> Result<(), CrisisMapError> {
    for post in posts {
        let row = FlatRecord::from(post);
        serde_json::to_writer(&mut out, &row).map_err(|e| CrisisMapError::Export(e.to_string()))?;
        out.write_all(b"\n")
            .map_err(|e| CrisisMapError::Export(e.to_string()))?;
    }
    Ok(())
}

/// Write the aggregate (heatmap points + top locations) as one JSON
/// document.
pub fn write_aggregate<W: Write>(mut out: W, aggregate: &Aggregate) -> Result<(), CrisisMapError> {
    serde_json::to_writer_pretty(&mut out, aggregate)
        .map_err(|e| CrisisMapError::Export(e.to_string()))?;
    out.write_all(b"\n")
        .map_err(|e| CrisisMapError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::located_post;
    use crisismap_common::types::{GeoPoint, LocationCount};

    #[test]
    fn located_rows_carry_coordinates() {
        let posts = vec![located_post(
            "1",
            Some("Paris"),
            Some(GeoPoint { lat: 48.86, lng: 2.35 }),
        )];
        let mut buf = Vec::new();
        write_records(&mut buf, &posts).unwrap();

        let row: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(row["post_id"], "1");
        assert_eq!(row["detected_location"], "Paris");
        assert_eq!(row["latitude"], 48.86);
        assert_eq!(row["longitude"], 2.35);
        assert_eq!(row["risk_level"], "Moderate Concern");
    }

    #[test]
    fn absent_values_serialize_as_null() {
        let posts = vec![located_post("2", None, None)];
        let mut buf = Vec::new();
        write_records(&mut buf, &posts).unwrap();

        let row: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(row["detected_location"].is_null());
        assert!(row["latitude"].is_null());
        assert!(row["longitude"].is_null());
        // Column presence is fixed even when absent.
        assert!(row.as_object().unwrap().contains_key("latitude"));
    }

    #[test]
    fn one_line_per_record() {
        let posts = vec![
            located_post("1", None, None),
            located_post("2", None, None),
            located_post("3", None, None),
        ];
        let mut buf = Vec::new();
        write_records(&mut buf, &posts).unwrap();
        assert_eq!(buf.iter().filter(|b| **b == b'\n').count(), 3);
    }

    #[test]
    fn aggregate_round_trips_through_export() {
        let aggregate = Aggregate {
            heatmap_points: vec![GeoPoint { lat: 48.86, lng: 2.35 }],
            top_locations: vec![LocationCount {
                name: "Paris".to_string(),
                count: 1,
            }],
        };
        let mut buf = Vec::new();
        write_aggregate(&mut buf, &aggregate).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["top_locations"][0]["name"], "Paris");
        assert_eq!(parsed["heatmap_points"][0]["lat"], 48.86);
    }
}
