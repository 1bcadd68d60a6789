//! Spatial aggregation.

use crisismap_common::types::{Aggregate, LocatedPost, LocationCount};

/// Summarize a batch of located posts.
///
/// `heatmap_points` keeps the coordinates of every located record in input
/// order with no deduplication — repeated places are density, not noise.
/// `top_locations` counts detected locations among records *with*
/// coordinates only (a detected-but-unresolved location is excluded),
/// sorted by count descending with ties broken by first-seen order, then
/// truncated to `top_n`. A batch with no located records yields an empty
/// aggregate, which is a valid result rather than an error.
pub fn aggregate(records: &[LocatedPost], top_n: usize) -> Aggregate {
    let mut heatmap_points = Vec::new();
    // First-seen insertion order is the tie-break, so counts live in a Vec.
    let mut counts: Vec<LocationCount> = Vec::new();

    for post in records {
        let Some(point) = post.coordinates else {
            continue;
        };
        heatmap_points.push(point);

        let Some(name) = &post.detected_location else {
            continue;
        };
        match counts.iter_mut().find(|entry| &entry.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(LocationCount {
                name: name.clone(),
                count: 1,
            }),
        }
    }

    // Stable sort: equal counts keep first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);

    Aggregate {
        heatmap_points,
        top_locations: counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::located_post;
    use crisismap_common::types::GeoPoint;

    const PARIS: GeoPoint = GeoPoint { lat: 48.86, lng: 2.35 };
    const LONDON: GeoPoint = GeoPoint { lat: 51.51, lng: -0.13 };

    #[test]
    fn empty_batch_yields_empty_aggregate() {
        let result = aggregate(&[], 4);
        assert!(result.is_empty());
    }

    #[test]
    fn unresolved_locations_are_excluded() {
        // Three "Paris" detections, one of which failed to resolve.
        let records = vec![
            located_post("1", Some("Paris"), Some(PARIS)),
            located_post("2", Some("Paris"), Some(PARIS)),
            located_post("3", Some("Paris"), None),
        ];
        let result = aggregate(&records, 4);
        assert_eq!(result.heatmap_points.len(), 2);
        assert_eq!(result.top_locations.len(), 1);
        assert_eq!(result.top_locations[0].name, "Paris");
        assert_eq!(result.top_locations[0].count, 2);
    }

    #[test]
    fn records_without_locations_contribute_nothing() {
        let records = vec![
            located_post("1", None, None),
            located_post("2", Some("Paris"), Some(PARIS)),
        ];
        let result = aggregate(&records, 4);
        assert_eq!(result.heatmap_points, vec![PARIS]);
        assert_eq!(result.top_locations.len(), 1);
    }

    #[test]
    fn heatmap_keeps_duplicates_in_input_order() {
        let records = vec![
            located_post("1", Some("London"), Some(LONDON)),
            located_post("2", Some("Paris"), Some(PARIS)),
            located_post("3", Some("London"), Some(LONDON)),
        ];
        let result = aggregate(&records, 4);
        assert_eq!(result.heatmap_points, vec![LONDON, PARIS, LONDON]);
    }

    #[test]
    fn ties_rank_by_first_seen_order() {
        // A, B, A, B — equal counts, A seen first.
        let records = vec![
            located_post("1", Some("Austin"), Some(GeoPoint { lat: 30.27, lng: -97.74 })),
            located_post("2", Some("Boston"), Some(GeoPoint { lat: 42.36, lng: -71.06 })),
            located_post("3", Some("Austin"), Some(GeoPoint { lat: 30.27, lng: -97.74 })),
            located_post("4", Some("Boston"), Some(GeoPoint { lat: 42.36, lng: -71.06 })),
        ];
        let result = aggregate(&records, 4);
        assert_eq!(result.top_locations[0].name, "Austin");
        assert_eq!(result.top_locations[1].name, "Boston");
        assert_eq!(result.top_locations[0].count, 2);
        assert_eq!(result.top_locations[1].count, 2);
    }

    #[test]
    fn ranking_truncates_to_top_n() {
        let mut records = Vec::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f"].into_iter().enumerate() {
            // Descending counts: "a" ×6 down to "f" ×1.
            for j in 0..(6 - i) {
                records.push(located_post(
                    &format!("{name}-{j}"),
                    Some(name),
                    Some(PARIS),
                ));
            }
        }
        let result = aggregate(&records, 4);
        assert_eq!(result.top_locations.len(), 4);
        let names: Vec<&str> = result.top_locations.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
