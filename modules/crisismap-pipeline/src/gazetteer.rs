//! Built-in gazetteer entity recognizer.
//!
//! Stand-in for the external NER collaborator behind the
//! `EntityRecognizer` contract. Scans the text for known place names and
//! reports them in order of appearance, which is the order the extractor
//! relies on. Matches are token-bounded so "paris" is not found inside
//! "comparison".

use anyhow::Result;

use crate::traits::{Entity, EntityKind, EntityRecognizer};

/// Default place list: (match key, entity kind). Keys are lowercase; the
/// matched span is reported with the key's casing, which suits the
/// pipeline since extraction runs on already-lowercased clean text.
const DEFAULT_PLACES: &[(&str, EntityKind)] = &[
    ("new york", EntityKind::Gpe),
    ("los angeles", EntityKind::Gpe),
    ("san francisco", EntityKind::Gpe),
    ("chicago", EntityKind::Gpe),
    ("seattle", EntityKind::Gpe),
    ("boston", EntityKind::Gpe),
    ("austin", EntityKind::Gpe),
    ("denver", EntityKind::Gpe),
    ("minneapolis", EntityKind::Gpe),
    ("portland", EntityKind::Gpe),
    ("london", EntityKind::Gpe),
    ("paris", EntityKind::Gpe),
    ("berlin", EntityKind::Gpe),
    ("dublin", EntityKind::Gpe),
    ("toronto", EntityKind::Gpe),
    ("vancouver", EntityKind::Gpe),
    ("sydney", EntityKind::Gpe),
    ("melbourne", EntityKind::Gpe),
    ("mumbai", EntityKind::Gpe),
    ("delhi", EntityKind::Gpe),
    ("tokyo", EntityKind::Gpe),
    ("california", EntityKind::Gpe),
    ("texas", EntityKind::Gpe),
    ("ohio", EntityKind::Gpe),
    ("florida", EntityKind::Gpe),
    ("scotland", EntityKind::Gpe),
    ("ireland", EntityKind::Gpe),
    ("australia", EntityKind::Gpe),
    ("canada", EntityKind::Gpe),
    ("india", EntityKind::Gpe),
    ("midwest", EntityKind::Loc),
    ("appalachia", EntityKind::Loc),
    ("rockies", EntityKind::Loc),
    ("great lakes", EntityKind::Loc),
];

/// Dictionary-backed recognizer over a fixed place list.
#[derive(Debug, Clone)]
pub struct GazetteerRecognizer {
    places: Vec<(String, EntityKind)>,
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self {
            places: DEFAULT_PLACES
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        }
    }
}

impl GazetteerRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizer over a custom place list. Names are matched lowercase.
    pub fn with_places(places: Vec<(String, EntityKind)>) -> Self {
        let places = places
            .into_iter()
            .map(|(name, kind)| (name.to_lowercase(), kind))
            .collect();
        Self { places }
    }
}

/// Byte offset of the first token-bounded occurrence of `needle` in
/// lowercased `haystack`, if any. Boundaries are byte-level checks for
/// ASCII letters, so multibyte neighbors never split a match.
fn find_bounded(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let start = from + rel;
        let end = start + needle.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphabetic();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphabetic();
        if before_ok && after_ok {
            return Some(start);
        }
        from = start + 1;
    }
    None
}

impl EntityRecognizer for GazetteerRecognizer {
    fn entities(&self, text: &str) -> Result<Vec<Entity>> {
        let lower = text.to_lowercase();
        let mut found: Vec<(usize, Entity)> = Vec::new();
        for (name, kind) in &self.places {
            if let Some(pos) = find_bounded(&lower, name) {
                found.push((
                    pos,
                    Entity {
                        text: name.clone(),
                        kind: *kind,
                    },
                ));
            }
        }
        found.sort_by_key(|(pos, _)| *pos);
        Ok(found.into_iter().map(|(_, entity)| entity).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_places_in_text_order() {
        let recognizer = GazetteerRecognizer::new();
        let entities = recognizer
            .entities("moved from london to paris last year")
            .unwrap();
        let names: Vec<&str> = entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(names, vec!["london", "paris"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let recognizer = GazetteerRecognizer::new();
        let entities = recognizer.entities("Struggling here in Chicago").unwrap();
        assert_eq!(entities[0].text, "chicago");
        assert_eq!(entities[0].kind, EntityKind::Gpe);
    }

    #[test]
    fn respects_token_boundaries() {
        let recognizer = GazetteerRecognizer::new();
        // "paris" inside "comparison" must not match.
        assert!(recognizer.entities("no comparison intended").unwrap().is_empty());
    }

    #[test]
    fn multi_word_places_match() {
        let recognizer = GazetteerRecognizer::new();
        let entities = recognizer.entities("lonely nights in new york city").unwrap();
        assert_eq!(entities[0].text, "new york");
    }

    #[test]
    fn no_places_yields_empty() {
        let recognizer = GazetteerRecognizer::new();
        assert!(recognizer.entities("feel lost anxious need help").unwrap().is_empty());
    }
}
