//! Place-name extraction.

use crate::traits::EntityRecognizer;

/// First entity the recognizer tags as a place (Gpe or Loc), in the
/// recognizer's native entity order. No geocoding, no caching, no retry:
/// a recognizer failure or an empty result is absence, not an error.
pub fn extract_place(text: &str, recognizer: &dyn EntityRecognizer) -> Option<String> {
    let entities = match recognizer.entities(text) {
        Ok(entities) => entities,
        Err(err) => {
            tracing::debug!(error = %err, "Entity recognition failed, treating as no location");
            return None;
        }
    };
    entities
        .into_iter()
        .find(|entity| entity.is_place())
        .map(|entity| entity.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRecognizer;
    use crate::traits::{Entity, EntityKind};

    fn entity(text: &str, kind: EntityKind) -> Entity {
        Entity {
            text: text.to_string(),
            kind,
        }
    }

    #[test]
    fn first_place_entity_wins() {
        let recognizer = MockRecognizer::new().on(
            "met friends in paris then london",
            vec![
                entity("friends", EntityKind::Other),
                entity("paris", EntityKind::Gpe),
                entity("london", EntityKind::Gpe),
            ],
        );
        assert_eq!(
            extract_place("met friends in paris then london", &recognizer),
            Some("paris".to_string())
        );
    }

    #[test]
    fn loc_entities_count_as_places() {
        let recognizer = MockRecognizer::new().on(
            "hiking the rockies",
            vec![entity("rockies", EntityKind::Loc)],
        );
        assert_eq!(
            extract_place("hiking the rockies", &recognizer),
            Some("rockies".to_string())
        );
    }

    #[test]
    fn no_place_entities_is_absent() {
        let recognizer = MockRecognizer::new().on(
            "feel lost anxious need help",
            vec![entity("help", EntityKind::Other)],
        );
        assert_eq!(extract_place("feel lost anxious need help", &recognizer), None);
        assert_eq!(extract_place("unregistered text", &recognizer), None);
    }

    #[test]
    fn recognizer_failure_is_absent_not_error() {
        let recognizer = MockRecognizer::failing();
        assert_eq!(extract_place("anything", &recognizer), None);
    }
}
