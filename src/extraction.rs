use std::sync::Arc;

use tracing::{debug, error};

use crate::nlp::{Annotator, EntityKind};

/// Person and location names, in order of first mention, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    pub persons: Vec<String>,
    pub locations: Vec<String>,
}

pub struct EntityExtractor {
    annotator: Arc<dyn Annotator>,
}

impl EntityExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }

    /// Annotator failures are logged and leave both lists empty.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let entities = match self.annotator.entities(text) {
            Ok(entities) => entities,
            Err(e) => {
                error!(error = %e, "entity extraction failed");
                return ExtractedEntities::default();
            }
        };

        let mut out = ExtractedEntities::default();
        for entity in entities {
            let bucket = match entity.kind {
                EntityKind::Person => &mut out.persons,
                EntityKind::Location => &mut out.locations,
            };
            if !bucket.contains(&entity.text) {
                bucket.push(entity.text);
            }
        }
        debug!(persons = ?out.persons, locations = ?out.locations, "extracted entities");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Entity, LexiconAnnotator, Token};

    struct Broken;

    impl Annotator for Broken {
        fn sentences(&self, _text: &str) -> Vec<String> {
            Vec::new()
        }
        fn tag(&self, _sentence: &str) -> Vec<Token> {
            Vec::new()
        }
        fn entities(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
            anyhow::bail!("model missing")
        }
        fn polarity(&self, _text: &str) -> f64 {
            0.0
        }
    }

    #[test]
    fn splits_people_from_places() {
        let x = EntityExtractor::new(Arc::new(LexiconAnnotator::new()));
        let e = x.extract("Barack Obama was born in Kenya, according to a post shared in Texas.");
        assert_eq!(e.persons, vec!["Barack Obama"]);
        assert_eq!(e.locations, vec!["Kenya", "Texas"]);
    }

    #[test]
    fn repeated_mentions_collapse() {
        let x = EntityExtractor::new(Arc::new(LexiconAnnotator::new()));
        let e = x.extract("Angela Merkel visited Paris. Angela Merkel then left Paris.");
        assert_eq!(e.persons, vec!["Angela Merkel"]);
        assert_eq!(e.locations, vec!["Paris"]);
    }

    #[test]
    fn annotator_failure_yields_empty_lists() {
        let x = EntityExtractor::new(Arc::new(Broken));
        assert_eq!(x.extract("Barack Obama in Paris"), ExtractedEntities::default());
    }

    #[test]
    fn empty_text_has_no_entities() {
        let x = EntityExtractor::new(Arc::new(LexiconAnnotator::new()));
        assert_eq!(x.extract(""), ExtractedEntities::default());
    }
}
