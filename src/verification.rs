use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::{stream, StreamExt};
use tracing::{debug, info};

use crate::arbiter::{arbitrate, ModelSignal, Signals};
use crate::classifier::ClassifierService;
use crate::config::Settings;
use crate::extraction::EntityExtractor;
use crate::factcheck::fact_check_links;
use crate::knowledge::{
    http_client, rate_limiter, ContradictionRules, KnowledgeBaseVerifier, WikidataClient, WikipediaClient,
};
use crate::nlp::{Annotator, LexiconAnnotator};
use crate::redflags::RedFlagDetector;
use crate::scoring::quality_metrics;
use crate::types::{ClassifierOutcome, VerificationResult};

/// Persons and locations considered for entity-fact checks, each.
pub const MAX_ENTITIES_PER_KIND: usize = 3;

/// End-to-end pipeline: local signals, concurrent knowledge-base checks,
/// arbitration.
pub struct Verifier {
    detector: RedFlagDetector,
    annotator: Arc<dyn Annotator>,
    extractor: EntityExtractor,
    classifier: ClassifierService,
    kb: KnowledgeBaseVerifier,
    entity_concurrency: usize,
}

impl Verifier {
    pub fn new(
        detector: RedFlagDetector,
        annotator: Arc<dyn Annotator>,
        classifier: ClassifierService,
        kb: KnowledgeBaseVerifier,
        entity_concurrency: usize,
    ) -> Self {
        Self {
            detector,
            extractor: EntityExtractor::new(annotator.clone()),
            annotator,
            classifier,
            kb,
            entity_concurrency: entity_concurrency.max(1),
        }
    }

    /// Production wiring: lexicon annotator, Wikidata/Wikipedia clients sharing
    /// one rate limiter, classifier artifacts from `settings.model_dir`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let annotator: Arc<dyn Annotator> = Arc::new(LexiconAnnotator::new());
        let detector = RedFlagDetector::new(settings.red_flags.clone(), annotator.clone())?;
        let rules = ContradictionRules::compile(&settings.contradiction_rules)?;

        let http = http_client(&settings.user_agent, settings.lookup_timeout()).context("building HTTP client")?;
        let limiter = rate_limiter(settings.requests_per_second);
        let kb = KnowledgeBaseVerifier::new(
            Arc::new(WikidataClient::new(http.clone(), &settings.wikidata_url, limiter.clone())),
            Arc::new(WikipediaClient::new(http, &settings.wikipedia_url, limiter)),
            rules,
        );

        let classifier = ClassifierService::load(&settings.model_dir);
        Ok(Self::new(detector, annotator, classifier, kb, settings.entity_concurrency))
    }

    pub fn classifier(&self) -> &ClassifierService {
        &self.classifier
    }

    /// Never fails: every producer folds its own errors into a fallback.
    pub async fn verify(&self, text: &str) -> VerificationResult {
        let red_flags = self.detector.detect(text);
        let entities = self.extractor.extract(text);
        let (model, classifier) = if self.classifier.is_loaded() {
            let outcome = self.classifier.classify(text);
            (ModelSignal::Outcome(outcome), outcome)
        } else {
            (ModelSignal::Unloaded, ClassifierOutcome::error())
        };

        let pairs: Vec<(String, String)> = entities
            .persons
            .iter()
            .take(MAX_ENTITIES_PER_KIND)
            .flat_map(|p| entities.locations.iter().take(MAX_ENTITIES_PER_KIND).map(move |l| (p.clone(), l.clone())))
            .collect();
        debug!(pairs = pairs.len(), "checking entity pairs");

        let fact_check_links: BTreeMap<_, _> = pairs
            .iter()
            .map(|(person, location)| {
                let claim = format!("{person} {location}");
                let links = fact_check_links(&claim);
                (claim, links)
            })
            .collect();

        let kb = &self.kb;
        let entity_checks = stream::iter(pairs)
            .map(move |(person, location)| async move { kb.check_entity(&person, &location).await })
            .buffered(self.entity_concurrency)
            .collect::<Vec<_>>();
        let (claim_search, entity_verification) = tokio::join!(kb.check_claim(text), entity_checks);

        let ruling = arbitrate(&Signals { red_flag_count: red_flags.count(), model, claim_search: claim_search.clone() });

        let sentences = self.annotator.sentences(text);
        let quality_metrics = quality_metrics(
            text,
            &sentences,
            entities.persons.len(),
            entities.locations.len(),
            self.annotator.polarity(text),
        );

        info!(
            verdict = %ruling.verdict,
            red_flags = red_flags.count(),
            entity_checks = entity_verification.len(),
            claim_search = ?claim_search.status,
            "verified text"
        );

        VerificationResult {
            text: text.to_string(),
            verdict: ruling.verdict,
            reason: ruling.reason,
            red_flags,
            entity_verification,
            fact_check_links,
            quality_metrics,
            classifier,
            claim_search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Prediction, TextClassifier};
    use crate::error::{LookupError, ModelError};
    use crate::knowledge::{BirthplaceLookup, ClaimSearchSource, EntityFactSource, PageIntro};
    use crate::nlp::{Entity, EntityKind, Token};
    use crate::redflags::RedFlagRules;
    use crate::types::{ClaimStatus, ClassifierLabel, Verdict};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedModel(&'static str, f64);

    impl TextClassifier for FixedModel {
        fn predict(&self, _text: &str) -> Result<Prediction, ModelError> {
            Ok(Prediction { label: self.0.to_string(), confidence: self.1 })
        }
    }

    struct Births {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EntityFactSource for Births {
        async fn birthplace(&self, person: &str) -> Result<BirthplaceLookup, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match person {
                "Barack Obama" => BirthplaceLookup::Found("Honolulu".into()),
                _ => BirthplaceLookup::EntityNotFound,
            })
        }
    }

    struct Search {
        page: Option<PageIntro>,
        timed_out: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClaimSearchSource for Search {
        async fn top_intro(&self, _query: &str) -> Result<Option<PageIntro>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.timed_out {
                return Err(LookupError::Timeout);
            }
            Ok(self.page.clone())
        }
    }

    /// Returns a fixed entity list regardless of the text.
    struct FixedEntities(Vec<Entity>);

    impl Annotator for FixedEntities {
        fn sentences(&self, text: &str) -> Vec<String> {
            LexiconAnnotator.sentences(text)
        }
        fn tag(&self, sentence: &str) -> Vec<Token> {
            LexiconAnnotator.tag(sentence)
        }
        fn entities(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
            Ok(self.0.clone())
        }
        fn polarity(&self, _text: &str) -> f64 {
            0.0
        }
    }

    struct Harness {
        verifier: Verifier,
        births: Arc<Births>,
        search: Arc<Search>,
    }

    fn harness(
        annotator: Arc<dyn Annotator>,
        classifier: ClassifierService,
        page: Option<PageIntro>,
        search_timed_out: bool,
    ) -> Harness {
        let births = Arc::new(Births { calls: AtomicUsize::new(0) });
        let search = Arc::new(Search { page, timed_out: search_timed_out, calls: AtomicUsize::new(0) });
        let kb = KnowledgeBaseVerifier::new(births.clone(), search.clone(), ContradictionRules::default());
        let detector = RedFlagDetector::new(RedFlagRules::default(), annotator.clone()).unwrap();
        Harness { verifier: Verifier::new(detector, annotator, classifier, kb, 4), births, search }
    }

    fn lexicon() -> Arc<dyn Annotator> {
        Arc::new(LexiconAnnotator::new())
    }

    fn model(label: &'static str, confidence: f64) -> ClassifierService {
        ClassifierService::with_model(Arc::new(FixedModel(label, confidence)))
    }

    fn assert_send<F: std::future::Future + Send>(_: F) {}

    #[test]
    fn verify_future_is_send() {
        let h = harness(lexicon(), ClassifierService::unloaded(), None, false);
        assert_send(h.verifier.verify(""));
    }

    #[tokio::test]
    async fn sensational_headline_without_model_is_fake() {
        let h = harness(lexicon(), ClassifierService::unloaded(), None, false);
        let r = h.verifier.verify("BREAKING!!! You won't believe this SHOCKING secret").await;
        assert_eq!(r.verdict, Verdict::Fake);
        assert!(r.red_flags.count() >= 2);
        assert!(r.reason.contains("not loaded"));
        assert_eq!(r.classifier, ClassifierOutcome::error());
    }

    #[tokio::test]
    async fn confirmed_real_keeps_verdict_and_appends_reason() {
        let text = "The city council approved the new budget on Tuesday.";
        let page = PageIntro {
            title: "City budget".into(),
            extract: format!("Background. {text} It passed unanimously."),
        };
        let h = harness(lexicon(), model("REAL", 0.9), Some(page), false);
        let r = h.verifier.verify(text).await;
        assert_eq!(r.red_flags.count(), 0, "{:?}", r.red_flags);
        assert_eq!(r.verdict, Verdict::Real);
        assert_eq!(
            r.reason,
            "ML model suggests REAL with 90% confidence. claim found in the introduction of 'City budget'"
        );
        assert_eq!(r.claim_search.status, ClaimStatus::Confirmed);
    }

    #[tokio::test]
    async fn search_timeout_still_checks_entities() {
        let h = harness(lexicon(), model("REAL", 0.8), None, true);
        let r = h.verifier.verify("Barack Obama was born in Kenya.").await;

        assert_eq!(r.claim_search.reason, "Wikipedia lookup timed out");
        assert_eq!(r.entity_verification.len(), 1);
        assert_eq!(r.entity_verification[0].status, ClaimStatus::Contradicted);
        assert!(r.fact_check_links.contains_key("Barack Obama Kenya"));
        assert_eq!(r.verdict, Verdict::Real);
        assert_eq!(r.reason, "ML model suggests REAL with 80% confidence. Wikipedia lookup timed out");
    }

    #[tokio::test]
    async fn empty_input_completes() {
        let h = harness(lexicon(), ClassifierService::unloaded(), None, false);
        let r = h.verifier.verify("").await;
        assert!(r.red_flags.poor_grammar);
        assert!(r.entity_verification.is_empty());
        assert!(r.fact_check_links.is_empty());
        assert_eq!(r.quality_metrics.word_count, 0);
        assert_eq!(r.quality_metrics.avg_sentence_length, 0.0);
        assert_eq!(r.verdict, Verdict::Fake);
        assert_eq!(h.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn entity_pairs_are_capped_and_ordered() {
        let mut entities = Vec::new();
        for name in ["P1", "P2", "P3", "P4"] {
            entities.push(Entity { text: name.into(), kind: EntityKind::Person });
        }
        for name in ["L1", "L2", "L3", "L4"] {
            entities.push(Entity { text: name.into(), kind: EntityKind::Location });
        }
        let h = harness(Arc::new(FixedEntities(entities)), model("FAKE", 0.6), None, false);
        let r = h.verifier.verify("Some text about people and places.").await;

        let pairs: Vec<_> = r.entity_verification.iter().map(|v| format!("{} {}", v.person, v.location)).collect();
        assert_eq!(pairs, ["P1 L1", "P1 L2", "P1 L3", "P2 L1", "P2 L2", "P2 L3", "P3 L1", "P3 L2", "P3 L3"]);
        assert_eq!(r.fact_check_links.len(), 9);
        assert_eq!(h.births.calls.load(Ordering::SeqCst), 9);
        assert!(r.quality_metrics.proper_nouns == 4 && r.quality_metrics.locations == 4);
    }

    #[tokio::test]
    async fn contradiction_overrides_real_model() {
        let page = PageIntro {
            title: "Barack Obama".into(),
            extract: "Barack Obama is an American politician born in Honolulu, Hawaii.".into(),
        };
        let h = harness(lexicon(), model("REAL", 0.99), Some(page), false);
        let r = h.verifier.verify("Obama is secretly Kenyan").await;
        assert_eq!(r.verdict, Verdict::Fake);
        assert!(r.reason.starts_with("Wikipedia fact-check strongly contradicted the claim:"));
        assert_eq!(r.classifier.label, ClassifierLabel::Real);
    }
}
