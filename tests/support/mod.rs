#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use newsverdict_rs::classifier::{ClassifierService, Prediction, TextClassifier};
use newsverdict_rs::error::{LookupError, ModelError};
use newsverdict_rs::knowledge::{
    BirthplaceLookup, ClaimSearchSource, ContradictionRules, EntityFactSource, KnowledgeBaseVerifier, PageIntro,
};
use newsverdict_rs::nlp::{Annotator, LexiconAnnotator};
use newsverdict_rs::redflags::{RedFlagDetector, RedFlagRules};
use newsverdict_rs::Verifier;

pub struct FixedModel {
    pub label: &'static str,
    pub confidence: f64,
}

impl TextClassifier for FixedModel {
    fn predict(&self, _text: &str) -> Result<Prediction, ModelError> {
        Ok(Prediction { label: self.label.to_string(), confidence: self.confidence })
    }
}

pub fn model(label: &'static str, confidence: f64) -> ClassifierService {
    ClassifierService::with_model(Arc::new(FixedModel { label, confidence }))
}

#[derive(Default)]
pub struct StaticFacts {
    pub births: HashMap<String, String>,
}

#[async_trait]
impl EntityFactSource for StaticFacts {
    async fn birthplace(&self, person: &str) -> Result<BirthplaceLookup, LookupError> {
        Ok(match self.births.get(person) {
            Some(place) => BirthplaceLookup::Found(place.clone()),
            None => BirthplaceLookup::EntityNotFound,
        })
    }
}

pub struct StaticSearch {
    pub page: Option<PageIntro>,
}

#[async_trait]
impl ClaimSearchSource for StaticSearch {
    async fn top_intro(&self, _query: &str) -> Result<Option<PageIntro>, LookupError> {
        Ok(self.page.clone())
    }
}

pub fn verifier(classifier: ClassifierService, page: Option<PageIntro>) -> Verifier {
    let annotator: Arc<dyn Annotator> = Arc::new(LexiconAnnotator::new());
    let facts = StaticFacts {
        births: HashMap::from([("Barack Obama".to_string(), "Honolulu".to_string())]),
    };
    let kb = KnowledgeBaseVerifier::new(
        Arc::new(facts),
        Arc::new(StaticSearch { page }),
        ContradictionRules::default(),
    );
    let detector = RedFlagDetector::new(RedFlagRules::default(), annotator.clone()).unwrap();
    Verifier::new(detector, annotator, classifier, kb, 4)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
