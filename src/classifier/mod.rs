mod linear;

pub use linear::{ArtifactPair, LinearModel, Norm, TfidfVectorizer};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::ModelError;
use crate::types::{ClassifierLabel, ClassifierOutcome};

pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const MODEL_FILE: &str = "fake_news_model.json";
pub const METRICS_FILE: &str = "metrics.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

pub trait TextClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError>;
}

#[derive(Debug, Deserialize)]
struct Metrics {
    model_accuracy: f64,
}

/// Process-wide classifier. Built once at start-up; when the artifacts are
/// missing or inconsistent it stays unloaded until restart.
#[derive(Clone)]
pub struct ClassifierService {
    model: Option<Arc<dyn TextClassifier>>,
    accuracy: Option<f64>,
}

impl ClassifierService {
    pub fn load(dir: &Path) -> Self {
        let accuracy = read_accuracy(dir);
        match ArtifactPair::load(dir) {
            Ok(pair) => {
                info!(
                    dir = %dir.display(),
                    features = pair.vectorizer.dimension(),
                    classes = ?pair.model.classes,
                    "loaded classifier artifacts"
                );
                Self { model: Some(Arc::new(pair)), accuracy }
            }
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "model loading failed; classifier disabled");
                Self { model: None, accuracy }
            }
        }
    }

    pub fn with_model(model: Arc<dyn TextClassifier>) -> Self {
        Self { model: Some(model), accuracy: None }
    }

    pub fn unloaded() -> Self {
        Self { model: None, accuracy: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    pub fn classify(&self, text: &str) -> ClassifierOutcome {
        let Some(model) = &self.model else {
            return ClassifierOutcome::error();
        };
        match model.predict(text).and_then(|p| to_outcome(&p)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "ML prediction failed");
                ClassifierOutcome::error()
            }
        }
    }
}

fn to_outcome(p: &Prediction) -> Result<ClassifierOutcome, ModelError> {
    // numeric labels come from the 0 = fake / 1 = real training set
    let label = match p.label.trim().to_uppercase().as_str() {
        "REAL" | "1" => ClassifierLabel::Real,
        "FAKE" | "0" => ClassifierLabel::Fake,
        _ => return Err(ModelError::UnknownLabel(p.label.clone())),
    };
    if !p.confidence.is_finite() {
        return Err(ModelError::Inference(format!("confidence {} is not finite", p.confidence)));
    }
    Ok(ClassifierOutcome { label, confidence: p.confidence.clamp(0.0, 1.0) })
}

fn read_accuracy(dir: &Path) -> Option<f64> {
    let raw = fs::read_to_string(dir.join(METRICS_FILE)).ok()?;
    match serde_json::from_str::<Metrics>(&raw) {
        Ok(m) => Some(m.model_accuracy),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable {METRICS_FILE}");
            None
        }
    }
}
