use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{Prediction, TextClassifier, MODEL_FILE, VECTORIZER_FILE};
use crate::error::ModelError;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern compiles"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    #[serde(rename = "none")]
    Unnormalized,
}

fn yes() -> bool {
    true
}

fn unigrams() -> (usize, usize) {
    (1, 1)
}

/// TF-IDF weights over a fixed vocabulary, laid out like a fitted
/// scikit-learn `TfidfVectorizer` exported to JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "yes")]
    pub lowercase: bool,
    #[serde(default)]
    pub stop_words: HashSet<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "unigrams")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub norm: Norm,
}

impl TfidfVectorizer {
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(ModelError::Mismatch(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            return Err(ModelError::Mismatch(format!("term {term:?} maps to out-of-range column {idx}")));
        }
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(ModelError::Mismatch(format!("invalid ngram range ({lo}, {hi})")));
        }
        Ok(())
    }

    /// Sparse (column, weight) pairs, sorted by column.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let text = if self.lowercase { text.to_lowercase() } else { text.to_string() };
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (lo, hi) = self.ngram_range;
        for n in lo..=hi {
            for window in tokens.windows(n) {
                if let Some(&col) = self.vocabulary.get(&window.join(" ")) {
                    *counts.entry(col).or_default() += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf[col])
            })
            .collect();
        features.sort_by_key(|(col, _)| *col);

        if self.norm == Norm::L2 {
            let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                features.iter_mut().for_each(|(_, w)| *w /= norm);
            }
        }
        features
    }
}

/// Linear decision function. Binary models carry one coefficient row that
/// scores `classes[1]`; multi-class models carry one row per class.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearModel {
    fn validate(&self, dimension: usize) -> Result<(), ModelError> {
        let rows = if self.classes.len() == 2 { 1 } else { self.classes.len() };
        if self.classes.len() < 2 {
            return Err(ModelError::Mismatch(format!("need at least 2 classes, got {}", self.classes.len())));
        }
        if self.coef.len() != rows || self.intercept.len() != rows {
            return Err(ModelError::Mismatch(format!(
                "{} classes need {rows} coefficient rows and intercepts, got {} and {}",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            )));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != dimension) {
            return Err(ModelError::Mismatch(format!(
                "coefficient row has {} columns but the vectorizer produces {dimension}",
                row.len()
            )));
        }
        Ok(())
    }

    fn scores(&self, features: &[(usize, f64)]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| features.iter().map(|(col, w)| row[*col] * w).sum::<f64>() + b)
            .collect()
    }

    pub fn predict(&self, features: &[(usize, f64)]) -> Result<Prediction, ModelError> {
        let scores = self.scores(features);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ModelError::Inference("non-finite decision score".into()));
        }

        if let &[score] = scores.as_slice() {
            let p = sigmoid(score);
            let (idx, confidence) = if score > 0.0 { (1, p) } else { (0, 1.0 - p) };
            return Ok(Prediction { label: self.classes[idx].clone(), confidence });
        }

        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        let (idx, best) = exp
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .ok_or_else(|| ModelError::Inference("empty score vector".into()))?;
        Ok(Prediction { label: self.classes[idx].clone(), confidence: best / total })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Parse { path: path.to_path_buf(), source })
}

/// Vectorizer and model, loaded and validated together.
#[derive(Debug, Clone)]
pub struct ArtifactPair {
    pub vectorizer: TfidfVectorizer,
    pub model: LinearModel,
}

impl ArtifactPair {
    pub fn new(vectorizer: TfidfVectorizer, model: LinearModel) -> Result<Self, ModelError> {
        vectorizer.validate()?;
        model.validate(vectorizer.dimension())?;
        Ok(Self { vectorizer, model })
    }

    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let vectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
        let model = read_json(&dir.join(MODEL_FILE))?;
        Self::new(vectorizer, model)
    }
}

impl TextClassifier for ArtifactPair {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError> {
        let features = self.vectorizer.transform(text);
        self.model.predict(&features)
    }
}
