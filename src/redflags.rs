use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::nlp::{Annotator, Pos};
use crate::types::RedFlagSet;

/// Word lists and thresholds behind the four red-flag checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlagRules {
    pub sensational_terms: Vec<String>,
    pub unreliable_domains: Vec<String>,
    pub clickbait_phrases: Vec<String>,
    pub min_caps_run: usize,
    pub min_exclamations: usize,
    /// Sentences with fewer NOUN/VERB tokens than this count as malformed.
    pub min_content_tokens: usize,
    pub max_malformed_ratio: f64,
}

impl Default for RedFlagRules {
    fn default() -> Self {
        let owned = |xs: &[&str]| -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() };
        Self {
            sensational_terms: owned(&[
                "urgent",
                "breaking",
                "shocking",
                "exposed",
                "secret",
                "exclusive",
                "revealed",
                "they don't want you to know",
                "hidden truth",
                "mainstream media won't tell you",
                "you won't believe",
                "you'll never guess",
                "this is unbelievable",
                "this will change everything",
            ]),
            unreliable_domains: owned(&[
                "infowars.com",
                "naturalnews.com",
                "beforeitsnews.com",
                "yournewswire.com",
                "worldtruth.tv",
                "thegatewaypundit.com",
            ]),
            clickbait_phrases: owned(&[
                "you won't believe",
                "what happened next",
                "doctors hate this",
                "this one trick",
                "the reason will shock you",
                "this is why",
                "find out why",
                "the shocking truth about",
            ]),
            min_caps_run: 10,
            min_exclamations: 3,
            min_content_tokens: 2,
            max_malformed_ratio: 0.4,
        }
    }
}

pub struct RedFlagDetector {
    rules: RedFlagRules,
    sensational: Option<Regex>,
    exclamations: Regex,
    caps_run: Regex,
    annotator: Arc<dyn Annotator>,
}

impl RedFlagDetector {
    pub fn new(rules: RedFlagRules, annotator: Arc<dyn Annotator>) -> Result<Self, ConfigError> {
        let sensational = if rules.sensational_terms.is_empty() {
            None
        } else {
            let alternation = rules
                .sensational_terms
                .iter()
                .map(|t| regex::escape(&normalize(t)))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b")).map_err(invalid("sensational_terms"))?)
        };
        let exclamations = Regex::new(&format!("(?:! ){{{},}}", rules.min_exclamations.max(1)))
            .map_err(invalid("min_exclamations"))?;
        let caps_run =
            Regex::new(&format!("[A-Z]{{{},}}", rules.min_caps_run.max(1))).map_err(invalid("min_caps_run"))?;

        Ok(Self { rules, sensational, exclamations, caps_run, annotator })
    }

    pub fn with_defaults(annotator: Arc<dyn Annotator>) -> Self {
        Self::new(RedFlagRules::default(), annotator).expect("default red-flag rules compile")
    }

    pub fn detect(&self, text: &str) -> RedFlagSet {
        let lowered = normalize(text);
        RedFlagSet {
            sensational_language: self.sensational_language(text, &lowered),
            unreliable_source: self.rules.unreliable_domains.iter().any(|d| lowered.contains(&normalize(d))),
            clickbait_phrases: self.rules.clickbait_phrases.iter().any(|p| lowered.contains(&normalize(p))),
            poor_grammar: self.poor_grammar(text),
        }
    }

    fn sensational_language(&self, text: &str, lowered: &str) -> bool {
        self.sensational.as_ref().is_some_and(|re| re.is_match(lowered))
            || self.exclamations.is_match(text)
            || self.caps_run.is_match(text)
    }

    /// Fails closed: text without any sentence is flagged.
    fn poor_grammar(&self, text: &str) -> bool {
        let sentences = self.annotator.sentences(text);
        if sentences.is_empty() {
            return true;
        }
        let malformed = sentences
            .iter()
            .filter(|s| {
                let content = self
                    .annotator
                    .tag(s)
                    .iter()
                    .filter(|t| matches!(t.pos, Pos::Noun | Pos::Verb))
                    .count();
                content < self.rules.min_content_tokens
            })
            .count();
        malformed as f64 / sentences.len() as f64 > self.rules.max_malformed_ratio
    }
}

fn invalid(rule: &'static str) -> impl FnOnce(regex::Error) -> ConfigError {
    move |source| ConfigError::InvalidPattern { rule: rule.to_string(), source }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}
