use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Verified,
    PartiallyVerified,
    Fake,
    Real,
    Suspicious,
    Unverified,
}

impl Verdict {
    pub const ALL: [Verdict; 6] = [
        Verdict::Verified,
        Verdict::PartiallyVerified,
        Verdict::Fake,
        Verdict::Real,
        Verdict::Suspicious,
        Verdict::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Verified => "VERIFIED",
            Verdict::PartiallyVerified => "PARTIALLY_VERIFIED",
            Verdict::Fake => "FAKE",
            Verdict::Real => "REAL",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Unverified => "UNVERIFIED",
        }
    }

    pub fn parse(raw: &str) -> Option<Verdict> {
        let raw = raw.trim();
        Verdict::ALL.into_iter().find(|v| v.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagSet {
    pub sensational_language: bool,
    pub unreliable_source: bool,
    pub clickbait_phrases: bool,
    pub poor_grammar: bool,
}

impl RedFlagSet {
    pub fn count(&self) -> usize {
        [
            self.sensational_language,
            self.unreliable_source,
            self.clickbait_phrases,
            self.poor_grammar,
        ]
        .iter()
        .filter(|f| **f)
        .count()
    }

    pub fn any(&self) -> bool {
        self.count() > 0
    }
}

/// Tri-state outcome of checking one claim against a knowledge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Confirmed,
    Contradicted,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerification {
    pub person: String,
    pub location: String,
    pub status: ClaimStatus,
    pub reason: String,
}

impl ClaimVerification {
    pub fn verified(&self) -> bool {
        self.status == ClaimStatus::Confirmed
    }
}

/// Outcome of the whole-document encyclopedic search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCheck {
    pub status: ClaimStatus,
    pub reason: String,
}

impl ClaimCheck {
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self { status: ClaimStatus::Unknown, reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassifierLabel {
    Real,
    Fake,
    Error,
}

impl fmt::Display for ClassifierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClassifierLabel::Real => "REAL",
            ClassifierLabel::Fake => "FAKE",
            ClassifierLabel::Error => "ERROR",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutcome {
    pub label: ClassifierLabel,
    pub confidence: f64, // in [0, 1]
}

impl ClassifierOutcome {
    pub fn error() -> Self {
        Self { label: ClassifierLabel::Error, confidence: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub word_count: usize,
    pub proper_nouns: usize,
    pub locations: usize,
    pub avg_sentence_length: f64,
    pub sentiment: Sentiment,
}

/// source name -> search URL
pub type FactCheckLinks = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub text: String,
    pub verdict: Verdict,
    pub reason: String,
    pub red_flags: RedFlagSet,
    pub entity_verification: Vec<ClaimVerification>,
    pub fact_check_links: BTreeMap<String, FactCheckLinks>, // keyed by "<person> <location>"
    pub quality_metrics: QualityMetrics,
    pub classifier: ClassifierOutcome,
    pub claim_search: ClaimCheck,
}
