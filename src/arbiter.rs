//! Verdict arbitration.
//!
//! Precedence, lowest to highest: red flags, classifier, claim search, then
//! the red-flag veto on an unconfirmed REAL. An unloaded classifier short-
//! circuits everything after it so the fallback verdict is stable.

use crate::types::{ClaimCheck, ClaimStatus, ClassifierLabel, ClassifierOutcome, Verdict};

pub const INSUFFICIENT_EVIDENCE: &str = "Insufficient evidence";
pub const MULTIPLE_RED_FLAGS: &str = "Multiple red flags detected";
pub const MODEL_NOT_LOADED: &str = "ML model not loaded, unable to perform robust verification.";
pub const MODEL_FAILED: &str = "ML model prediction failed";
pub const RED_FLAG_VETO: &str =
    "ML model suggested REAL, but multiple red flags detected and no strong external confirmation.";

/// Red-flag count at which the text is treated as fake absent other evidence.
pub const RED_FLAG_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSignal {
    Unloaded,
    Outcome(ClassifierOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub red_flag_count: usize,
    pub model: ModelSignal,
    pub claim_search: ClaimCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruling {
    pub verdict: Verdict,
    pub reason: String,
}

impl Ruling {
    fn set(&mut self, verdict: Verdict, reason: impl Into<String>) {
        self.verdict = verdict;
        self.reason = reason.into();
    }
}

pub fn arbitrate(signals: &Signals) -> Ruling {
    let mut ruling = Ruling { verdict: Verdict::Unverified, reason: INSUFFICIENT_EVIDENCE.to_string() };
    let flagged = signals.red_flag_count >= RED_FLAG_THRESHOLD;

    if flagged {
        ruling.set(Verdict::Fake, MULTIPLE_RED_FLAGS);
    }

    match signals.model {
        ModelSignal::Unloaded => {
            ruling.set(Verdict::Fake, MODEL_NOT_LOADED);
            return ruling;
        }
        ModelSignal::Outcome(ClassifierOutcome { label: ClassifierLabel::Error, .. }) => {
            ruling.set(Verdict::Fake, MODEL_FAILED);
        }
        ModelSignal::Outcome(ClassifierOutcome { label, confidence }) => {
            let verdict = if label == ClassifierLabel::Real { Verdict::Real } else { Verdict::Fake };
            ruling.set(
                verdict,
                format!("ML model suggests {label} with {}% confidence", (confidence * 100.0).round() as i64),
            );
        }
    }

    let check = &signals.claim_search;
    match check.status {
        ClaimStatus::Contradicted => {
            ruling.set(
                Verdict::Fake,
                format!("Wikipedia fact-check strongly contradicted the claim: {}", check.reason),
            );
        }
        ClaimStatus::Confirmed if ruling.verdict == Verdict::Fake => {
            ruling.set(
                Verdict::Real,
                format!("Wikipedia fact-check confirmed the claim, overriding ML: {}", check.reason),
            );
        }
        _ => {
            if !check.reason.is_empty() {
                ruling.reason = format!("{}. {}", ruling.reason, check.reason);
            }
        }
    }

    if flagged && ruling.verdict == Verdict::Real && check.status != ClaimStatus::Confirmed {
        ruling.set(Verdict::Fake, RED_FLAG_VETO);
    }

    ruling
}
