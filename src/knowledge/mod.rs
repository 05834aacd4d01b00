//! Cross-checks against external knowledge sources.
//!
//! Two sub-checks, each folding every failure into an "unknown" outcome.
//! Every HTTP call is bounded by the client timeout from [`http_client`];
//! time spent waiting on the shared rate limiter is not.
//!
//! * entity-fact check: does the person's recorded birthplace match the
//!   location mentioned alongside them?
//! * claim search: does the top encyclopedia article confirm the text
//!   verbatim, or trip one of the contradiction rules?

mod rules;
mod wikidata;
mod wikipedia;

pub use rules::{default_rules, ContradictionRule, ContradictionRules};
pub use wikidata::{WikidataClient, DEFAULT_WIKIDATA_URL, PLACE_OF_BIRTH};
pub use wikipedia::{WikipediaClient, DEFAULT_WIKIPEDIA_URL};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use tracing::warn;

use crate::error::LookupError;
use crate::segments::truncate_chars;
use crate::types::{ClaimCheck, ClaimStatus, ClaimVerification};

/// The search endpoint rejects longer `srsearch` values.
pub const MAX_QUERY_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthplaceLookup {
    EntityNotFound,
    NoBirthplace,
    Found(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIntro {
    pub title: String,
    pub extract: String,
}

#[async_trait]
pub trait EntityFactSource: Send + Sync {
    async fn birthplace(&self, person: &str) -> Result<BirthplaceLookup, LookupError>;
}

#[async_trait]
pub trait ClaimSearchSource: Send + Sync {
    async fn top_intro(&self, query: &str) -> Result<Option<PageIntro>, LookupError>;
}

pub fn http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(user_agent).timeout(timeout).build()
}

pub fn rate_limiter(requests_per_second: u32) -> Arc<DefaultDirectRateLimiter> {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

pub struct KnowledgeBaseVerifier {
    facts: Arc<dyn EntityFactSource>,
    search: Arc<dyn ClaimSearchSource>,
    rules: ContradictionRules,
}

impl KnowledgeBaseVerifier {
    pub fn new(
        facts: Arc<dyn EntityFactSource>,
        search: Arc<dyn ClaimSearchSource>,
        rules: ContradictionRules,
    ) -> Self {
        Self { facts, search, rules }
    }

    pub async fn check_entity(&self, person: &str, location: &str) -> ClaimVerification {
        let (status, reason) = match self.facts.birthplace(person).await {
            Ok(BirthplaceLookup::Found(place)) if place.to_lowercase().contains(&location.to_lowercase()) => {
                (ClaimStatus::Confirmed, format!("Birthplace confirmed as {place}"))
            }
            Ok(BirthplaceLookup::Found(place)) => {
                (ClaimStatus::Contradicted, format!("Birthplace is {place} (claimed: {location})"))
            }
            Ok(BirthplaceLookup::EntityNotFound) => (ClaimStatus::Unknown, "Entity not found in Wikidata".to_string()),
            Ok(BirthplaceLookup::NoBirthplace) => {
                (ClaimStatus::Unknown, "No relevant data found in Wikidata".to_string())
            }
            Err(e) => {
                warn!(person, location, error = %e, "entity-fact lookup failed");
                (ClaimStatus::Unknown, "Verification service unavailable".to_string())
            }
        };
        ClaimVerification { person: person.to_string(), location: location.to_string(), status, reason }
    }

    /// Claim search with the failure left explicit.
    pub async fn search_claim(&self, claim: &str) -> Result<ClaimCheck, LookupError> {
        let claim = claim.trim();
        if claim.is_empty() {
            return Ok(ClaimCheck::unknown("No text to search for"));
        }

        let query = truncate_chars(claim, MAX_QUERY_CHARS);
        let Some(page) = self.search.top_intro(query).await? else {
            return Ok(ClaimCheck::unknown("No matching Wikipedia article found"));
        };

        if page.extract.to_lowercase().contains(&claim.to_lowercase()) {
            return Ok(ClaimCheck {
                status: ClaimStatus::Confirmed,
                reason: format!("claim found in the introduction of '{}'", page.title),
            });
        }
        if let Some(rule) = self.rules.first_match(claim, &page.extract) {
            return Ok(ClaimCheck {
                status: ClaimStatus::Contradicted,
                reason: format!("{} (rule {}, article '{}')", rule.reason, rule.name, page.title),
            });
        }
        Ok(ClaimCheck::unknown(format!(
            "Wikipedia article '{}' neither confirms nor contradicts the claim",
            page.title
        )))
    }

    pub async fn check_claim(&self, claim: &str) -> ClaimCheck {
        match self.search_claim(claim).await {
            Ok(check) => check,
            Err(LookupError::Timeout) => {
                warn!("claim search timed out");
                ClaimCheck::unknown("Wikipedia lookup timed out")
            }
            Err(e) => {
                warn!(error = %e, "claim search failed");
                ClaimCheck::unknown("Wikipedia service unavailable")
            }
        }
    }
}
