use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{BirthplaceLookup, EntityFactSource};
use crate::error::LookupError;

pub const DEFAULT_WIKIDATA_URL: &str = "https://www.wikidata.org";
/// Wikidata property "place of birth".
pub const PLACE_OF_BIRTH: &str = "P19";

#[derive(Debug, Deserialize)]
struct SearchResp {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct EntityDataResp {
    #[serde(default)]
    entities: HashMap<String, EntityDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct EntityDoc {
    #[serde(default)]
    labels: HashMap<String, LangValue>,
    #[serde(default)]
    claims: HashMap<String, Vec<Statement>>,
}

#[derive(Debug, Deserialize)]
struct LangValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Statement {
    mainsnak: Snak,
}

#[derive(Debug, Deserialize)]
struct Snak {
    #[serde(default)]
    datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
struct DataValue {
    value: serde_json::Value,
}

/// Entity search (`wbsearchentities`) followed by `Special:EntityData`.
pub struct WikidataClient {
    http: Client,
    base_url: String,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl WikidataClient {
    pub fn new(http: Client, base_url: &str, limiter: Arc<DefaultDirectRateLimiter>) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), limiter }
    }

    async fn search_entity(&self, name: &str) -> Result<Option<String>, LookupError> {
        self.limiter.until_ready().await;
        let resp = self
            .http
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "wbsearchentities"),
                ("language", "en"),
                ("format", "json"),
                ("search", name),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResp>()
            .await?;
        Ok(resp.search.into_iter().next().map(|hit| hit.id))
    }

    async fn entity(&self, id: &str) -> Result<EntityDoc, LookupError> {
        self.limiter.until_ready().await;
        let mut resp = self
            .http
            .get(format!("{}/wiki/Special:EntityData/{id}.json", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<EntityDataResp>()
            .await?;
        // redirected ids come back under their new key
        match resp.entities.remove(id) {
            Some(doc) => Ok(doc),
            None => resp
                .entities
                .into_values()
                .next()
                .ok_or_else(|| LookupError::Malformed(format!("entity {id} missing from response"))),
        }
    }

    async fn resolve_place(&self, value: &serde_json::Value) -> Result<Option<String>, LookupError> {
        if let Some(id) = value.get("id").and_then(|v| v.as_str()) {
            let place = self.entity(id).await?;
            return Ok(Some(place.labels.get("en").map(|l| l.value.clone()).unwrap_or_else(|| id.to_string())));
        }
        let text = value.get("text").and_then(|v| v.as_str()).or_else(|| value.as_str());
        Ok(text.map(str::to_string))
    }
}

#[async_trait]
impl EntityFactSource for WikidataClient {
    async fn birthplace(&self, person: &str) -> Result<BirthplaceLookup, LookupError> {
        let Some(id) = self.search_entity(person).await? else {
            return Ok(BirthplaceLookup::EntityNotFound);
        };
        debug!(person, id = %id, "resolved wikidata entity");

        let doc = self.entity(&id).await?;
        let value = doc
            .claims
            .get(PLACE_OF_BIRTH)
            .and_then(|statements| statements.first())
            .and_then(|s| s.mainsnak.datavalue.as_ref())
            .map(|dv| &dv.value);
        let Some(value) = value else {
            return Ok(BirthplaceLookup::NoBirthplace);
        };

        Ok(match self.resolve_place(value).await? {
            Some(place) => BirthplaceLookup::Found(place),
            None => BirthplaceLookup::NoBirthplace,
        })
    }
}
