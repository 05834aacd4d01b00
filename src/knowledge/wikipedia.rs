use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::Client;
use serde::Deserialize;

use super::{ClaimSearchSource, PageIntro};
use crate::error::LookupError;

pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org";

#[derive(Debug, Deserialize)]
struct SearchResp {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResp {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: Option<String>,
}

/// Full-text search for the best title, then its plain-text introduction.
pub struct WikipediaClient {
    http: Client,
    base_url: String,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl WikipediaClient {
    pub fn new(http: Client, base_url: &str, limiter: Arc<DefaultDirectRateLimiter>) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), limiter }
    }

    fn api(&self) -> String {
        format!("{}/w/api.php", self.base_url)
    }

    async fn top_title(&self, query: &str) -> Result<Option<String>, LookupError> {
        self.limiter.until_ready().await;
        let resp = self
            .http
            .get(self.api())
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srlimit", "1"),
                ("format", "json"),
                ("srsearch", query),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResp>()
            .await?;
        Ok(resp.query.and_then(|q| q.search.into_iter().next()).map(|item| item.title))
    }

    async fn intro(&self, title: &str) -> Result<Option<PageIntro>, LookupError> {
        self.limiter.until_ready().await;
        let resp = self
            .http
            .get(self.api())
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("titles", title),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<ExtractResp>()
            .await?;
        let page = resp.query.and_then(|q| q.pages.into_values().next());
        Ok(page.and_then(|p| p.extract.map(|extract| PageIntro { title: p.title, extract })))
    }
}

#[async_trait]
impl ClaimSearchSource for WikipediaClient {
    async fn top_intro(&self, query: &str) -> Result<Option<PageIntro>, LookupError> {
        match self.top_title(query).await? {
            Some(title) => self.intro(&title).await,
            None => Ok(None),
        }
    }
}
