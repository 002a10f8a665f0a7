//! Search enrichment via SerpApi related searches
//!
//! Best effort only: a provider outage must never block report delivery.
//! `SerpClient` maps non-success statuses to an empty list itself; `enrich`
//! additionally swallows transport and decode failures.

use crate::config::SerpConfig;
use crate::gemini::describe;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Search provider errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("SerpApi request failed: {0}")]
    Transport(String),

    #[error("SerpApi response is not valid JSON: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Transport(describe(e))
    }
}

/// Search backend abstraction so enrichment can be tested without network
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Related search phrases for `query`
    async fn related_searches(&self, query: &str) -> Result<Vec<String>, SearchError>;
}

/// HTTP client for SerpApi
pub struct SerpClient {
    http: reqwest::Client,
    base_url: String,
    engine: String,
    api_key: String,
    max_related: usize,
}

impl SerpClient {
    pub fn new(http: reqwest::Client, config: &SerpConfig, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            engine: config.engine.clone(),
            api_key: api_key.into(),
            max_related: config.max_related,
        }
    }
}

#[async_trait]
impl SearchBackend for SerpClient {
    async fn related_searches(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self
            .http
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("SerpApi returned {}, continuing without related searches", response.status());
            return Ok(vec![]);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(describe(e)))?;

        let related = parse_related(&json, self.max_related);
        debug!("SerpApi returned {} related searches", related.len());
        Ok(related)
    }
}

/// `related_searches[*].query` strings, at most `limit`
fn parse_related(json: &Value, limit: usize) -> Vec<String> {
    json.get("related_searches")
        .and_then(|r| r.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|r| r.get("query").and_then(|q| q.as_str()))
                .take(limit)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Related searches for the report; any failure degrades to an empty list
pub async fn enrich(backend: &dyn SearchBackend, query: &str) -> Vec<String> {
    match backend.related_searches(query).await {
        Ok(related) => related,
        Err(e) => {
            warn!("Search enrichment failed, continuing without it: {}", e);
            vec![]
        }
    }
}
