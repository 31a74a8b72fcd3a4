//! SerpApi results pager.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Config, SERPAPI_KEY_VAR};
use crate::models::RawResultItem;
use crate::sources::{Engine, PagerError, SearchPager};

/// SerpApi search pager
///
/// Requests `organic_results` from the SerpApi JSON endpoint. Every request
/// carries the configured language, country and page size.
#[derive(Debug, Clone)]
pub struct SerpApiPager {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    page_size: usize,
    language: String,
    country: String,
}

/// The part of a SerpApi response we consume
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Option<Vec<RawResultItem>>,

    #[serde(default)]
    error: Option<String>,
}

impl SerpApiPager {
    /// Create a pager from configuration
    pub fn new(config: &Config) -> Result<Self, PagerError> {
        let api_key = config
            .api_keys
            .serpapi
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PagerError::MissingApiKey(SERPAPI_KEY_VAR))?;

        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(config.fetch.timeout())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: config.search.base_url.clone(),
            page_size: config.search.page_size,
            language: config.search.language.clone(),
            country: config.search.country.clone(),
        })
    }

    /// Point the pager at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn query_params(&self, query: &str, start: usize, engine: Engine) -> Vec<(&'static str, String)> {
        vec![
            ("engine", engine.api_name().to_string()),
            ("q", query.to_string()),
            ("api_key", self.api_key.clone()),
            ("start", start.to_string()),
            ("num", self.page_size.to_string()),
            ("hl", self.language.clone()),
            ("gl", self.country.clone()),
        ]
    }
}

#[async_trait]
impl SearchPager for SerpApiPager {
    async fn fetch_page(
        &self,
        query: &str,
        start: usize,
        engine: Engine,
    ) -> Result<Vec<RawResultItem>, PagerError> {
        tracing::debug!("Requesting {} results from offset {}", engine.api_name(), start);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(query, start, engine))
            .send()
            .await
            .map_err(|e| PagerError::Network(format!("Failed to query SerpApi: {}", e)))?;

        if !response.status().is_success() {
            return Err(PagerError::Api(format!(
                "SerpApi returned status: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PagerError::Parse(format!("Failed to read response: {}", e)))?;
        let data: SerpApiResponse = serde_json::from_str(&text)?;

        match (data.organic_results, data.error) {
            (Some(results), _) => Ok(results),
            (None, Some(message)) if message.contains("hasn't returned any results") => {
                Ok(Vec::new())
            }
            (None, Some(message)) => Err(PagerError::Api(message)),
            (None, None) => Ok(Vec::new()),
        }
    }
}
