//! Search result pagers.
//!
//! A [`SearchPager`] returns one page of raw organic results for a query.
//! [`SerpApiPager`] talks to SerpApi; [`MockPager`] serves canned pages for
//! tests and offline runs.
//!
//! Two engines are supported:
//!
//! - [`Engine::Google`] - general web search
//! - [`Engine::Scholar`] - Google Scholar, which also enables the academic
//!   fallback rules of the record assembler

mod mock;
mod serpapi;

pub use mock::{make_item, MockPager};
pub use serpapi::SerpApiPager;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::RawResultItem;

/// Search engine queried through the results API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Google,
    Scholar,
}

impl Engine {
    /// Engine identifier expected by SerpApi
    pub fn api_name(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Scholar => "google_scholar",
        }
    }

    /// Short tag used in export file names
    pub fn tag(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Scholar => "scholar",
        }
    }

    /// Whether results come from scholarly literature search
    pub fn is_academic(&self) -> bool {
        matches!(self, Engine::Scholar)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Source of paginated search results
#[async_trait]
pub trait SearchPager: Send + Sync + std::fmt::Debug {
    /// Fetch the organic results starting at offset `start`.
    ///
    /// A page without organic results is `Ok` with an empty vector.
    async fn fetch_page(
        &self,
        query: &str,
        start: usize,
        engine: Engine,
    ) -> Result<Vec<RawResultItem>, PagerError>;
}

/// Errors that can occur when fetching a page of results
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// No API key was configured
    #[error("SerpApi key is not set (use {0} or the config file)")]
    MissingApiKey(&'static str),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// API error reported by the service
    #[error("API error: {0}")]
    Api(String),

    /// Response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PagerError {
    fn from(err: reqwest::Error) -> Self {
        PagerError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PagerError {
    fn from(err: serde_json::Error) -> Self {
        PagerError::Parse(format!("JSON: {}", err))
    }
}
