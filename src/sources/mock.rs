//! Mock pager for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::RawResultItem;
use crate::sources::{Engine, PagerError, SearchPager};

/// A pager that serves predefined pages keyed by start offset.
///
/// Offsets without a configured page return an empty page; offsets marked
/// with [`MockPager::fail_page`] return a network error.
#[derive(Debug, Default)]
pub struct MockPager {
    pages: Mutex<HashMap<usize, Vec<RawResultItem>>>,
    failures: Mutex<HashMap<usize, String>>,
    calls: Mutex<Vec<(String, usize, Engine)>>,
}

impl MockPager {
    /// Create a new mock pager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results returned for the page starting at `start`.
    pub fn set_page(&self, start: usize, items: Vec<RawResultItem>) {
        let mut guard = self.pages.lock().unwrap();
        guard.insert(start, items);
    }

    /// Make the page starting at `start` fail.
    pub fn fail_page(&self, start: usize, message: &str) {
        let mut guard = self.failures.lock().unwrap();
        guard.insert(start, message.to_string());
    }

    /// Every `(query, start, engine)` this pager was asked for, in order.
    pub fn calls(&self) -> Vec<(String, usize, Engine)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchPager for MockPager {
    async fn fetch_page(
        &self,
        query: &str,
        start: usize,
        engine: Engine,
    ) -> Result<Vec<RawResultItem>, PagerError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), start, engine));

        if let Some(message) = self.failures.lock().unwrap().get(&start) {
            return Err(PagerError::Network(message.clone()));
        }

        let guard = self.pages.lock().unwrap();
        Ok(guard.get(&start).cloned().unwrap_or_default())
    }
}

/// Helper function to create a result item for testing.
pub fn make_item(title: &str, link: Option<&str>, snippet: &str) -> RawResultItem {
    RawResultItem {
        title: Some(title.to_string()),
        link: link.map(str::to_string),
        snippet: Some(snippet.to_string()),
        displayed_link: link.map(|l| l.trim_start_matches("https://").to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_pages_and_failures() {
        let pager = MockPager::new();
        pager.set_page(0, vec![make_item("A", Some("https://a.example"), "s")]);
        pager.fail_page(10, "boom");

        let first = pager.fetch_page("q", 0, Engine::Google).await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(pager.fetch_page("q", 10, Engine::Google).await.is_err());
        assert!(pager.fetch_page("q", 20, Engine::Google).await.unwrap().is_empty());

        assert_eq!(pager.calls().len(), 3);
        assert_eq!(pager.calls()[1], ("q".to_string(), 10, Engine::Google));
    }
}
