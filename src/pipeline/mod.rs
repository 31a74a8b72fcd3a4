//! The harvest loop.
//!
//! Pages are requested one after another; every result on a page is fetched,
//! classified, extracted and assembled before the next result starts. A fixed
//! pause follows every page that returned a response. Nothing in per-result
//! processing can abort the run: failures end up as `doc_type` markers.

mod assemble;

pub use assemble::{assemble_record, author_from_summary, FallbackRules};

use std::time::Duration;

use crate::config::SearchConfig;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::models::{RawResultItem, SearchResultRecord};
use crate::sources::{Engine, SearchPager};
use crate::utils::HarvestProgress;

/// Parameters of one harvest run
#[derive(Debug, Clone)]
pub struct HarvestPlan {
    pub query: String,
    pub engine: Engine,
    pub pages: usize,
    pub page_size: usize,
    pub pause: Duration,
    pub rules: FallbackRules,
}

impl HarvestPlan {
    /// Plan from search configuration, with fallback rules matching the engine
    pub fn new(search: &SearchConfig, engine: Engine) -> Self {
        Self {
            query: search.query.clone(),
            engine,
            pages: search.pages,
            page_size: search.page_size,
            pause: pause_duration(search.pause_secs),
            rules: FallbackRules::for_engine(engine),
        }
    }

    /// Result offset of a zero-based page index
    pub fn start_of(&self, page: usize) -> usize {
        page * self.page_size
    }
}

/// Pause between pages; negative means none, values a `Duration` cannot hold fall back to one second
fn pause_duration(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs.max(0.0)) {
        Ok(pause) => pause,
        Err(e) => {
            tracing::warn!("Invalid page pause {}s ({}), using 1s", secs, e);
            Duration::from_secs(1)
        }
    }
}

/// Sequential search-fetch-extract loop
#[derive(Debug)]
pub struct Harvester<P: SearchPager> {
    pager: P,
    fetcher: Fetcher,
    plan: HarvestPlan,
    progress: HarvestProgress,
}

impl<P: SearchPager> Harvester<P> {
    pub fn new(pager: P, fetcher: Fetcher, plan: HarvestPlan) -> Self {
        let progress = HarvestProgress::hidden(plan.pages);
        Self {
            pager,
            fetcher,
            plan,
            progress,
        }
    }

    /// Draw progress bars unless `quiet`
    pub fn with_progress(mut self, quiet: bool) -> Self {
        self.progress = HarvestProgress::new(self.plan.pages, quiet);
        self
    }

    /// Run every page of the plan and return the records in result order.
    pub async fn run(&self) -> Vec<SearchResultRecord> {
        let mut records = Vec::new();

        for page in 0..self.plan.pages {
            let start = self.plan.start_of(page);

            let items = match self
                .pager
                .fetch_page(&self.plan.query, start, self.plan.engine)
                .await
            {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Failed to fetch results page {}: {}", page + 1, e);
                    self.progress.page_done();
                    continue;
                }
            };

            if items.is_empty() {
                tracing::warn!("No organic results on page {}", page + 1);
            }

            let bar = self.progress.page_results(page + 1, items.len());
            for item in &items {
                let record = self.process_item(item).await;
                tracing::info!("Processed: {}", record.title);
                records.push(record);
                bar.inc(1);
            }
            bar.finish_and_clear();
            self.progress.page_done();

            if !self.plan.pause.is_zero() {
                tokio::time::sleep(self.plan.pause).await;
            }
        }

        let failed = records.iter().filter(|r| r.doc_type.is_failure()).count();
        tracing::info!(
            "Collected {} records, {} without a readable page",
            records.len(),
            failed
        );
        self.progress.finish(records.len());
        records
    }

    /// Fetch, classify, extract and assemble one result.
    pub async fn process_item(&self, item: &RawResultItem) -> SearchResultRecord {
        let outcome = match item.link() {
            Some(link) => self.fetcher.fetch(link).await,
            None => {
                tracing::warn!("Result '{}' has no link", item.title());
                FetchOutcome::NoLink
            }
        };

        assemble_record(item, &outcome, self.plan.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FetchConfig};
    use crate::sources::{make_item, MockPager};

    fn plan(pages: usize, engine: Engine) -> HarvestPlan {
        let mut search = Config::default().search;
        search.query = "test query".to_string();
        search.pages = pages;
        search.pause_secs = 0.0;
        HarvestPlan::new(&search, engine)
    }

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_plan_offsets() {
        let plan = plan(3, Engine::Google);
        assert_eq!(plan.start_of(0), 0);
        assert_eq!(plan.start_of(2), 20);
        assert_eq!(plan.rules, FallbackRules::Generic);
        assert!(plan.pause.is_zero());
    }

    #[test]
    fn test_plan_pause_values() {
        let mut search = Config::default().search;

        search.pause_secs = 2.5;
        assert_eq!(HarvestPlan::new(&search, Engine::Google).pause, Duration::from_millis(2500));

        search.pause_secs = -3.0;
        assert!(HarvestPlan::new(&search, Engine::Google).pause.is_zero());

        for huge in [1e30, f64::INFINITY] {
            search.pause_secs = huge;
            assert_eq!(HarvestPlan::new(&search, Engine::Google).pause, Duration::from_secs(1));
        }
    }

    #[test]
    fn test_plan_rules_follow_engine() {
        assert_eq!(plan(1, Engine::Scholar).rules, FallbackRules::Academic);
    }

    #[tokio::test]
    async fn test_pages_are_requested_in_order_and_failures_skipped() {
        let pager = MockPager::new();
        pager.set_page(0, vec![make_item("No link", None, "first")]);
        pager.fail_page(10, "page down");
        pager.set_page(20, vec![make_item("Also no link", None, "third")]);

        let harvester = Harvester::new(pager, fetcher(), plan(3, Engine::Google));
        let records = harvester.run().await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "No link");
        assert_eq!(records[0].doc_type.label(), "NO_LINK");
        assert_eq!(records[1].r#abstract, "third");

        let starts: Vec<usize> = harvester.pager.calls().iter().map(|c| c.1).collect();
        assert_eq!(starts, vec![0, 10, 20]);
        assert!(harvester
            .pager
            .calls()
            .iter()
            .all(|(q, _, e)| q == "test query" && *e == Engine::Google));
    }

    #[tokio::test]
    async fn test_empty_run() {
        let harvester = Harvester::new(MockPager::new(), fetcher(), plan(2, Engine::Scholar));
        assert!(harvester.run().await.is_empty());
    }
}
