//! # softscrape
//!
//! Harvest bibliographic metadata for search engine results and export it
//! as CSV.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Records, raw search results and document types
//! - [`sources`]: Search result pagers (SerpApi and a mock)
//! - [`fetch`]: Page fetching and content type classification
//! - [`extract`]: Author, abstract, year and domain extractors
//! - [`pipeline`]: Record assembly and the sequential harvest loop
//! - [`export`]: CSV export
//! - [`utils`]: Logging setup and progress bars
//! - [`config`]: Configuration management

pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{DocType, RawResultItem, SearchResultRecord};
pub use pipeline::{FallbackRules, HarvestPlan, Harvester};
pub use sources::{Engine, SearchPager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
