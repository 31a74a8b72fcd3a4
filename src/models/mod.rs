//! Core data models for harvested records and raw search results.

mod doc_type;
mod raw;
mod record;

pub use doc_type::DocType;
pub use raw::{PublicationAuthor, PublicationInfo, RawResultItem};
pub use record::{SearchResultRecord, SearchResultRecordBuilder};
