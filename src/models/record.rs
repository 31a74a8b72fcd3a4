//! The harvested record written as one CSV row.

use serde::Serialize;

use super::DocType;

/// One harvested search result.
///
/// Missing data is an empty string, never an absent column, so rows with and
/// without extracted metadata share the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultRecord {
    pub title: String,

    pub author: String,

    /// Page abstract, or the search snippet when the page had none
    pub r#abstract: String,

    /// Source string displayed by the search engine
    pub source: String,

    /// Four-digit year, or empty
    pub year: String,

    pub doc_type: DocType,

    /// Host (and port) of the link
    pub base: String,

    pub link: String,
}

impl SearchResultRecord {
    /// Export column names, in column order.
    pub const FIELD_NAMES: [&'static str; 8] = [
        "title", "author", "abstract", "source", "year", "doc_type", "base", "link",
    ];

    /// The record as export cells, in `FIELD_NAMES` order.
    pub fn to_row(&self) -> [String; 8] {
        [
            self.title.clone(),
            self.author.clone(),
            self.r#abstract.clone(),
            self.source.clone(),
            self.year.clone(),
            self.doc_type.label(),
            self.base.clone(),
            self.link.clone(),
        ]
    }
}

/// Builder for [`SearchResultRecord`]; unset fields stay empty.
#[derive(Debug, Clone, Default)]
pub struct SearchResultRecordBuilder {
    title: String,
    author: String,
    abstract_text: String,
    source: String,
    year: String,
    doc_type: DocType,
    base: String,
    link: String,
}

impl SearchResultRecordBuilder {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = doc_type;
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn build(self) -> SearchResultRecord {
        SearchResultRecord {
            title: self.title,
            author: self.author,
            r#abstract: self.abstract_text,
            source: self.source,
            year: self.year,
            doc_type: self.doc_type,
            base: self.base,
            link: self.link,
        }
    }
}
