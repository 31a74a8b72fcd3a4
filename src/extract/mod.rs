//! Best-effort metadata extraction from links and HTML pages.
//!
//! Every extractor is a pure function that returns an empty string when it
//! finds nothing or hits malformed input; none of them fail.
//!
//! - [`extract_author`]: author name from meta tags or byline markup
//! - [`extract_abstract`]: abstract/description from meta tags or abstract containers
//! - [`extract_year`]: publication year from a `/YYYY/` path segment
//! - [`extract_base`]: host and port of a link
//!
//! The author and abstract extractors walk declarative [`Probe`] tables in
//! order and stop at the first probe that yields an accepted value.
//!
//! ```rust
//! use scraper::Html;
//! use softscrape::extract::{extract_author, extract_year};
//!
//! let page = Html::parse_document(r#"<meta name="author" content="Jane Doe">"#);
//! assert_eq!(extract_author(&page), "Jane Doe");
//! assert_eq!(extract_year(Some("https://example.com/2021/post")), "2021");
//! ```

mod abstract_text;
mod author;
mod domain;
mod year;

pub use abstract_text::{extract_abstract, ABSTRACT_MAX_CHARS, ABSTRACT_PROBES};
pub use author::{extract_author, AUTHOR_PROBES};
pub use domain::extract_base;
pub use year::{extract_year, find_year_in_text};

use scraper::{ElementRef, Html, Selector};

/// How a probe locates candidate elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// A `<meta>` tag whose `attr` equals `value` exactly; its `content` is the candidate
    Meta {
        attr: &'static str,
        value: &'static str,
    },
    /// A CSS selector
    Css(&'static str),
}

/// One step of an ordered extraction chain
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub kind: ProbeKind,

    /// Extra acceptance test applied to a non-empty candidate
    pub guard: Option<fn(&str) -> bool>,
}

impl Probe {
    pub const fn meta(attr: &'static str, value: &'static str) -> Self {
        Self {
            kind: ProbeKind::Meta { attr, value },
            guard: None,
        }
    }

    pub const fn css(selector: &'static str) -> Self {
        Self {
            kind: ProbeKind::Css(selector),
            guard: None,
        }
    }

    pub const fn guarded(mut self, guard: fn(&str) -> bool) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Whether a trimmed candidate value passes this probe
    pub fn accepts(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.guard.map_or(true, |guard| guard(candidate))
    }
}

/// Rejects values that are links rather than names
pub fn not_a_url(value: &str) -> bool {
    !value.to_lowercase().starts_with("http")
}

/// The first `<meta>` tag carrying `attr="value"`, if any.
pub(crate) fn find_meta<'a>(document: &'a Html, attr: &str, value: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("meta").ok()?;
    document
        .select(&selector)
        .find(|el| el.value().attr(attr) == Some(value))
}

/// Trimmed `content` attribute of a meta element
pub(crate) fn meta_content(element: &ElementRef) -> Option<String> {
    element
        .value()
        .attr("content")
        .map(|c| c.trim().to_string())
}

/// Parse a CSS selector, treating an invalid one as matching nothing
pub(crate) fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Skipping invalid selector '{}': {}", css, e);
            None
        }
    }
}

/// Text content of an element with runs of whitespace collapsed to one space
pub(crate) fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn is_meta(element: &ElementRef) -> bool {
    element.value().name() == "meta"
}
