//! Result items as returned by the search API.

use serde::{Deserialize, Serialize};

/// One organic result from a search results page.
///
/// Every field is optional on the wire; accessors fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultItem {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub snippet: Option<String>,

    /// Source string shown under the result (web search)
    #[serde(default)]
    pub displayed_link: Option<String>,

    /// Generic source name used by some engines instead of `displayed_link`
    #[serde(default)]
    pub source: Option<String>,

    /// Structured publication data (academic search only)
    #[serde(default)]
    pub publication_info: Option<PublicationInfo>,
}

/// Publication block attached to academic search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationInfo {
    #[serde(default)]
    pub authors: Option<Vec<PublicationAuthor>>,

    /// Free text such as "J Doe, A Smith - Journal of Things, 2021 - example.org"
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

impl RawResultItem {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or_default()
    }

    /// The link, if present and non-blank
    pub fn link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Displayed link, falling back to the generic source field
    pub fn display_source(&self) -> &str {
        self.displayed_link
            .as_deref()
            .or(self.source.as_deref())
            .unwrap_or_default()
    }

    /// Author names listed in the publication block, in order
    pub fn publication_authors(&self) -> Vec<&str> {
        self.publication_info
            .as_ref()
            .and_then(|p| p.authors.as_ref())
            .map(|authors| {
                authors
                    .iter()
                    .filter_map(|a| a.name.as_deref())
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn publication_summary(&self) -> Option<&str> {
        self.publication_info
            .as_ref()
            .and_then(|p| p.summary.as_deref())
    }
}
