//! Record assembly: merge search data, fetch outcome and page metadata.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::extract::{extract_abstract, extract_author, extract_base, extract_year, find_year_in_text};
use crate::fetch::FetchOutcome;
use crate::models::{RawResultItem, SearchResultRecord, SearchResultRecordBuilder};
use crate::sources::Engine;

/// Author candidates at or above this length are rejected
const MAX_SUMMARY_AUTHOR_CHARS: usize = 150;

/// Word count below which a candidate needs no list punctuation
const MAX_BARE_AUTHOR_WORDS: usize = 7;

/// Which fallback rules fill gaps left by page extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackRules {
    /// Page metadata only
    #[default]
    Generic,
    /// Also use the publication block and snippet of scholarly results
    Academic,
}

impl FallbackRules {
    pub fn for_engine(engine: Engine) -> Self {
        if engine.is_academic() {
            FallbackRules::Academic
        } else {
            FallbackRules::Generic
        }
    }

    /// Author from the result itself, used when the page gave none
    fn author(&self, item: &RawResultItem) -> Option<String> {
        match self {
            FallbackRules::Generic => None,
            FallbackRules::Academic => {
                let names = item.publication_authors();
                if !names.is_empty() {
                    return Some(names.join(", "));
                }
                item.publication_summary().and_then(author_from_summary)
            }
        }
    }

    /// Year from the result itself, used when the link gave none
    fn year(&self, item: &RawResultItem) -> Option<String> {
        match self {
            FallbackRules::Generic => None,
            FallbackRules::Academic => find_year_in_text(item.snippet()),
        }
    }
}

/// Build the record for one search result.
///
/// Page metadata is only extracted from HTML responses; other content types
/// and failed fetches keep the snippet as abstract and leave author empty.
pub fn assemble_record(
    item: &RawResultItem,
    outcome: &FetchOutcome,
    rules: FallbackRules,
) -> SearchResultRecord {
    let link = item.link();
    let doc_type = outcome.doc_type();

    let mut author = String::new();
    let mut abstract_text = item.snippet().trim().to_string();
    let mut year = String::new();
    let mut base = String::new();

    if let FetchOutcome::Success { body, .. } = outcome {
        year = extract_year(link);
        base = extract_base(link);

        if doc_type.is_html() {
            let document = Html::parse_document(body);
            author = extract_author(&document);
            let page_abstract = extract_abstract(&document);
            if !page_abstract.is_empty() {
                abstract_text = page_abstract;
            }
        }
    }

    if author.is_empty() {
        author = rules.author(item).unwrap_or_default();
    }
    if year.is_empty() {
        year = rules.year(item).unwrap_or_default();
    }

    SearchResultRecordBuilder::new(link.unwrap_or_default())
        .title(item.title().trim())
        .author(author)
        .abstract_text(abstract_text)
        .source(item.display_source())
        .year(year)
        .doc_type(doc_type)
        .base(base)
        .build()
}

/// First " - " segment of a publication summary, if it looks like an author list
pub fn author_from_summary(summary: &str) -> Option<String> {
    let candidate = summary.split(" - ").next()?.trim();
    is_plausible_author(candidate).then(|| candidate.to_string())
}

fn is_plausible_author(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let lower = candidate.to_lowercase();
    let looks_like_list = candidate.contains(',')
        || candidate.contains(" and ")
        || lower.contains("et al");
    let short = candidate.split_whitespace().count() < MAX_BARE_AUTHOR_WORDS;

    (looks_like_list || short)
        && !candidate.chars().any(|c| c.is_ascii_digit())
        && candidate.chars().count() < MAX_SUMMARY_AUTHOR_CHARS
        && lower != "abstract"
        && lower != "introduction"
}
