//! Author extraction.

use scraper::Html;

use super::{collapsed_text, find_meta, is_meta, meta_content, not_a_url, parse_selector, Probe, ProbeKind};

/// Author probes in priority order: metadata tags first, then byline markup.
pub const AUTHOR_PROBES: &[Probe] = &[
    Probe::meta("name", "author").guarded(not_a_url),
    Probe::meta("property", "article:author").guarded(not_a_url),
    Probe::meta("name", "citation_author").guarded(not_a_url),
    Probe::meta("name", "dc.creator").guarded(not_a_url),
    Probe::meta("name", "DC.creator").guarded(not_a_url),
    Probe::meta("name", "DC.Creator").guarded(not_a_url),
    Probe::meta("name", "byline").guarded(not_a_url),
    Probe::meta("name", "sailthru.author").guarded(not_a_url),
    Probe::css(".author-name").guarded(not_a_url),
    Probe::css(".author").guarded(not_a_url),
    Probe::css(r#"[itemprop="author"] .name"#).guarded(not_a_url),
    Probe::css(r#"[itemprop="author"] span[itemprop="name"]"#).guarded(not_a_url),
    Probe::css(r#"a[rel="author"]"#).guarded(not_a_url),
    Probe::css(".byline .author").guarded(not_a_url),
    Probe::css(".post-author .fn").guarded(not_a_url),
    Probe::css(".entry-author .author-name").guarded(not_a_url),
    Probe::css(r#"meta[property="article:author_name"]"#).guarded(not_a_url),
    Probe::css(".byline").guarded(not_a_url),
];

/// Extract the author name of a page, or an empty string.
pub fn extract_author(document: &Html) -> String {
    AUTHOR_PROBES
        .iter()
        .find_map(|probe| {
            let candidate = probe_author(document, probe.kind)?;
            probe.accepts(&candidate).then_some(candidate)
        })
        .unwrap_or_default()
}

/// Candidate value from the first element the probe locates
fn probe_author(document: &Html, kind: ProbeKind) -> Option<String> {
    match kind {
        ProbeKind::Meta { attr, value } => {
            let tag = find_meta(document, attr, value)?;
            meta_content(&tag)
        }
        ProbeKind::Css(css) => {
            let selector = parse_selector(css)?;
            let element = document.select(&selector).next()?;
            match meta_content(&element).filter(|c| is_meta(&element) && !c.is_empty()) {
                Some(content) => Some(content),
                None => Some(collapsed_text(&element)),
            }
        }
    }
}
