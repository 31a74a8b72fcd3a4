//! Abstract extraction.

use scraper::Html;

use super::{collapsed_text, find_meta, is_meta, meta_content, parse_selector, Probe, ProbeKind};

/// Longest abstract kept before truncation
pub const ABSTRACT_MAX_CHARS: usize = 2000;

/// Abstract probes in priority order: description metadata, then abstract containers.
pub const ABSTRACT_PROBES: &[Probe] = &[
    Probe::meta("name", "description"),
    Probe::meta("property", "og:description"),
    Probe::meta("name", "twitter:description"),
    Probe::meta("name", "DC.Description"),
    Probe::meta("name", "DC.description"),
    Probe::meta("name", "citation_abstract"),
    Probe::css("div.abstract > p"),
    Probe::css("section.abstract > p"),
    Probe::css(r#"div[class*="abstract"] p"#),
    Probe::css(r#"p[class*="abstract"]"#),
    Probe::css("div#abstract p"),
    Probe::css("article .entry-content p"),
    Probe::css("div.article-content p"),
    Probe::css(r#"section[property="schema:abstract"] p"#),
    Probe::css(r#"div[property="schema:abstract"]"#),
];

/// Extract the abstract of a page, or an empty string.
pub fn extract_abstract(document: &Html) -> String {
    ABSTRACT_PROBES
        .iter()
        .find_map(|probe| {
            let candidate = probe_abstract(document, probe.kind)?;
            probe.accepts(&candidate).then_some(candidate)
        })
        .unwrap_or_default()
}

fn probe_abstract(document: &Html, kind: ProbeKind) -> Option<String> {
    match kind {
        ProbeKind::Meta { attr, value } => {
            let tag = find_meta(document, attr, value)?;
            meta_content(&tag)
        }
        ProbeKind::Css(css) => {
            let selector = parse_selector(css)?;
            let mut parts = Vec::new();

            for element in document.select(&selector) {
                // A matched meta tag answers on its own.
                if is_meta(&element) {
                    if let Some(content) = meta_content(&element).filter(|c| !c.is_empty()) {
                        return Some(content);
                    }
                }
                let text = collapsed_text(&element);
                if !text.is_empty() {
                    parts.push(text);
                }
            }

            if parts.is_empty() {
                return None;
            }
            Some(truncate_abstract(&parts.join(" ")))
        }
    }
}

/// Cap at [`ABSTRACT_MAX_CHARS`] characters, marking the cut with "..."
fn truncate_abstract(text: &str) -> String {
    match text.char_indices().nth(ABSTRACT_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abstract_of(html: &str) -> String {
        extract_abstract(&Html::parse_document(html))
    }

    #[test]
    fn test_meta_description() {
        assert_eq!(
            abstract_of(r#"<html><head><meta name="description" content="This is a test abstract."></head></html>"#),
            "This is a test abstract."
        );
        assert_eq!(
            abstract_of(r#"<html><head><meta property="og:description" content="Another test abstract."></head></html>"#),
            "Another test abstract."
        );
    }

    #[test]
    fn test_meta_beats_markup() {
        let html = r#"<html><head><meta name="citation_abstract" content="From meta">
            </head><body><div class="abstract"><p>From body</p></div></body></html>"#;
        assert_eq!(abstract_of(html), "From meta");
    }

    #[test]
    fn test_css_abstract() {
        assert_eq!(
            abstract_of(r#"<html><body><div class="abstract"><p>Abstract from CSS.</p></div></body></html>"#),
            "Abstract from CSS."
        );
    }

    #[test]
    fn test_multiple_paragraphs_are_joined() {
        assert_eq!(
            abstract_of(r#"<html><body><div class="abstract"><p>First part.</p><p>Second part.</p></div></body></html>"#),
            "First part. Second part."
        );
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let html = "<body><div id=\"abstract\"><p>  Spread\n   over\tlines </p><p>\n and <em>more</em> </p></div></body>";
        assert_eq!(abstract_of(html), "Spread over lines and more");
    }

    #[test]
    fn test_long_abstract_is_truncated() {
        let paragraph = "word ".repeat(300);
        let html = format!(
            "<body><div class=\"abstract\"><p>{}</p><p>{}</p></div></body>",
            paragraph, paragraph
        );
        let result = abstract_of(&html);

        assert_eq!(result.chars().count(), ABSTRACT_MAX_CHARS + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let text = "a".repeat(ABSTRACT_MAX_CHARS);
        let html = format!("<body><p class=\"abstract-text\">{}</p></body>", text);
        assert_eq!(abstract_of(&html), text);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "é".repeat(ABSTRACT_MAX_CHARS + 5);
        let result = truncate_abstract(&text);
        assert_eq!(result.chars().count(), ABSTRACT_MAX_CHARS + 3);
    }

    #[test]
    fn test_nested_meta_contributes_no_text() {
        let html = r#"<html><body><div property="schema:abstract"><meta content="Abstract via CSS Meta."></div></body></html>"#;
        assert_eq!(abstract_of(html), "");
    }

    #[test]
    fn test_empty_matches_fall_through() {
        let html = r#"<body><div class="abstract"><p>  </p></div>
            <article><div class="entry-content"><p>Entry text</p></div></article></body>"#;
        assert_eq!(abstract_of(html), "Entry text");
    }

    #[test]
    fn test_no_abstract() {
        assert_eq!(
            abstract_of("<html><head><title>No Abstract Here</title></head></html>"),
            ""
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = Html::parse_document(
            r#"<body><div class="article-content"><p>One</p><p>Two</p></div></body>"#,
        );
        assert_eq!(extract_abstract(&doc), extract_abstract(&doc));
        assert_eq!(extract_abstract(&doc), "One Two");
    }
}
