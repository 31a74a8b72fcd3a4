//! Publication year extraction.

use regex::Regex;
use std::sync::LazyLock;

/// A 19xx/20xx year enclosed by path separators
static PATH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/((?:19|20)\d{2})/").expect("valid year pattern"));

/// A 19xx/20xx year anywhere in free text
static TEXT_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").expect("valid year pattern"));

/// Year from a `/YYYY/` segment of a link, or an empty string.
///
/// A trailing year with no following slash (`/archive/2005`) does not count.
pub fn extract_year(url: Option<&str>) -> String {
    url.and_then(|u| PATH_YEAR.captures(u))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First 19xx/20xx token in free text, without any delimiter requirement.
pub fn find_year_in_text(text: &str) -> Option<String> {
    TEXT_YEAR.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_in_path() {
        assert_eq!(extract_year(Some("http://example.com/blog/2023/article.html")), "2023");
        assert_eq!(extract_year(Some("http://example.com/papers/1999/old_paper.pdf")), "1999");
        assert_eq!(extract_year(Some("http://example.com/archive/2005/doc.html")), "2005");
    }

    #[test]
    fn test_unbounded_or_missing_year() {
        assert_eq!(extract_year(Some("http://example.com/no_year_here/")), "");
        assert_eq!(extract_year(Some("http://example.com/archive/2005")), "");
        assert_eq!(extract_year(Some("http://example.com:2020/page")), "");
        assert_eq!(extract_year(Some("http://example.com/1850/old/")), "");
        assert_eq!(extract_year(Some("http://example.com/12023/x")), "");
        assert_eq!(extract_year(None), "");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(extract_year(Some("https://example.com/2019/05/2020/post")), "2019");
    }

    #[test]
    fn test_year_in_text() {
        assert_eq!(
            find_year_in_text("J Doe - Journal of Things, 2021 - example.org"),
            Some("2021".to_string())
        );
        assert_eq!(find_year_in_text("Published 1987."), Some("1987".to_string()));
        assert_eq!(find_year_in_text("no years here, 1776 excepted"), None);
    }
}
