//! Content type classification.

use crate::models::DocType;

/// Classify a `Content-Type` header value without looking at the body.
///
/// Substring tests run in a fixed order: pdf, html, json, xml. Anything else
/// becomes its upper-cased major type (or the whole upper-cased value when
/// there is no `/`).
pub fn classify(content_type: &str) -> DocType {
    let ctype = content_type.trim().to_lowercase();

    if ctype.is_empty() {
        return DocType::Unknown;
    }
    if ctype.contains("pdf") {
        return DocType::Pdf;
    }
    if ctype.contains("html") {
        return DocType::Html;
    }
    if ctype.contains("json") {
        return DocType::Json;
    }
    if ctype.contains("xml") {
        return DocType::Xml;
    }

    let major = match ctype.split_once('/') {
        Some((major, _)) => major,
        None => ctype.as_str(),
    };
    match major.trim() {
        "" => DocType::Unknown,
        label => DocType::Other(label.to_uppercase()),
    }
}
