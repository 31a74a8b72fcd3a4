//! Document type labels written to the `doc_type` column.

use serde::{Serialize, Serializer};

/// Coarse document type of a harvested link.
///
/// Content labels (derived from a `Content-Type` header) and failure markers
/// (derived from a failed fetch) share one export column but stay distinct
/// variants here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DocType {
    Pdf,
    Html,
    Json,
    Xml,
    /// Upper-cased major type (or whole header) for anything else, e.g. `IMAGE`
    Other(String),
    /// No usable content type was reported
    #[default]
    Unknown,

    /// The request exceeded its timeout
    Timeout,
    /// The server answered with a non-success status
    HttpError(u16),
    /// Connection, DNS, TLS or other transport failure
    RequestError,
    /// The response arrived but its body could not be processed
    ProcessingError,
    /// The search result carried no link
    NoLink,
}

impl DocType {
    /// The label as written to the export.
    pub fn label(&self) -> String {
        match self {
            DocType::Pdf => "PDF".to_string(),
            DocType::Html => "HTML".to_string(),
            DocType::Json => "JSON".to_string(),
            DocType::Xml => "XML".to_string(),
            DocType::Other(s) => s.clone(),
            DocType::Unknown => String::new(),
            DocType::Timeout => "TIMEOUT".to_string(),
            DocType::HttpError(code) => format!("HTTP_ERROR_{}", code),
            DocType::RequestError => "REQUEST_ERROR".to_string(),
            DocType::ProcessingError => "PROCESSING_ERROR".to_string(),
            DocType::NoLink => "NO_LINK".to_string(),
        }
    }

    /// Whether this value marks a failed fetch rather than a content type.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DocType::Timeout
                | DocType::HttpError(_)
                | DocType::RequestError
                | DocType::ProcessingError
                | DocType::NoLink
        )
    }

    pub fn is_html(&self) -> bool {
        matches!(self, DocType::Html)
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for DocType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DocType::Pdf.label(), "PDF");
        assert_eq!(DocType::Other("IMAGE".to_string()).label(), "IMAGE");
        assert_eq!(DocType::Unknown.label(), "");
        assert_eq!(DocType::HttpError(404).label(), "HTTP_ERROR_404");
        assert_eq!(DocType::NoLink.to_string(), "NO_LINK");
    }

    #[test]
    fn test_failure_family() {
        assert!(DocType::Timeout.is_failure());
        assert!(DocType::HttpError(500).is_failure());
        assert!(DocType::ProcessingError.is_failure());
        assert!(!DocType::Html.is_failure());
        assert!(!DocType::Unknown.is_failure());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&DocType::HttpError(403)).unwrap();
        assert_eq!(json, "\"HTTP_ERROR_403\"");
    }
}
