//! Error types for status report parsing.

use wcstat_xml::XmlError;

/// Errors that can occur while parsing a status report.
///
/// Flattening and assembly never fail; every error originates at the
/// normalization boundary.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The text is not well-formed XML.
    #[error("parsing failed: {0}")]
    ParseFailure(#[from] XmlError),

    /// The XML is well formed but is not shaped like a status report.
    #[error("parsing failed: unexpected report structure: {0}")]
    Shape(String),

    /// The background parse task did not complete.
    #[error("parse task failed: {0}")]
    Join(String),
}

impl StatusError {
    /// Returns `true` if the input itself could not be parsed.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseFailure(_) | Self::Shape(_))
    }
}

/// Convenience alias for status results.
pub type StatusResult<T> = Result<T, StatusError>;
