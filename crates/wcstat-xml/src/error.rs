//! Error types for the XML normalizer.

/// Errors raised while turning XML text into a [`Node`](crate::Node) tree.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// The tokenizer rejected the input.
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The document ended while elements were still open.
    #[error("unexpected end of document: <{0}> is not closed")]
    UnexpectedEof(String),

    /// An end tag did not match the innermost open element.
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },

    /// The document contains no root element.
    #[error("document has no root element")]
    NoRoot,

    /// A second top-level element followed the root.
    #[error("unexpected second root element <{0}>")]
    MultipleRoots(String),

    /// Non-whitespace text appeared outside the root element.
    #[error("text outside of root element: {0:?}")]
    StrayText(String),

    /// Names, attribute values or text were not valid UTF-8 or had bad escapes.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Convenience alias for normalizer results.
pub type XmlResult<T> = Result<T, XmlError>;
