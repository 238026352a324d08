//! Error types for fragment parsing

use thiserror::Error;

/// Parse failures, each carrying the line where scanning stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("MARKUP_UNEXPECTED_EOF: input ended {context} at line {line}")]
    UnexpectedEof { context: String, line: usize },

    #[error("MARKUP_MALFORMED_TAG: {message} at line {line}")]
    MalformedTag { message: String, line: usize },

    #[error("MARKUP_MISMATCHED_CLOSE: expected '</{expected}>', found '</{found}>' at line {line}")]
    MismatchedClose {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("MARKUP_STRAY_CLOSE: '</{tag}>' without a matching open tag at line {line}")]
    StrayClose { tag: String, line: usize },
}
