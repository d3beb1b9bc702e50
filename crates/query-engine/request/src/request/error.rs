//! Errors for query string tokenization.

use thiserror::Error;

/// A type for tokenization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed query parameter: '{0}'.")]
    MalformedParameter(String),
    #[error("Query parameter is not valid UTF-8: '{0}'.")]
    InvalidEncoding(String),
}
