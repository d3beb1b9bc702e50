//! Errors for query translation.

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Unknown column '{column}' in table '{table}'.")]
    UnknownColumn { column: String, table: String },
    #[error("Table '{0}' not found in metadata.")]
    TableNotFound(String),
    #[error("Malformed directive: {0}.")]
    MalformedDirective(String),
}
