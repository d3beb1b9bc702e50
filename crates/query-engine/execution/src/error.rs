//! Errors for query execution.

use thiserror::Error;

/// A type for execution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("You can't use the unlimited option for pagination.")]
    UnlimitedPagination,
    #[error("Unknown computed attribute '{0}'.")]
    UnknownAttribute(String),
    #[error("Data store error: {0}")]
    Store(String),
}
