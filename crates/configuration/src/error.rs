//! Errors that occur during parsing or writing of the configuration.

use std::path::PathBuf;

use thiserror::Error;

/// The errors that can arise when reading the configuration.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path} ({line}:{column}): {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("could not find configuration file: {0}")]
    CouldNotFindConfiguration(PathBuf),
    #[error("unknown configuration version: {0}")]
    UnknownVersion(u32),
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can arise when writing the configuration.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}
