//! Tokenize an incoming query string into typed parameters.

pub mod error;
pub mod parameters;
pub mod parse;

// re-export without modules
pub use error::ParseError;
pub use parameters::*;
