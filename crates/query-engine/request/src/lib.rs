//! The untrusted request surface: tokenizing a raw query string into filter
//! clause candidates and structural directives.

pub mod request;
