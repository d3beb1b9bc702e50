//! Schema metadata consumed by the query compiler.
//! This is the column-existence capability: translation validates every
//! untrusted filter target against it before a plan is produced.

pub mod metadata;
