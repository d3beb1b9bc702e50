//! Compile untrusted request parameters into a validated query plan.

pub mod translation;
