//! The query plan handed from translation to an execution adapter.

pub mod plan;
