//! Metadata information regarding the database and tracked information.

pub mod database;

// re-export without modules
pub use database::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub tables: TablesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            tables: TablesInfo::empty(),
        }
    }

    /// Lookup a table's information by name.
    pub fn lookup_table(&self, table_name: &str) -> Option<&TableInfo> {
        self.tables.0.get(table_name)
    }
}
