use std::collections::BTreeMap;

use query_engine_metadata::metadata::{
    ColumnInfo, Metadata, Nullable, ScalarType, TableInfo, TablesInfo,
};

/// Metadata for a small library database: books with an authors relation.
pub fn library_metadata() -> Metadata {
    let mut tables = BTreeMap::new();

    tables.insert(
        "books".to_string(),
        TableInfo {
            table_name: "books".to_string(),
            columns: columns(&[
                ("id", ScalarType::Integer),
                ("title", ScalarType::Text),
                ("author_id", ScalarType::Integer),
                ("rating", ScalarType::DoublePrecision),
                ("published_on", ScalarType::Date),
                ("deleted_at", ScalarType::Timestamp),
            ]),
        },
    );

    tables.insert(
        "authors".to_string(),
        TableInfo {
            table_name: "authors".to_string(),
            columns: columns(&[
                ("id", ScalarType::Integer),
                ("name", ScalarType::Text),
                ("email", ScalarType::Text),
            ]),
        },
    );

    Metadata {
        tables: TablesInfo(tables),
    }
}

fn columns(specs: &[(&str, ScalarType)]) -> BTreeMap<String, ColumnInfo> {
    specs
        .iter()
        .map(|(name, scalar_type)| {
            (
                (*name).to_string(),
                ColumnInfo {
                    name: (*name).to_string(),
                    r#type: *scalar_type,
                    nullable: Nullable::Nullable,
                },
            )
        })
        .collect()
}
