//! Shared fixtures: a small library schema and a one-call compile helper.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::{
    ColumnInfo, Metadata, Nullable, ScalarType, TableInfo, TablesInfo,
};
use query_engine_plan::plan::ast::{PaginationSpec, QueryPlan};
use query_engine_request::request::RequestParameters;
use query_engine_translation::translation::helpers::{CustomFilters, Env};
use query_engine_translation::translation::query;
use restq_configuration::CompilerOptions;

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

/// Compile a raw query string against the library metadata with default
/// options and no custom filters, returning the plan and the pagination
/// inputs resolved from the same request.
pub fn compile(raw_query: &str) -> anyhow::Result<(QueryPlan, PaginationSpec)> {
    let metadata = library_metadata();
    let options = CompilerOptions::default();
    let custom_filters = CustomFilters::new();
    let env = Env::new(&metadata, &options, &custom_filters);

    let request = RequestParameters::parse(raw_query)?;
    let plan = query::translate(&env, "books", &request)?;
    let pagination = query::translate_pagination(&env, &request)?;

    Ok((plan, pagination))
}

/// The canonical query string the compiled request would carry into
/// pagination links.
pub fn canonical_query_string(raw_query: &str) -> anyhow::Result<String> {
    let request = RequestParameters::parse(raw_query)?;
    Ok(request.query_string().to_string())
}
