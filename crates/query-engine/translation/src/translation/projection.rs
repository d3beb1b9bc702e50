//! Handle column selection and eager-load include translation.

use indexmap::IndexMap;

use query_engine_plan::plan::ast::{ColumnSelection, IncludeSpec, RelationProjection};

use super::error::Error;

/// Split a raw column list into plain and relation-qualified columns, and
/// rewrite the include list so each restricted relation carries its own
/// column-limited projection.
///
/// An entry with exactly one `.` is relation-qualified. Entries with zero or
/// more than one `.` are plain columns; only single-level relation
/// qualification is supported. A relation-qualified column whose relation is
/// not in the include list is rejected rather than silently dropped.
pub fn translate_columns(
    raw_columns: Option<&str>,
    raw_includes: Option<&str>,
) -> Result<(ColumnSelection, IncludeSpec), Error> {
    let mut selection = ColumnSelection::default();

    for entry in split_list(raw_columns) {
        match relation_column(entry) {
            Some((relation, column)) => selection
                .relation_columns
                .entry(relation.to_string())
                .or_default()
                .push(column.to_string()),
            None => selection.columns.push(entry.to_string()),
        }
    }

    let mut includes = IndexMap::new();
    for relation in split_list(raw_includes) {
        let projection = match selection.relation_columns.get(relation) {
            Some(columns) => RelationProjection::Columns(columns.clone()),
            None => RelationProjection::All,
        };
        includes.insert(relation.to_string(), projection);
    }

    for relation in selection.relation_columns.keys() {
        if !includes.contains_key(relation) {
            return Err(Error::MalformedDirective(format!(
                "columns reference relation '{relation}' which is not in the include list"
            )));
        }
    }

    Ok((selection, IncludeSpec(includes)))
}

/// Split a comma-separated directive value, dropping empty entries.
pub(crate) fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or("")
        .split(',')
        .filter(|entry| !entry.is_empty())
}

/// The (relation, column) parts of a relation-qualified entry.
fn relation_column(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(relation), Some(column), None) if !relation.is_empty() && !column.is_empty() => {
            Some((relation, column))
        }
        _ => None,
    }
}
