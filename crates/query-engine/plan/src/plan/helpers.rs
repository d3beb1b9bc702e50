//! Helpers for building plan::ast types in certain shapes and patterns.

use indexmap::IndexMap;

use super::ast::*;

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// An include spec with no eager loads.
pub fn empty_includes() -> IncludeSpec {
    IncludeSpec(IndexMap::new())
}

/// Select every column of the target table.
pub fn select_star() -> SelectList {
    SelectList::SelectStar
}

/// Build a plan with no predicates and the rest empty.
pub fn simple_plan() -> QueryPlan {
    QueryPlan {
        predicates: vec![],
        group_by: vec![],
        order_by: empty_order_by(),
        limit: empty_limit(),
        select: select_star(),
        includes: empty_includes(),
        appends: vec![],
    }
}
