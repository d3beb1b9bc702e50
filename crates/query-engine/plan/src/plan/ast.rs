//! Type definitions of the query plan representation.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use query_engine_metadata::metadata::ComparisonOperator;

use super::helpers;

/// The validated, immutable aggregate handed to an execution adapter.
///
/// A plan owns no external resources; it is pure data. Predicate values
/// travel as text and are bound as parameters by the adapter, never spliced
/// into query text. `appends` is not seen by the store: it lists the computed
/// attributes attached to each row after fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub group_by: Vec<String>,
    pub order_by: OrderBy,
    pub limit: Limit,
    pub select: SelectList,
    pub includes: IncludeSpec,
    pub appends: Vec<String>,
}

impl QueryPlan {
    /// A copy of this plan with limit and offset cleared, suitable for
    /// counting the filtered set.
    pub fn without_pagination(&self) -> QueryPlan {
        QueryPlan {
            limit: helpers::empty_limit(),
            ..self.clone()
        }
    }

    /// A copy of this plan scoped to one page of results.
    pub fn for_page(&self, page: u64, per_page: u64) -> QueryPlan {
        QueryPlan {
            limit: Limit {
                limit: Some(per_page),
                offset: Some((page - 1) * per_page),
            },
            ..self.clone()
        }
    }
}

/// A single validated predicate over the target table.
///
/// Generic compilation only emits the leaf forms. The connective forms exist
/// so custom filters can group predicates, for example an OR across fields.
/// Predicates on one plan combine under the store's native AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// `column <operator> value`
    Comparison {
        column: String,
        operator: ComparisonOperator,
        value: String,
    },
    /// `column` is one of `values`
    In { column: String, values: Vec<String> },
    /// `column` is none of `values`
    NotIn { column: String, values: Vec<String> },
    /// `column IS NULL`
    IsNull { column: String },
    /// `column IS NOT NULL`
    IsNotNull { column: String },
    /// AND grouping
    And(Vec<Predicate>),
    /// OR grouping
    Or(Vec<Predicate>),
    /// NOT grouping
    Not(Box<Predicate>),
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct OrderBy {
    pub elements: Vec<OrderElement>,
}

/// A single element in an ORDER BY clause.
///
/// `Random` maps to the engine's native random ordering function, never to a
/// client-supplied expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderElement {
    Random,
    Column {
        column: String,
        direction: OrderDirection,
    },
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// LIMIT and OFFSET clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Limit {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A column projection for the target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectList {
    SelectStar,
    Columns(Vec<String>),
}

/// The outcome of splitting a raw column list: plain columns for the target
/// table, and column restrictions scoped to eager-loaded relations.
///
/// A requested column lives in exactly one of the two sides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub columns: Vec<String>,
    pub relation_columns: IndexMap<String, Vec<String>>,
}

/// Eager-load requests keyed by relation name.
///
/// A relation with restricted columns appears as `Columns`, replacing the
/// bare include entry for that relation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncludeSpec(pub IndexMap<String, RelationProjection>);

/// How much of a related entity to project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationProjection {
    All,
    Columns(Vec<String>),
}

/// The page size requested by the client or configured as a default.
///
/// `Limited` carries at least 1; translation rejects a zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLimit {
    Limited(u64),
    Unlimited,
}

/// Pagination inputs resolved from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSpec {
    pub page: u64,
    pub limit: PageLimit,
}

impl PaginationSpec {
    /// The number of rows skipped before this page. `None` when the limit is
    /// unlimited, where an offset is meaningless.
    pub fn offset(&self) -> Option<u64> {
        match self.limit {
            PageLimit::Limited(limit) => Some((self.page - 1) * limit),
            PageLimit::Unlimited => None,
        }
    }
}
