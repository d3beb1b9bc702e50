//! The parameter model produced by tokenizing a request's query string.

use enum_iterator::Sequence;
use indexmap::IndexMap;

use query_engine_metadata::metadata::ComparisonOperator;

/// How a filter clause is resolved against the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// A single comparison.
    Basic,
    /// Membership in a value sequence.
    In,
    /// Non-membership in a value sequence.
    NotIn,
}

/// The raw value carried by a filter clause.
///
/// `Many` if and only if the clause kind is `In` or `NotIn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// The value sequence; a singleton for `Single`.
    pub fn to_values(&self) -> Vec<String> {
        match self {
            FilterValue::Single(value) => vec![value.clone()],
            FilterValue::Many(values) => values.clone(),
        }
    }

    /// The scalar value; `Many` values rejoin on commas.
    pub fn to_scalar(&self) -> String {
        match self {
            FilterValue::Single(value) => value.clone(),
            FilterValue::Many(values) => values.join(","),
        }
    }
}

/// One candidate predicate parsed from a request parameter, prior to
/// validation. Created by the tokenizer, consumed exactly once by the filter
/// compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub key: String,
    pub operator: ComparisonOperator,
    pub value: FilterValue,
    pub kind: FilterKind,
}

impl FilterClause {
    /// A `Basic` equality clause. An absent operator means equality, so this
    /// is the constructor for clauses built in code rather than parsed.
    pub fn basic(key: impl Into<String>, value: impl Into<String>) -> FilterClause {
        FilterClause {
            key: key.into(),
            operator: ComparisonOperator::Equals,
            value: FilterValue::Single(value.into()),
            kind: FilterKind::Basic,
        }
    }
}

/// A reserved parameter name controlling the shape of the result rather than
/// filtering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum StructuralParameter {
    Includes,
    Page,
    Columns,
    OrderBy,
    GroupBy,
    Limit,
    Append,
}

impl StructuralParameter {
    /// The parameter name as it appears in a query string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::Page => "page",
            Self::Columns => "columns",
            Self::OrderBy => "order_by",
            Self::GroupBy => "group_by",
            Self::Limit => "limit",
            Self::Append => "append",
        }
    }

    /// Parse a structural parameter from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<Self>().find(|parameter| parameter.name() == name)
    }
}

/// The classifier output: filter clause candidates in input order, structural
/// directives with the last occurrence winning, and the canonical query
/// string used to build pagination links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParameters {
    pub(crate) wheres: Vec<FilterClause>,
    pub(crate) directives: IndexMap<StructuralParameter, String>,
    pub(crate) query_string: String,
}

impl RequestParameters {
    /// The filter clause candidates, in input order.
    pub fn where_parameters(&self) -> &[FilterClause] {
        &self.wheres
    }

    /// The recognized structural directives and their raw values.
    pub fn constant_parameters(&self) -> impl Iterator<Item = (StructuralParameter, &str)> {
        self.directives
            .iter()
            .map(|(parameter, value)| (*parameter, value.as_str()))
    }

    /// Is this structural directive present?
    pub fn has_parameter(&self, parameter: StructuralParameter) -> bool {
        self.directives.contains_key(&parameter)
    }

    /// The raw value of a structural directive, if present.
    pub fn parameter(&self, parameter: StructuralParameter) -> Option<&str> {
        self.directives.get(&parameter).map(String::as_str)
    }

    /// The canonical query string with the page parameter removed.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_all_structural_parameters_round_trip() {
        for parameter in enum_iterator::all::<StructuralParameter>() {
            assert_eq!(
                StructuralParameter::from_name(parameter.name()),
                Some(parameter),
                "The parameter {:?} does not round trip through its name.",
                parameter
            );
        }
    }

    #[test]
    fn test_filter_keys_are_not_structural() {
        assert_eq!(StructuralParameter::from_name("title"), None);
        assert_eq!(StructuralParameter::from_name("pages"), None);
    }
}
