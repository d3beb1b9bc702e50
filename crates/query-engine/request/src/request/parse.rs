//! Turn a raw query string into `RequestParameters`.

use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use regex::Regex;

use query_engine_metadata::metadata::ComparisonOperator;

use super::error::ParseError;
use super::parameters::{
    FilterClause, FilterKind, FilterValue, RequestParameters, StructuralParameter,
};

/// Grammar of one query segment: key, operator symbol, value.
/// Two-character symbols come first so `!=` is not read as a key ending in `!`.
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^&!<>=]+)(!=|<=|>=|=|<|>)(.*)$").expect("segment grammar"));

impl RequestParameters {
    /// Tokenize a raw query string.
    ///
    /// A segment carrying a recognized structural name with the `=` operator
    /// becomes a directive; a later occurrence of the same directive
    /// overwrites the earlier one. Every other segment becomes a filter
    /// clause candidate, in input order. Segments matching no grammar fail
    /// the whole tokenization.
    pub fn parse(raw_query: &str) -> Result<RequestParameters, ParseError> {
        let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);

        let mut wheres = vec![];
        let mut directives: IndexMap<StructuralParameter, String> = IndexMap::new();
        let mut canonical: Vec<&str> = vec![];

        for segment in raw_query.split('&').filter(|segment| !segment.is_empty()) {
            let captures = SEGMENT
                .captures(segment)
                .ok_or_else(|| ParseError::MalformedParameter(segment.to_string()))?;

            let key = decode(&captures[1])?;
            let operator = ComparisonOperator::from_symbol(&captures[2])
                .ok_or_else(|| ParseError::MalformedParameter(segment.to_string()))?;
            let value = decode(&captures[3])?;

            match StructuralParameter::from_name(&key) {
                Some(parameter) if operator == ComparisonOperator::Equals => {
                    // the page parameter is stripped from the canonical query
                    // string so pagination links can re-append their own
                    if parameter != StructuralParameter::Page {
                        canonical.push(segment);
                    }
                    directives.insert(parameter, value);
                }
                _ => {
                    canonical.push(segment);
                    wheres.push(classify(key, operator, value));
                }
            }
        }

        Ok(RequestParameters {
            wheres,
            directives,
            query_string: canonical.join("&"),
        })
    }
}

/// Classify one decoded filter segment. A comma-separated value under `=`
/// becomes a membership clause, under `!=` a non-membership clause.
fn classify(key: String, operator: ComparisonOperator, value: String) -> FilterClause {
    let kind = match operator {
        ComparisonOperator::Equals if value.contains(',') => FilterKind::In,
        ComparisonOperator::NotEquals if value.contains(',') => FilterKind::NotIn,
        _ => FilterKind::Basic,
    };

    let value = match kind {
        FilterKind::Basic => FilterValue::Single(value),
        FilterKind::In | FilterKind::NotIn => {
            FilterValue::Many(value.split(',').map(str::to_string).collect())
        }
    };

    FilterClause {
        key,
        operator,
        value,
        kind,
    }
}

/// Percent-decode one key or value, treating `+` as a space.
fn decode(raw: &str) -> Result<String, ParseError> {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParseError::InvalidEncoding(raw.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_filters_from_directives() {
        let parameters =
            RequestParameters::parse("name=foo&age>=18&page=2").expect("parse should succeed");

        assert_eq!(parameters.where_parameters().len(), 2);
        assert_eq!(
            parameters.where_parameters()[0],
            FilterClause::basic("name", "foo")
        );
        assert_eq!(
            parameters.where_parameters()[1],
            FilterClause {
                key: "age".to_string(),
                operator: ComparisonOperator::GreaterThanOrEqualTo,
                value: FilterValue::Single("18".to_string()),
                kind: FilterKind::Basic,
            }
        );
        assert_eq!(
            parameters.parameter(StructuralParameter::Page),
            Some("2"),
        );
    }

    #[test]
    fn comma_values_become_membership_clauses() {
        let parameters = RequestParameters::parse("ids=1,2,3&status!=draft,archived")
            .expect("parse should succeed");

        assert_eq!(
            parameters.where_parameters()[0].value,
            FilterValue::Many(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
        assert_eq!(parameters.where_parameters()[0].kind, FilterKind::In);
        assert_eq!(parameters.where_parameters()[1].kind, FilterKind::NotIn);
    }

    #[test]
    fn null_sentinel_passes_through_as_a_value() {
        let parameters =
            RequestParameters::parse("deleted_at=%5Bnull%5D").expect("parse should succeed");

        assert_eq!(
            parameters.where_parameters()[0].value,
            FilterValue::Single("[null]".to_string())
        );
    }

    #[test]
    fn later_directive_occurrences_overwrite_earlier_ones() {
        let parameters =
            RequestParameters::parse("limit=10&limit=25").expect("parse should succeed");

        assert_eq!(parameters.parameter(StructuralParameter::Limit), Some("25"));
    }

    #[test]
    fn query_string_strips_the_page_parameter() {
        let parameters = RequestParameters::parse("name=foo&page=3&limit=10&order_by=name,asc")
            .expect("parse should succeed");

        assert_eq!(
            parameters.query_string(),
            "name=foo&limit=10&order_by=name,asc"
        );
    }

    #[test]
    fn structural_names_with_comparison_operators_stay_filters() {
        // `limit>=10` names a would-be column "limit", not the directive
        let parameters = RequestParameters::parse("limit>=10").expect("parse should succeed");

        assert!(!parameters.has_parameter(StructuralParameter::Limit));
        assert_eq!(parameters.where_parameters().len(), 1);
    }

    #[test]
    fn decodes_percent_escapes_and_plus() {
        let parameters =
            RequestParameters::parse("title=war+%26+peace").expect("parse should succeed");

        assert_eq!(
            parameters.where_parameters()[0],
            FilterClause::basic("title", "war & peace")
        );
    }

    #[test]
    fn segments_without_an_operator_are_rejected() {
        assert_eq!(
            RequestParameters::parse("standalone"),
            Err(ParseError::MalformedParameter("standalone".to_string()))
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        let parameters = RequestParameters::parse("name=foo&&").expect("parse should succeed");
        assert_eq!(parameters.where_parameters().len(), 1);
    }
}
