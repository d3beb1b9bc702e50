//! Helpers for processing request parameters and building a plan.

use std::collections::BTreeMap;

use query_engine_metadata::metadata::{ComparisonOperator, Metadata, TableInfo};
use query_engine_plan::plan::ast::QueryPlan;
use query_engine_request::request::{FilterKind, FilterValue};
use restq_configuration::CompilerOptions;

use super::error::Error;

/// Static information for the duration of one translation: the schema
/// metadata, the compiler options and the custom filter registry. All of it
/// is read-only; concurrent requests may share one instance of each.
pub struct Env<'a> {
    metadata: &'a Metadata,
    options: &'a CompilerOptions,
    custom_filters: &'a CustomFilters,
}

impl<'a> Env<'a> {
    /// Create a new Env by supplying the metadata, options and custom
    /// filters.
    pub fn new(
        metadata: &'a Metadata,
        options: &'a CompilerOptions,
        custom_filters: &'a CustomFilters,
    ) -> Env<'a> {
        Env {
            metadata,
            options,
            custom_filters,
        }
    }

    /// Lookup a table's information in the metadata.
    pub fn lookup_table(&self, table_name: &str) -> Result<&'a TableInfo, Error> {
        self.metadata
            .lookup_table(table_name)
            .ok_or_else(|| Error::TableNotFound(table_name.to_string()))
    }

    /// Is this key reserved and never to be treated as a filter?
    pub fn is_excluded(&self, key: &str) -> bool {
        self.options
            .excluded_parameters
            .iter()
            .any(|excluded| excluded == key)
    }

    /// Lookup the custom filter registered for a key, if any.
    pub fn lookup_custom_filter(&self, key: &str) -> Option<&'a dyn CustomFilter> {
        self.custom_filters.lookup(key)
    }

    pub fn options(&self) -> &'a CompilerOptions {
        self.options
    }
}

/// A per-field override that fully replaces generic predicate resolution for
/// its key. The handler owns correctness for that key: no schema validation
/// is performed on its behalf.
pub trait CustomFilter: Send + Sync {
    fn apply(
        &self,
        plan: QueryPlan,
        value: &FilterValue,
        operator: ComparisonOperator,
        kind: FilterKind,
    ) -> QueryPlan;
}

impl<F> CustomFilter for F
where
    F: Fn(QueryPlan, &FilterValue, ComparisonOperator, FilterKind) -> QueryPlan + Send + Sync,
{
    fn apply(
        &self,
        plan: QueryPlan,
        value: &FilterValue,
        operator: ComparisonOperator,
        kind: FilterKind,
    ) -> QueryPlan {
        self(plan, value, operator, kind)
    }
}

/// Custom filters keyed by the parameter name they take over. Populated once
/// at initialization and resolved by lookup per request.
#[derive(Default)]
pub struct CustomFilters(BTreeMap<String, Box<dyn CustomFilter>>);

impl CustomFilters {
    pub fn new() -> Self {
        CustomFilters(BTreeMap::new())
    }

    /// Register a handler for a key, replacing any previous handler.
    pub fn register(&mut self, key: impl Into<String>, filter: impl CustomFilter + 'static) {
        self.0.insert(key.into(), Box::new(filter));
    }

    pub fn lookup(&self, key: &str) -> Option<&dyn CustomFilter> {
        self.0.get(key).map(|filter| filter.as_ref())
    }
}
