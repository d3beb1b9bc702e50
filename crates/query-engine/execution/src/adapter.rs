//! The boundary to the data store.

use async_trait::async_trait;
use serde_json::Value;

use query_engine_plan::plan::ast::QueryPlan;

use crate::error::Error;

/// Executes query plans against the backing store.
///
/// Rows are JSON objects keyed by column or attribute name. Implementations
/// must bind predicate values as query parameters; a plan never carries query
/// text.
#[async_trait]
pub trait ExecutionAdapter: Send + Sync {
    /// Fetch the rows selected by the plan.
    async fn fetch(&self, plan: &QueryPlan) -> Result<Vec<Value>, Error>;

    /// Count the rows matched by the plan.
    async fn count(&self, plan: &QueryPlan) -> Result<u64, Error>;

    /// Compute one requested attribute for one fetched row.
    fn computed_attribute(&self, row: &Value, attribute: &str) -> Result<Value, Error>;
}
