//! Handle filtering/where clause translation.

use query_engine_metadata::metadata::{ComparisonOperator, TableInfo};
use query_engine_plan::plan::ast::{Predicate, QueryPlan};
use query_engine_request::request::{FilterClause, FilterKind};

use super::error::Error;
use super::helpers::Env;

/// The sentinel value that turns an equality test into a null test.
pub const NULL_SENTINEL: &str = "[null]";

/// Translate filter clause candidates into predicates on the plan, in input
/// order.
///
/// Excluded keys are skipped silently. A key with a registered custom filter
/// is dispatched to it and bypasses schema validation entirely. Any other key
/// must name a column of the target table, otherwise the whole translation
/// aborts on the spot: unknown columns must never reach the store.
pub fn translate_filters(
    env: &Env,
    table: &TableInfo,
    clauses: &[FilterClause],
    mut plan: QueryPlan,
) -> Result<QueryPlan, Error> {
    for clause in clauses {
        if env.is_excluded(&clause.key) {
            tracing::debug!(key = %clause.key, "skipping excluded parameter");
            continue;
        }

        if let Some(custom_filter) = env.lookup_custom_filter(&clause.key) {
            plan = custom_filter.apply(plan, &clause.value, clause.operator, clause.kind);
            continue;
        }

        if !table.has_column(&clause.key) {
            return Err(Error::UnknownColumn {
                column: clause.key.clone(),
                table: table.table_name.clone(),
            });
        }

        plan.predicates.push(translate_clause(clause));
    }

    Ok(plan)
}

/// Generic resolution of one validated clause by its kind.
fn translate_clause(clause: &FilterClause) -> Predicate {
    let column = clause.key.clone();
    match clause.kind {
        FilterKind::In => Predicate::In {
            column,
            values: clause.value.to_values(),
        },
        FilterKind::NotIn => Predicate::NotIn {
            column,
            values: clause.value.to_values(),
        },
        FilterKind::Basic => {
            let value = clause.value.to_scalar();
            if value == NULL_SENTINEL {
                // the sentinel tests for null rather than comparing literally
                if clause.operator == ComparisonOperator::Equals {
                    Predicate::IsNull { column }
                } else {
                    Predicate::IsNotNull { column }
                }
            } else {
                Predicate::Comparison {
                    column,
                    operator: clause.operator,
                    value,
                }
            }
        }
    }
}
