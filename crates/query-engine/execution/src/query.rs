//! Execute a query plan through an execution adapter.

use serde::Serialize;
use serde_json::Value;
use tracing::{info_span, Instrument};

use query_engine_plan::plan::ast::{PageLimit, PaginationSpec, QueryPlan};

use crate::adapter::ExecutionAdapter;
use crate::error::Error;

/// One page of results plus the bookkeeping needed to render page links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub items: Vec<Value>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub links: PageLinks,
}

/// Relative links to the neighboring pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Fetch every row selected by the plan and attach the requested computed
/// attributes.
pub async fn execute<A>(adapter: &A, plan: &QueryPlan) -> Result<Vec<Value>, Error>
where
    A: ExecutionAdapter + ?Sized,
{
    let rows = adapter
        .fetch(plan)
        .instrument(info_span!("fetch rows"))
        .await?;

    add_appends(adapter, rows, &plan.appends)
}

/// Fetch one page of results.
///
/// Pagination needs a finite page size, so an unlimited limit is rejected
/// outright. The total is counted once against the filtered plan before
/// limit and offset apply; a zero total short-circuits to an empty page
/// without issuing the paged fetch.
pub async fn paginate<A>(
    adapter: &A,
    plan: &QueryPlan,
    pagination: &PaginationSpec,
    query_string: &str,
) -> Result<PageResult, Error>
where
    A: ExecutionAdapter + ?Sized,
{
    let per_page = match pagination.limit {
        PageLimit::Limited(limit) => limit,
        PageLimit::Unlimited => return Err(Error::UnlimitedPagination),
    };

    let unpaginated = plan.without_pagination();
    let total = adapter
        .count(&unpaginated)
        .instrument(info_span!("count rows"))
        .await?;

    let items = if total == 0 {
        vec![]
    } else {
        let page_plan = unpaginated.for_page(pagination.page, per_page);
        let rows = adapter
            .fetch(&page_plan)
            .instrument(info_span!("fetch page"))
            .await?;
        add_appends(adapter, rows, &plan.appends)?
    };

    let last_page = total.div_ceil(per_page);

    Ok(PageResult {
        items,
        total,
        per_page,
        current_page: pagination.page,
        last_page,
        links: page_links(query_string, pagination.page, last_page),
    })
}

/// Attach each requested computed attribute to each row, preserving row
/// order.
fn add_appends<A>(adapter: &A, rows: Vec<Value>, appends: &[String]) -> Result<Vec<Value>, Error>
where
    A: ExecutionAdapter + ?Sized,
{
    if appends.is_empty() {
        return Ok(rows);
    }

    rows.into_iter()
        .map(|mut row| {
            for attribute in appends {
                let value = adapter.computed_attribute(&row, attribute)?;
                if let Value::Object(fields) = &mut row {
                    fields.insert(attribute.clone(), value);
                }
            }
            Ok(row)
        })
        .collect()
}

/// Build the neighboring page links from the canonical query string.
fn page_links(query_string: &str, current_page: u64, last_page: u64) -> PageLinks {
    let link = |page: u64| {
        if query_string.is_empty() {
            format!("?page={page}")
        } else {
            format!("?{query_string}&page={page}")
        }
    };

    PageLinks {
        next: (current_page < last_page).then(|| link(current_page + 1)),
        previous: (current_page > 1).then(|| link(current_page - 1)),
    }
}
