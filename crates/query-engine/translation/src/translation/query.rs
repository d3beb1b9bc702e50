//! Assemble the full query plan from classified request parameters.

use query_engine_plan::plan::ast::{OrderBy, PageLimit, PaginationSpec, QueryPlan, SelectList};
use query_engine_plan::plan::helpers::simple_plan;
use query_engine_request::request::{RequestParameters, StructuralParameter};

use super::error::Error;
use super::filtering;
use super::helpers::Env;
use super::projection;
use super::sorting;

/// Translate the request to a query plan for the given target table.
///
/// Assembly order is not incidental: filters compile first and abort the
/// whole translation on the first unknown column, so no partial plan is ever
/// exposed. Each later stage only depends on state the earlier stages
/// produced.
pub fn translate(
    env: &Env,
    table_name: &str,
    request: &RequestParameters,
) -> Result<QueryPlan, Error> {
    let table = env.lookup_table(table_name)?;

    let mut plan = simple_plan();

    // filters
    plan = filtering::translate_filters(env, table, request.where_parameters(), plan)?;

    // grouping
    if let Some(raw_groups) = request.parameter(StructuralParameter::GroupBy) {
        plan.group_by = projection::split_list(Some(raw_groups))
            .map(str::to_string)
            .collect();
    }

    // limit, and offset when it is nonzero
    let pagination = translate_pagination(env, request)?;
    if let PageLimit::Limited(limit) = pagination.limit {
        plan.limit.limit = Some(limit);
    }
    match pagination.offset() {
        Some(offset) if offset != 0 => plan.limit.offset = Some(offset),
        _ => {}
    }

    // ordering, falling back to the configured default
    plan.order_by = match request.parameter(StructuralParameter::OrderBy) {
        Some(raw_order) => sorting::translate_order_by(raw_order)?,
        None => OrderBy {
            elements: env.options().default_order.clone(),
        },
    };

    // includes and column projection
    let (selection, includes) = projection::translate_columns(
        request.parameter(StructuralParameter::Columns),
        request.parameter(StructuralParameter::Includes),
    )?;
    plan.includes = includes;
    plan.select = if selection.columns.is_empty() {
        SelectList::SelectStar
    } else {
        SelectList::Columns(selection.columns)
    };

    // appends ride along for result enrichment after fetching
    if let Some(raw_appends) = request.parameter(StructuralParameter::Append) {
        plan.appends = projection::split_list(Some(raw_appends))
            .map(str::to_string)
            .collect();
    }

    tracing::info!("query plan: {:?}", plan);
    Ok(plan)
}

/// Resolve the page number and page size for the request, falling back to
/// the configured default limit.
pub fn translate_pagination(
    env: &Env,
    request: &RequestParameters,
) -> Result<PaginationSpec, Error> {
    let page = match request.parameter(StructuralParameter::Page) {
        None => 1,
        Some(raw_page) => raw_page
            .parse::<u64>()
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| {
                Error::MalformedDirective(format!("page '{raw_page}' is not a positive integer"))
            })?,
    };

    let limit = match request.parameter(StructuralParameter::Limit) {
        Some("unlimited") => PageLimit::Unlimited,
        Some(raw_limit) => raw_limit
            .parse::<u64>()
            .ok()
            .filter(|limit| *limit >= 1)
            .map(PageLimit::Limited)
            .ok_or_else(|| {
                Error::MalformedDirective(format!(
                    "limit '{raw_limit}' is not a positive integer or 'unlimited'"
                ))
            })?,
        None => match env.options().default_limit {
            Some(limit) => PageLimit::Limited(limit),
            None => PageLimit::Unlimited,
        },
    };

    Ok(PaginationSpec { page, limit })
}
