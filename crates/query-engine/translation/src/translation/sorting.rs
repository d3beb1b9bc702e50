//! Handle ordering directive translation.

use query_engine_plan::plan::ast::{OrderBy, OrderDirection, OrderElement};

use super::error::Error;

/// Convert a raw order directive to an ORDER BY clause.
///
/// Entries are separated by `|`; each is the literal `random` or
/// `column,direction`. `random` becomes the engine's native random ordering
/// function, so no client-supplied expression ever reaches the store through
/// the order parameter.
pub fn translate_order_by(raw_order: &str) -> Result<OrderBy, Error> {
    let elements = raw_order
        .split('|')
        .filter(|entry| !entry.is_empty())
        .map(translate_order_element)
        .collect::<Result<Vec<OrderElement>, Error>>()?;

    Ok(OrderBy { elements })
}

fn translate_order_element(entry: &str) -> Result<OrderElement, Error> {
    if entry == "random" {
        return Ok(OrderElement::Random);
    }

    match entry.split_once(',') {
        Some((column, direction)) if !column.is_empty() => Ok(OrderElement::Column {
            column: column.to_string(),
            direction: translate_direction(entry, direction)?,
        }),
        _ => Err(Error::MalformedDirective(format!(
            "order entry '{entry}' is missing a direction"
        ))),
    }
}

fn translate_direction(entry: &str, direction: &str) -> Result<OrderDirection, Error> {
    match direction.to_ascii_lowercase().as_str() {
        "asc" => Ok(OrderDirection::Asc),
        "desc" => Ok(OrderDirection::Desc),
        _ => Err(Error::MalformedDirective(format!(
            "order entry '{entry}' has direction '{direction}', expected 'asc' or 'desc'"
        ))),
    }
}
