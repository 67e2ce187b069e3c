//! PostgREST-style query strings: `select=*`, `order=col.asc`, `col=eq.value`.

use siteadmin::rows::{Match, Order};

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct RowQuery {
    pub(super) filter: Option<Match>,
    pub(super) order: Option<Order>,
}

pub(super) fn parse_query(params: &[(String, String)]) -> Result<RowQuery, String> {
    let mut query = RowQuery::default();
    for (key, value) in params {
        match key.as_str() {
            "select" => {
                if value != "*" {
                    return Err(format!("unsupported select `{}` (only `*`)", value));
                }
            }
            "order" => {
                let order = Order::parse_param(value)
                    .ok_or_else(|| format!("invalid order `{}`", value))?;
                query.order = Some(order);
            }
            column => {
                let Some(operand) = value.strip_prefix("eq.") else {
                    return Err(format!(
                        "unsupported filter on `{}` (only `eq.` is supported)",
                        column
                    ));
                };
                if query.filter.is_some() {
                    return Err("only one filter per request is supported".to_string());
                }
                query.filter = Some(Match::on(column, operand));
            }
        }
    }
    Ok(query)
}

#[cfg(test)]
#[path = "../../tests/bin/siteadmin_store/query_tests.rs"]
mod tests;
