use super::*;

use siteadmin::remote::PREFER_REPRESENTATION;
use siteadmin::rows::{Match, Row, RowStore};

use super::query::{RowQuery, parse_query};

type Params = Query<Vec<(String, String)>>;

fn wants_rows(headers: &HeaderMap) -> bool {
    headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(PREFER_REPRESENTATION))
}

fn written(status: StatusCode, headers: &HeaderMap, rows: Vec<Row>) -> Response {
    if wants_rows(headers) {
        (status, Json(rows)).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Writes never touch a whole table: a filter is mandatory.
fn required_filter(params: &[(String, String)], verb: &str) -> Result<Match, Response> {
    let RowQuery { filter, .. } = parse_query(params).map_err(|e| bad_request(&e))?;
    filter.ok_or_else(|| bad_request(&format!("{} requires a filter", verb)))
}

pub(super) async fn select_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<Vec<Row>>, Response> {
    require_reader(&state, &headers)?;
    let query = parse_query(&params).map_err(|e| bad_request(&e))?;
    let rows = state
        .store
        .select(&table, query.filter.as_ref(), query.order.as_ref())
        .map_err(store_error)?;
    Ok(Json(rows))
}

pub(super) async fn update_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
    Json(fields): Json<Row>,
) -> Result<Response, Response> {
    let (user, _) = require_user(&state, &headers)?;
    let matching = required_filter(&params, "update")?;
    let rows = state
        .store
        .update(&table, &matching, &fields)
        .map_err(store_error)?;
    tracing::info!(table = %table, user = %user.email, rows = rows.len(), "update");
    Ok(written(StatusCode::OK, &headers, rows))
}

pub(super) async fn insert_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, Response> {
    let (user, _) = require_user(&state, &headers)?;
    let batch: Vec<Row> = match body {
        serde_json::Value::Object(row) => vec![row],
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(row) => Ok(row),
                _ => Err(bad_request("insert body must contain objects")),
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(bad_request("insert body must be an object or array")),
    };

    let inserted = state
        .store
        .insert_many(&table, &batch)
        .map_err(store_error)?;
    tracing::info!(table = %table, user = %user.email, rows = inserted.len(), "insert");
    Ok(written(StatusCode::CREATED, &headers, inserted))
}

pub(super) async fn delete_rows(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Response, Response> {
    let (user, _) = require_user(&state, &headers)?;
    let matching = required_filter(&params, "delete")?;
    let rows = state
        .store
        .delete(&table, &matching)
        .map_err(store_error)?;
    tracing::info!(table = %table, user = %user.email, rows = rows.len(), "delete");
    Ok(written(StatusCode::OK, &headers, rows))
}
