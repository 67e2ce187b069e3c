use super::*;

use siteadmin::errors::AdminError;

pub(super) fn error_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({"error": msg}))).into_response()
}

pub(super) fn unauthorized(msg: &str) -> Response {
    error_response(StatusCode::UNAUTHORIZED, msg)
}

pub(super) fn bad_request(msg: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn internal_error(msg: &str) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
}

/// Maps a store failure onto the status a hosted store would answer with.
pub(super) fn store_error(err: AdminError) -> Response {
    match &err {
        AdminError::Store(msg) if msg.contains("does not exist") => {
            error_response(StatusCode::NOT_FOUND, msg)
        }
        AdminError::Store(msg) if msg.contains("duplicate key") => {
            error_response(StatusCode::CONFLICT, msg)
        }
        AdminError::Store(msg) if msg.contains("lock poisoned") => internal_error(msg),
        AdminError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, &err.to_string()),
        AdminError::Auth(msg) | AdminError::Validation(msg) | AdminError::Store(msg) => {
            bad_request(msg)
        }
        AdminError::BatchSave { .. } => bad_request(&err.to_string()),
    }
}
