use axum::Router;
use axum::middleware::{self, Next};
use axum::routing::{get, post};

use super::handlers_auth::{current_user, healthz, logout, sign_up, token};
use super::handlers_rest::{delete_rows, insert_rows, select_rows, update_rows};
use super::*;

pub(super) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/v1/signup", post(sign_up))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/user", get(current_user))
        .route(
            "/rest/v1/:table",
            get(select_rows)
                .patch(update_rows)
                .post(insert_rows)
                .delete(delete_rows),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(req: axum::extract::Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let resp = next.run(req).await;
    tracing::debug!(%method, %path, status = %resp.status(), "request");
    resp
}
