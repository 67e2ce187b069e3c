use super::*;

use siteadmin::auth::{AuthBackend, AuthGrant, User};
use siteadmin::remote::{CredentialsRequest, TokenResponse};

#[derive(Debug, serde::Deserialize)]
pub(super) struct GrantQuery {
    grant_type: Option<String>,
}

fn token_response(grant: AuthGrant) -> Json<TokenResponse> {
    Json(TokenResponse {
        access_token: grant.access_token,
        token_type: "bearer".to_string(),
        user: grant.user,
    })
}

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn sign_up(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, Response> {
    require_apikey(&state, &headers)?;
    let grant = state
        .store
        .sign_up(&payload.email, &payload.password)
        .map_err(store_error)?;
    tracing::info!(user = %grant.user.email, "sign up");
    Ok(token_response(grant))
}

pub(super) async fn token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<GrantQuery>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, Response> {
    require_apikey(&state, &headers)?;
    if query.grant_type.as_deref() != Some("password") {
        return Err(bad_request("unsupported grant_type (only `password`)"));
    }
    let grant = state
        .store
        .sign_in(&payload.email, &payload.password)
        .map_err(store_error)?;
    tracing::info!(user = %grant.user.email, "sign in");
    Ok(token_response(grant))
}

pub(super) async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, Response> {
    let (user, token) = require_user(&state, &headers)?;
    state.store.sign_out(&token).map_err(store_error)?;
    tracing::info!(user = %user.email, "sign out");
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<User>, Response> {
    let (user, _) = require_user(&state, &headers)?;
    Ok(Json(user))
}
