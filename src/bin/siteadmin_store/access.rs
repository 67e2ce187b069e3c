use super::*;

use siteadmin::auth::User;

pub(super) const APIKEY_HEADER: &str = "apikey";

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub(super) fn require_apikey(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(key) = headers.get(APIKEY_HEADER).and_then(|v| v.to_str().ok()) else {
        return Err(unauthorized("no api key found in request"));
    };
    if key != state.anon_key {
        return Err(unauthorized("invalid api key"));
    }
    Ok(())
}

/// Reads need the api key. A bearer, when sent, must be the anon key or a
/// live user token.
pub(super) fn require_reader(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    require_apikey(state, headers)?;
    match bearer(headers) {
        None => Ok(()),
        Some(token) if token == state.anon_key => Ok(()),
        Some(token) => state
            .store
            .user_for_token(token)
            .map(|_| ())
            .ok_or_else(|| unauthorized("invalid or expired session")),
    }
}

/// Writes and identity lookups need a signed-in user's token.
pub(super) fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(User, String), Response> {
    require_apikey(state, headers)?;
    let Some(token) = bearer(headers).filter(|t| *t != state.anon_key) else {
        return Err(unauthorized("sign in required"));
    };
    let Some(user) = state.store.user_for_token(token) else {
        return Err(unauthorized("invalid or expired session"));
    };
    Ok((user, token.to_string()))
}
