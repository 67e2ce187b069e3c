//! Wire payloads for the store's REST and auth endpoints.

use crate::auth::{AuthGrant, User};

/// Asks the store to answer writes with the affected rows.
pub const PREFER_REPRESENTATION: &str = "return=representation";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user: User,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl From<TokenResponse> for AuthGrant {
    fn from(t: TokenResponse) -> Self {
        AuthGrant {
            access_token: t.access_token,
            user: t.user,
        }
    }
}

/// Error bodies come as `{"error": ...}`, `{"message": ...}` or `{"msg": ...}`.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            ..Self::default()
        }
    }

    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).or(self.msg)
    }
}
