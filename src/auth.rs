//! Sign-in state and the route guard built on it.

use serde::{Deserialize, Serialize};

use crate::errors::AdminResult;

mod guard;
mod session;
mod session_file;

pub use self::guard::{Navigation, Route, guard};
pub use self::session::{Session, SessionState};
pub use self::session_file::{SessionFile, StoredSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A granted session: bearer token plus the user it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub access_token: String,
    pub user: User,
}

/// Identity endpoints of the remote store.
pub trait AuthBackend: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> AdminResult<AuthGrant>;
    fn sign_up(&self, email: &str, password: &str) -> AdminResult<AuthGrant>;
    fn sign_out(&self, access_token: &str) -> AdminResult<()>;
    /// Resolves the user behind a token.
    fn user(&self, access_token: &str) -> AdminResult<User>;
}

impl<T: AuthBackend + ?Sized> AuthBackend for std::sync::Arc<T> {
    fn sign_in(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        (**self).sign_in(email, password)
    }

    fn sign_up(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        (**self).sign_up(email, password)
    }

    fn sign_out(&self, access_token: &str) -> AdminResult<()> {
        (**self).sign_out(access_token)
    }

    fn user(&self, access_token: &str) -> AdminResult<User> {
        (**self).user(access_token)
    }
}

/// What screens and the route guard may ask of authentication.
pub trait AuthProvider {
    fn current_user(&self) -> Option<&User>;
    /// True while the session is still being resolved.
    fn loading(&self) -> bool;
    fn sign_in(&mut self, email: &str, password: &str) -> AdminResult<&User>;
    fn sign_up(&mut self, email: &str, password: &str) -> AdminResult<&User>;
    fn sign_out(&mut self) -> AdminResult<()>;
}
