use super::{AuthBackend, AuthGrant, AuthProvider, User};
use crate::errors::{AdminError, AdminResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Resolving,
    SignedOut,
    SignedIn,
}

/// Explicit auth session. Created on start with [`Session::init`], ended by
/// [`Session::teardown`]; callers pass it to whatever needs the current user.
pub struct Session<B> {
    backend: B,
    resolving: bool,
    grant: Option<AuthGrant>,
    restore_error: Option<AdminError>,
}

impl<B: AuthBackend> Session<B> {
    /// A session that has not resolved yet. [`Session::resolve`] finishes it.
    pub fn pending(backend: B) -> Self {
        Self {
            backend,
            resolving: true,
            grant: None,
            restore_error: None,
        }
    }

    /// Restores `stored_token` if the backend still accepts it.
    pub fn init(backend: B, stored_token: Option<&str>) -> Self {
        let mut session = Self::pending(backend);
        session.resolve(stored_token);
        session
    }

    /// Only an `Auth` rejection drops the token. Any other failure leaves the
    /// session resolving, with the error kept in [`Session::restore_error`],
    /// so a later `resolve` can retry.
    pub fn resolve(&mut self, stored_token: Option<&str>) {
        self.restore_error = None;
        let Some(token) = stored_token else {
            self.grant = None;
            self.resolving = false;
            return;
        };
        match self.backend.user(token) {
            Ok(user) => {
                self.grant = Some(AuthGrant {
                    access_token: token.to_string(),
                    user,
                });
                self.resolving = false;
            }
            Err(AdminError::Auth(msg)) => {
                tracing::warn!("stored session rejected: {}", msg);
                self.grant = None;
                self.resolving = false;
            }
            Err(err) => {
                tracing::warn!("could not restore session: {}", err);
                self.grant = None;
                self.resolving = true;
                self.restore_error = Some(err);
            }
        }
    }

    /// Why the last restore could not reach a verdict on the stored token.
    pub fn restore_error(&self) -> Option<&AdminError> {
        self.restore_error.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.resolving {
            SessionState::Resolving
        } else if self.grant.is_some() {
            SessionState::SignedIn
        } else {
            SessionState::SignedOut
        }
    }

    pub fn grant(&self) -> Option<&AuthGrant> {
        self.grant.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.grant.as_ref().map(|g| g.access_token.as_str())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ends the session. Local state is cleared even when the backend call
    /// fails; the failure is still returned.
    pub fn teardown(&mut self) -> AdminResult<()> {
        let Some(grant) = self.grant.take() else {
            return Ok(());
        };
        self.resolving = false;
        self.backend.sign_out(&grant.access_token)
    }
}

impl<B: AuthBackend> AuthProvider for Session<B> {
    fn current_user(&self) -> Option<&User> {
        self.grant.as_ref().map(|g| &g.user)
    }

    fn loading(&self) -> bool {
        self.resolving
    }

    fn sign_in(&mut self, email: &str, password: &str) -> AdminResult<&User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AdminError::Auth(
                "email and password are required".to_string(),
            ));
        }
        let grant = self.backend.sign_in(email, password)?;
        self.resolving = false;
        self.restore_error = None;
        tracing::info!(user = %grant.user.email, "signed in");
        Ok(&self.grant.insert(grant).user)
    }

    fn sign_up(&mut self, email: &str, password: &str) -> AdminResult<&User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AdminError::Auth(
                "email and password are required".to_string(),
            ));
        }
        let grant = self.backend.sign_up(email, password)?;
        self.resolving = false;
        self.restore_error = None;
        tracing::info!(user = %grant.user.email, "signed up");
        Ok(&self.grant.insert(grant).user)
    }

    fn sign_out(&mut self) -> AdminResult<()> {
        self.teardown()
    }
}

#[cfg(test)]
#[path = "../tests/auth/session_tests.rs"]
mod tests;
