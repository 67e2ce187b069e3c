use std::sync::Arc;

use super::*;
use crate::store::MemoryStore;

fn backend() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Backend whose store cannot be reached.
struct Unreachable;

impl AuthBackend for Unreachable {
    fn sign_in(&self, _: &str, _: &str) -> AdminResult<AuthGrant> {
        Err(AdminError::store("connection refused"))
    }

    fn sign_up(&self, _: &str, _: &str) -> AdminResult<AuthGrant> {
        Err(AdminError::store("connection refused"))
    }

    fn sign_out(&self, _: &str) -> AdminResult<()> {
        Err(AdminError::store("connection refused"))
    }

    fn user(&self, _: &str) -> AdminResult<User> {
        Err(AdminError::store("connection refused"))
    }
}

#[test]
fn pending_session_is_resolving() {
    let session = Session::pending(backend());
    assert_eq!(session.state(), SessionState::Resolving);
    assert!(session.loading());
    assert!(session.current_user().is_none());
}

#[test]
fn init_without_token_is_signed_out() {
    let session = Session::init(backend(), None);
    assert_eq!(session.state(), SessionState::SignedOut);
    assert!(!session.loading());
}

#[test]
fn init_restores_an_accepted_token() -> anyhow::Result<()> {
    let store = backend();
    let grant = store.sign_up("admin@example.com", "hunter22")?;
    let session = Session::init(store, Some(&grant.access_token));
    assert_eq!(session.state(), SessionState::SignedIn);
    assert_eq!(session.current_user(), Some(&grant.user));
    assert_eq!(session.access_token(), Some(grant.access_token.as_str()));
    Ok(())
}

#[test]
fn init_drops_a_rejected_token() {
    let session = Session::init(backend(), Some("stale"));
    assert_eq!(session.state(), SessionState::SignedOut);
    assert!(session.grant().is_none());
}

#[test]
fn init_keeps_resolving_when_the_store_is_unreachable() {
    let session = Session::init(Unreachable, Some("valid-token"));
    assert_eq!(session.state(), SessionState::Resolving);
    assert!(session.loading());
    assert!(matches!(
        session.restore_error(),
        Some(AdminError::Store(_))
    ));
    assert_eq!(
        crate::auth::guard("/content", &session),
        crate::auth::Navigation::Loading
    );
}

#[test]
fn resolve_retries_after_a_transport_failure() -> anyhow::Result<()> {
    let store = backend();
    let grant = store.sign_up("admin@example.com", "hunter22")?;
    let mut session = Session::init(store, Some(&grant.access_token));
    session.resolve(Some("stale"));
    assert_eq!(session.state(), SessionState::SignedOut);
    assert!(session.restore_error().is_none());
    session.resolve(Some(&grant.access_token));
    assert_eq!(session.state(), SessionState::SignedIn);
    Ok(())
}

#[test]
fn sign_up_then_sign_in_through_the_provider() -> anyhow::Result<()> {
    let store = backend();
    let mut session = Session::init(store.clone(), None);
    let email = session.sign_up("admin@example.com", "hunter22")?.email.clone();
    assert_eq!(email, "admin@example.com");
    session.sign_out()?;
    assert_eq!(session.state(), SessionState::SignedOut);

    session.sign_in("admin@example.com", "hunter22")?;
    assert_eq!(session.state(), SessionState::SignedIn);
    Ok(())
}

#[test]
fn empty_credentials_fail_without_calling_the_backend() {
    let mut session = Session::init(backend(), None);
    assert!(matches!(
        session.sign_in("", "pw"),
        Err(AdminError::Auth(_))
    ));
    assert!(matches!(
        session.sign_up("a@b.co", ""),
        Err(AdminError::Auth(_))
    ));
}

#[test]
fn wrong_password_leaves_the_session_signed_out() -> anyhow::Result<()> {
    let store = backend();
    store.sign_up("admin@example.com", "hunter22")?;
    let mut session = Session::init(store, None);
    assert!(session.sign_in("admin@example.com", "nope-nope").is_err());
    assert!(session.current_user().is_none());
    Ok(())
}

#[test]
fn teardown_clears_the_grant_and_revokes_remotely() -> anyhow::Result<()> {
    let store = backend();
    let grant = store.sign_up("admin@example.com", "hunter22")?;
    let mut session = Session::init(store.clone(), Some(&grant.access_token));
    session.teardown()?;
    assert!(session.grant().is_none());
    assert!(store.user_for_token(&grant.access_token).is_none());
    // Nothing left to end.
    session.teardown()?;
    Ok(())
}
