use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{now_ts, random_hex};
use crate::auth::{AuthGrant, User};
use crate::errors::{AdminError, AdminResult};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct StoredUser {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) salt: String,
    pub(crate) password_hash: String,
    pub(crate) created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct StoredToken {
    pub(crate) token_hash: String,
    pub(crate) user_id: String,
    pub(crate) created_at: String,
}

#[derive(Clone, Default)]
pub(crate) struct Identity {
    pub(crate) users: HashMap<String, StoredUser>,
    /// Keyed by token hash; secrets are never stored.
    pub(crate) tokens: HashMap<String, StoredToken>,
}

pub(crate) fn hash_token(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut h = blake3::Hasher::new();
    h.update(salt.as_bytes());
    h.update(b"\n");
    h.update(password.as_bytes());
    h.finalize().to_hex().to_string()
}

fn normalize_email(email: &str) -> AdminResult<String> {
    let email = email.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AdminError::Auth("invalid email address".to_string())),
    }
}

impl Identity {
    pub(crate) fn from_parts(users: Vec<StoredUser>, tokens: Vec<StoredToken>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            tokens: tokens
                .into_iter()
                .map(|t| (t.token_hash.clone(), t))
                .collect(),
        }
    }

    pub(crate) fn sign_up(&mut self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        let email = normalize_email(email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AdminError::Auth(format!(
                "password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.users.values().any(|u| u.email == email) {
            return Err(AdminError::Auth("user already registered".to_string()));
        }

        let salt = random_hex(16)?;
        let user = StoredUser {
            id: random_hex(16)?,
            email,
            password_hash: hash_password(&salt, password),
            salt,
            created_at: now_ts(),
        };
        self.users.insert(user.id.clone(), user.clone());
        self.issue_token(&user)
    }

    pub(crate) fn sign_in(&mut self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        let email = normalize_email(email)?;
        let user = self
            .users
            .values()
            .find(|u| u.email == email)
            .filter(|u| u.password_hash == hash_password(&u.salt, password))
            .cloned()
            .ok_or_else(|| AdminError::Auth("invalid login credentials".to_string()))?;
        self.issue_token(&user)
    }

    pub(crate) fn sign_out(&mut self, token: &str) -> AdminResult<()> {
        match self.tokens.remove(&hash_token(token)) {
            Some(_) => Ok(()),
            None => Err(AdminError::Auth("session not found".to_string())),
        }
    }

    pub(crate) fn user_for_token(&self, token: &str) -> Option<User> {
        let t = self.tokens.get(&hash_token(token))?;
        let u = self.users.get(&t.user_id)?;
        Some(User {
            id: u.id.clone(),
            email: u.email.clone(),
        })
    }

    fn issue_token(&mut self, user: &StoredUser) -> AdminResult<AuthGrant> {
        let secret = random_hex(32)?;
        let token_hash = hash_token(&secret);
        self.tokens.insert(
            token_hash.clone(),
            StoredToken {
                token_hash,
                user_id: user.id.clone(),
                created_at: now_ts(),
            },
        );
        Ok(AuthGrant {
            access_token: secret,
            user: User {
                id: user.id.clone(),
                email: user.email.clone(),
            },
        })
    }
}
