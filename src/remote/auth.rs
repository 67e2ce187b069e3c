use super::http_client::decode;
use super::*;
use crate::auth::{AuthBackend, AuthGrant, User};

impl RemoteClient {
    fn credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
        label: &str,
    ) -> AdminResult<AuthGrant> {
        let req = self
            .request(reqwest::Method::POST, path, None)
            .json(&CredentialsRequest {
                email: email.to_string(),
                password: password.to_string(),
            });
        let resp = req
            .send()
            .map_err(|e| AdminError::store(format!("{}: {}", label, e)))?;
        // Credential problems come back as 400/422 with a readable message.
        if resp.status().is_client_error() {
            return Err(AdminError::Auth(super::http_client::error_message(resp)));
        }
        let resp = self.ensure_ok(resp, label)?;
        let token: TokenResponse = decode(resp, label)?;
        Ok(token.into())
    }
}

impl AuthBackend for RemoteClient {
    fn sign_in(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        self.credentials(
            "/auth/v1/token?grant_type=password",
            email,
            password,
            "sign in",
        )
    }

    fn sign_up(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        self.credentials("/auth/v1/signup", email, password, "sign up")
    }

    fn sign_out(&self, access_token: &str) -> AdminResult<()> {
        let req = self.request(reqwest::Method::POST, "/auth/v1/logout", Some(access_token));
        let _ = self.send(req, "sign out")?;
        Ok(())
    }

    fn user(&self, access_token: &str) -> AdminResult<User> {
        let req = self.request(reqwest::Method::GET, "/auth/v1/user", Some(access_token));
        let resp = self.send(req, "get user")?;
        decode(resp, "get user")
    }
}
