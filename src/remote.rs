//! HTTP client for the remote row store and its auth endpoints.

use crate::config::StoreConfig;
use crate::errors::{AdminError, AdminResult};

mod auth;
mod http_client;
mod rest;
mod types;

pub use self::types::*;

#[derive(Clone)]
pub struct RemoteClient {
    config: StoreConfig,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    /// `token` is the signed-in user's access token; without it requests
    /// carry only the anon key.
    pub fn new(config: StoreConfig, token: Option<String>) -> AdminResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("siteadmin")
            .build()
            .map_err(|e| AdminError::store(format!("build reqwest client: {}", e)))?;
        Ok(Self {
            config,
            token,
            client,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
