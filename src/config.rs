use serde::{Deserialize, Serialize};

use crate::errors::{AdminError, AdminResult};

pub const URL_ENV: &str = "SITEADMIN_URL";
pub const ANON_KEY_ENV: &str = "SITEADMIN_ANON_KEY";

/// Where the remote store lives and the public key every request carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(base_url: Option<&str>, anon_key: Option<&str>) -> AdminResult<Self> {
        let base_url = base_url.map(str::trim).filter(|s| !s.is_empty());
        let anon_key = anon_key.map(str::trim).filter(|s| !s.is_empty());
        let (Some(base_url), Some(anon_key)) = (base_url, anon_key) else {
            return Err(AdminError::validation(format!(
                "missing store environment variables ({}, {})",
                URL_ENV, ANON_KEY_ENV
            )));
        };
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AdminError::validation(format!(
                "store url must start with http:// or https:// (got {})",
                base_url
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
