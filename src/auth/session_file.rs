use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AuthGrant;
use crate::store::write_atomic;

const SESSION_FILE: &str = "session.json";

/// Signed-in session as persisted between CLI invocations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub version: u32,
    /// Store the grant was issued by; a session is not reused elsewhere.
    pub base_url: String,
    pub grant: AuthGrant,
}

#[derive(Clone, Debug)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn in_dir(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).context("read session.json")?;
        let stored: StoredSession =
            serde_json::from_slice(&bytes).context("parse session.json")?;
        if stored.version != 1 {
            anyhow::bail!("unsupported session.json version {}", stored.version);
        }
        Ok(Some(stored))
    }

    /// Token for `base_url`, if the stored session was issued by it.
    pub fn token_for(&self, base_url: &str) -> Result<Option<String>> {
        Ok(self
            .load()?
            .filter(|s| s.base_url == base_url)
            .map(|s| s.grant.access_token))
    }

    pub fn save(&self, base_url: &str, grant: &AuthGrant) -> Result<()> {
        let stored = StoredSession {
            version: 1,
            base_url: base_url.to_string(),
            grant: grant.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&stored).context("serialize session")?;
        write_atomic(&self.path, &bytes).context("write session.json")?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
