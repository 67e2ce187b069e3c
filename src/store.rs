//! In-process row store.
//!
//! `MemoryStore` implements the same contract as the remote store: it backs
//! the `siteadmin-store` development server and is used directly in tests.
//! When opened on a data directory every mutation is written through to
//! `tables/<name>.json` (and `users.json` / `tokens.json` for identity).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;

use crate::auth::{AuthBackend, AuthGrant, User};
use crate::errors::{AdminError, AdminResult};
use crate::rows::{Match, Order, Row, RowStore};

mod identity;
mod seed;
mod tables;

use self::identity::{Identity, StoredToken, StoredUser};
use self::tables::{TABLES, Table, spec_for};

pub(crate) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(crate) fn random_hex(len: usize) -> AdminResult<String> {
    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| AdminError::store(format!("getrandom: {:?}", e)))?;
    let mut out = String::with_capacity(len * 2);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
    identity: Mutex<Identity>,
    data_dir: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty tables, nothing on disk.
    pub fn new() -> Self {
        let tables = TABLES
            .iter()
            .map(|spec| (spec.name, Table::new(spec, Vec::new())))
            .collect();
        Self {
            tables: Mutex::new(tables),
            identity: Mutex::new(Identity::default()),
            data_dir: None,
        }
    }

    /// Tables filled with the starter dataset, nothing on disk.
    pub fn seeded() -> AdminResult<Self> {
        let store = Self::new();
        {
            let mut tables = store.lock_tables()?;
            for table in tables.values_mut() {
                seed_table(table)?;
            }
        }
        Ok(store)
    }

    /// Loads tables and identity from `data_dir`. Tables with no file yet
    /// start empty, or with the starter dataset when `seed` is set.
    pub fn open(data_dir: &Path, seed: bool) -> AdminResult<Self> {
        let mut tables = HashMap::new();
        let mut fresh = Vec::new();
        for spec in TABLES {
            let path = table_path(data_dir, spec.name);
            let mut table = Table::new(spec, Vec::new());
            if path.exists() {
                table.rows = read_json(&path).map_err(to_store_error)?;
            } else {
                if seed {
                    seed_table(&mut table)?;
                }
                fresh.push(spec.name);
            }
            tables.insert(spec.name, table);
        }

        let users: Vec<StoredUser> = read_json_or_default(&data_dir.join("users.json"))?;
        let tokens: Vec<StoredToken> = read_json_or_default(&data_dir.join("tokens.json"))?;

        let store = Self {
            tables: Mutex::new(tables),
            identity: Mutex::new(Identity::from_parts(users, tokens)),
            data_dir: Some(data_dir.to_path_buf()),
        };
        {
            let tables = store.lock_tables()?;
            for name in fresh {
                if let Some(table) = tables.get(name) {
                    store.persist_table(table)?;
                }
            }
        }
        tracing::debug!(data_dir = %data_dir.display(), "opened store");
        Ok(store)
    }

    /// Inserts every row of `batch` or none of them.
    pub fn insert_many(&self, table: &str, batch: &[Row]) -> AdminResult<Vec<Row>> {
        let now = now_ts();
        let ids = batch
            .iter()
            .map(|_| random_hex(16))
            .collect::<AdminResult<Vec<_>>>()?;
        self.with_table(table, true, |t| {
            batch
                .iter()
                .zip(ids)
                .map(|(row, id)| t.insert(row, id, &now))
                .collect()
        })
    }

    pub fn user_for_token(&self, token: &str) -> Option<User> {
        self.identity.lock().ok()?.user_for_token(token)
    }

    fn lock_tables(&self) -> AdminResult<MutexGuard<'_, HashMap<&'static str, Table>>> {
        self.tables
            .lock()
            .map_err(|_| AdminError::store("table lock poisoned"))
    }

    fn lock_identity(&self) -> AdminResult<MutexGuard<'_, Identity>> {
        self.identity
            .lock()
            .map_err(|_| AdminError::store("identity lock poisoned"))
    }

    fn persist_table(&self, table: &Table) -> AdminResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        write_json(&table_path(dir, table.spec.name), &table.rows).map_err(to_store_error)
    }

    fn persist_identity(&self, identity: &Identity) -> AdminResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let mut users: Vec<&StoredUser> = identity.users.values().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        let mut tokens: Vec<&StoredToken> = identity.tokens.values().collect();
        tokens.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json(&dir.join("users.json"), &users).map_err(to_store_error)?;
        write_json(&dir.join("tokens.json"), &tokens).map_err(to_store_error)
    }

    fn with_table<T>(
        &self,
        name: &str,
        mutate: bool,
        f: impl FnOnce(&mut Table) -> AdminResult<T>,
    ) -> AdminResult<T> {
        let spec = spec_for(name)?;
        let mut tables = self.lock_tables()?;
        let table = tables
            .get_mut(spec.name)
            .ok_or_else(|| AdminError::store(format!("relation \"{}\" does not exist", name)))?;
        if !mutate {
            return f(table);
        }
        // A write that does not reach disk is not applied in memory either.
        let before = table.rows.clone();
        let out = f(table).and_then(|out| self.persist_table(table).map(|()| out));
        if out.is_err() {
            table.rows = before;
        }
        out
    }

    fn with_identity<T>(&self, f: impl FnOnce(&mut Identity) -> AdminResult<T>) -> AdminResult<T> {
        let mut identity = self.lock_identity()?;
        let before = identity.clone();
        let out = f(&mut identity).and_then(|out| self.persist_identity(&identity).map(|()| out));
        if out.is_err() {
            *identity = before;
        }
        out
    }
}

impl RowStore for MemoryStore {
    fn select(
        &self,
        table: &str,
        filter: Option<&Match>,
        order: Option<&Order>,
    ) -> AdminResult<Vec<Row>> {
        self.with_table(table, false, |t| Ok(t.select(filter, order)))
    }

    fn update(&self, table: &str, matching: &Match, fields: &Row) -> AdminResult<Vec<Row>> {
        let now = now_ts();
        self.with_table(table, true, |t| t.update(matching, fields, &now))
    }

    fn insert(&self, table: &str, fields: &Row) -> AdminResult<Vec<Row>> {
        let now = now_ts();
        let id = random_hex(16)?;
        self.with_table(table, true, |t| Ok(vec![t.insert(fields, id, &now)?]))
    }

    fn delete(&self, table: &str, matching: &Match) -> AdminResult<Vec<Row>> {
        self.with_table(table, true, |t| Ok(t.delete(matching)))
    }
}

impl AuthBackend for MemoryStore {
    fn sign_in(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        self.with_identity(|id| id.sign_in(email, password))
    }

    fn sign_up(&self, email: &str, password: &str) -> AdminResult<AuthGrant> {
        self.with_identity(|id| id.sign_up(email, password))
    }

    fn sign_out(&self, access_token: &str) -> AdminResult<()> {
        self.with_identity(|id| id.sign_out(access_token))
    }

    fn user(&self, access_token: &str) -> AdminResult<User> {
        self.user_for_token(access_token)
            .ok_or_else(|| AdminError::Auth("invalid or expired session".to_string()))
    }
}

fn seed_table(table: &mut Table) -> AdminResult<()> {
    let now = now_ts();
    for row in seed::rows_for(table.spec.name) {
        table.insert(&row, random_hex(16)?, &now)?;
    }
    Ok(())
}

fn table_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join("tables").join(format!("{}.json", name))
}

fn to_store_error(err: anyhow::Error) -> AdminError {
    AdminError::store(format!("{:#}", err))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn read_json_or_default<T: serde::de::DeserializeOwned + Default>(path: &Path) -> AdminResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path).map_err(to_store_error)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize json")?;
    write_atomic(path, &bytes)
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store/memory_store_tests.rs"]
mod tests;
