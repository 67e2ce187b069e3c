//! Store double for unit tests: records every call and fails on request.

use std::sync::{Arc, Mutex};

use crate::errors::{AdminError, AdminResult};
use crate::rows::{Match, Order, Row, RowStore};
use crate::store::MemoryStore;

pub(crate) struct ScriptedStore {
    pub(crate) inner: MemoryStore,
    calls: Mutex<Vec<String>>,
    fail_select: bool,
    fail_delete: bool,
    fail_updates_for: Vec<String>,
}

impl ScriptedStore {
    pub(crate) fn seeded() -> Self {
        Self::wrap(MemoryStore::seeded().expect("seed store"))
    }

    pub(crate) fn empty() -> Self {
        Self::wrap(MemoryStore::new())
    }

    fn wrap(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_select: false,
            fail_delete: false,
            fail_updates_for: Vec::new(),
        }
    }

    pub(crate) fn failing_select(mut self) -> Self {
        self.fail_select = true;
        self
    }

    pub(crate) fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Updates whose match value is one of `values` are recorded, then fail.
    pub(crate) fn failing_update_for(mut self, values: &[&str]) -> Self {
        self.fail_updates_for = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub(crate) fn shared(self) -> (Arc<ScriptedStore>, Arc<dyn RowStore>) {
        let s = Arc::new(self);
        let dynamic: Arc<dyn RowStore> = s.clone();
        (s, dynamic)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl RowStore for ScriptedStore {
    fn select(
        &self,
        table: &str,
        filter: Option<&Match>,
        order: Option<&Order>,
    ) -> AdminResult<Vec<Row>> {
        self.record(format!("select {}", table));
        if self.fail_select {
            return Err(AdminError::store("select refused"));
        }
        self.inner.select(table, filter, order)
    }

    fn update(&self, table: &str, matching: &Match, fields: &Row) -> AdminResult<Vec<Row>> {
        self.record(format!(
            "update {} {}={}",
            table, matching.column, matching.value
        ));
        if self.fail_updates_for.contains(&matching.value) {
            return Err(AdminError::store(format!("update {} refused", matching.value)));
        }
        self.inner.update(table, matching, fields)
    }

    fn insert(&self, table: &str, fields: &Row) -> AdminResult<Vec<Row>> {
        self.record(format!("insert {}", table));
        self.inner.insert(table, fields)
    }

    fn delete(&self, table: &str, matching: &Match) -> AdminResult<Vec<Row>> {
        self.record(format!(
            "delete {} {}={}",
            table, matching.column, matching.value
        ));
        if self.fail_delete {
            return Err(AdminError::store("delete refused"));
        }
        self.inner.delete(table, matching)
    }
}
