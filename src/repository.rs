//! Typed CRUD over one collection of the row store.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::errors::{AdminError, AdminResult};
use crate::model::Record;
use crate::rows::{Match, Order, Row, RowStore};

pub struct Repository<R> {
    store: Arc<dyn RowStore>,
    marker: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            marker: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            store,
            marker: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        R::COLLECTION.table()
    }

    fn not_found(key: &str) -> AdminError {
        AdminError::NotFound {
            collection: R::COLLECTION.table(),
            key: key.to_string(),
        }
    }

    /// Every record, ordered by the collection's sort column.
    pub fn list(&self) -> AdminResult<Vec<R>> {
        let rows = self
            .store
            .select(self.table(), None, Some(&Order::asc(R::ORDER_COLUMN)))?;
        rows.into_iter().map(R::from_row).collect()
    }

    /// Applies `fields` to the record whose match column equals `key` and
    /// returns the record as stored afterwards.
    pub fn update(&self, key: &str, fields: Row) -> AdminResult<R> {
        if let Some(column) = fields
            .keys()
            .find(|k| R::IMMUTABLE_COLUMNS.contains(&k.as_str()))
        {
            return Err(AdminError::validation(format!(
                "`{}` of {} cannot be changed",
                column,
                R::COLLECTION
            )));
        }
        let rows = self
            .store
            .update(self.table(), &Match::on(R::MATCH_COLUMN, key), &fields)?;
        let row = rows.into_iter().next().ok_or_else(|| Self::not_found(key))?;
        R::from_row(row)
    }

    /// Inserts `draft` (its id, if any, is dropped) and returns the stored
    /// record with its assigned id.
    pub fn create(&self, draft: &R) -> AdminResult<R> {
        draft.validate()?;
        let mut fields = draft.to_row()?;
        fields.remove("id");
        let rows = self.store.insert(self.table(), &fields)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            AdminError::store(format!("insert into {} returned no row", R::COLLECTION))
        })?;
        R::from_row(row)
    }

    pub fn delete(&self, key: &str) -> AdminResult<()> {
        let removed = self
            .store
            .delete(self.table(), &Match::on(R::MATCH_COLUMN, key))?;
        if removed.is_empty() {
            return Err(Self::not_found(key));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
