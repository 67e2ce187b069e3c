//! Row-level contract with the remote store: four verbs over named tables.

use std::fmt;

use crate::errors::AdminResult;

pub type Row = serde_json::Map<String, serde_json::Value>;

/// The collections the console manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    ContentSections,
    ProductCards,
    SiteSettings,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Collection::ContentSections => "content_sections",
            Collection::ProductCards => "product_cards",
            Collection::SiteSettings => "site_settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Equality filter on one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub column: String,
    pub value: String,
}

impl Match {
    pub fn on(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Compares against a JSON cell; numbers and booleans match their text form.
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(serde_json::Value::String(s)) => s == &self.value,
            Some(serde_json::Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// `col.asc` / `col.desc` form used on the wire.
    pub fn to_param(&self) -> String {
        format!(
            "{}.{}",
            self.column,
            if self.ascending { "asc" } else { "desc" }
        )
    }

    pub fn parse_param(s: &str) -> Option<Self> {
        let (column, dir) = match s.rsplit_once('.') {
            Some((c, "asc")) => (c, true),
            Some((c, "desc")) => (c, false),
            _ => (s, true),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_string(),
            ascending: dir,
        })
    }
}

/// A row-oriented store. Every call is one request/response round trip.
pub trait RowStore: Send + Sync {
    fn select(
        &self,
        table: &str,
        filter: Option<&Match>,
        order: Option<&Order>,
    ) -> AdminResult<Vec<Row>>;

    /// Returns the rows as they are after the update.
    fn update(&self, table: &str, matching: &Match, fields: &Row) -> AdminResult<Vec<Row>>;

    /// Returns the inserted rows including store-assigned columns.
    fn insert(&self, table: &str, fields: &Row) -> AdminResult<Vec<Row>>;

    /// Returns the removed rows.
    fn delete(&self, table: &str, matching: &Match) -> AdminResult<Vec<Row>>;
}

impl<S: RowStore + ?Sized> RowStore for std::sync::Arc<S> {
    fn select(
        &self,
        table: &str,
        filter: Option<&Match>,
        order: Option<&Order>,
    ) -> AdminResult<Vec<Row>> {
        (**self).select(table, filter, order)
    }

    fn update(&self, table: &str, matching: &Match, fields: &Row) -> AdminResult<Vec<Row>> {
        (**self).update(table, matching, fields)
    }

    fn insert(&self, table: &str, fields: &Row) -> AdminResult<Vec<Row>> {
        (**self).insert(table, fields)
    }

    fn delete(&self, table: &str, matching: &Match) -> AdminResult<Vec<Row>> {
        (**self).delete(table, matching)
    }
}
