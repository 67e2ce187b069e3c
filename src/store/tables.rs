//! Table engine behind [`MemoryStore`](super::MemoryStore).

use std::cmp::Ordering;

use serde_json::Value;

use crate::errors::{AdminError, AdminResult};
use crate::rows::{Match, Order, Row};

pub(crate) struct TableSpec {
    pub(crate) name: &'static str,
    pub(crate) unique: &'static [&'static str],
    /// Stamps `updated_at` on insert and on every update.
    pub(crate) timestamped: bool,
}

pub(crate) const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "content_sections",
        unique: &["section_key"],
        timestamped: true,
    },
    TableSpec {
        name: "product_cards",
        unique: &[],
        timestamped: false,
    },
    TableSpec {
        name: "site_settings",
        unique: &["setting_key"],
        timestamped: false,
    },
];

pub(crate) fn spec_for(name: &str) -> AdminResult<&'static TableSpec> {
    TABLES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| AdminError::store(format!("relation \"{}\" does not exist", name)))
}

pub(crate) struct Table {
    pub(crate) spec: &'static TableSpec,
    pub(crate) rows: Vec<Row>,
}

impl Table {
    pub(crate) fn new(spec: &'static TableSpec, rows: Vec<Row>) -> Self {
        Self { spec, rows }
    }

    pub(crate) fn select(&self, filter: Option<&Match>, order: Option<&Order>) -> Vec<Row> {
        let mut out: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| filter.is_none_or(|m| m.matches(r)))
            .cloned()
            .collect();
        if let Some(order) = order {
            // Stable: ties keep insertion order.
            out.sort_by(|a, b| {
                let ord = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        out
    }

    pub(crate) fn insert(&mut self, fields: &Row, id: String, now: &str) -> AdminResult<Row> {
        let mut row = fields.clone();
        match row.get("id") {
            None | Some(Value::Null) => {
                row.insert("id".to_string(), Value::String(id));
            }
            Some(_) => {}
        }
        if self.spec.timestamped {
            row.insert("updated_at".to_string(), Value::String(now.to_string()));
        }

        let mut next = self.rows.clone();
        next.push(row.clone());
        check_unique(self.spec, &next, "id")?;
        for column in self.spec.unique {
            check_unique(self.spec, &next, column)?;
        }
        self.rows = next;
        Ok(row)
    }

    pub(crate) fn update(
        &mut self,
        matching: &Match,
        fields: &Row,
        now: &str,
    ) -> AdminResult<Vec<Row>> {
        let mut next = self.rows.clone();
        let mut touched = Vec::new();
        for row in next.iter_mut().filter(|r| matching.matches(r)) {
            for (k, v) in fields {
                row.insert(k.clone(), v.clone());
            }
            if self.spec.timestamped {
                row.insert("updated_at".to_string(), Value::String(now.to_string()));
            }
            touched.push(row.clone());
        }
        if touched.is_empty() {
            return Ok(touched);
        }
        check_unique(self.spec, &next, "id")?;
        for column in self.spec.unique {
            check_unique(self.spec, &next, column)?;
        }
        self.rows = next;
        Ok(touched)
    }

    pub(crate) fn delete(&mut self, matching: &Match) -> Vec<Row> {
        let (removed, kept): (Vec<Row>, Vec<Row>) =
            self.rows.drain(..).partition(|r| matching.matches(r));
        self.rows = kept;
        removed
    }
}

fn check_unique(spec: &TableSpec, rows: &[Row], column: &str) -> AdminResult<()> {
    let mut seen = std::collections::HashSet::new();
    for row in rows {
        let Some(value) = row.get(column).filter(|v| !v.is_null()) else {
            continue;
        };
        if !seen.insert(value.to_string()) {
            return Err(AdminError::store(format!(
                "duplicate key value violates unique constraint \"{}_{}_key\"",
                spec.name, column
            )));
        }
    }
    Ok(())
}

/// Numbers compare numerically, strings lexicographically, nulls sort last.
pub(crate) fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
#[path = "../tests/store/tables_tests.rs"]
mod tests;
