use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::{AdminError, AdminResult};
use crate::rows::{Collection, Row};

/// A typed record of one collection.
///
/// The associated constants describe how the repository addresses the
/// collection: which column identifies a record for update/delete, which
/// column orders a listing, and which columns may never be patched.
pub trait Record:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const COLLECTION: Collection;
    const MATCH_COLUMN: &'static str;
    const ORDER_COLUMN: &'static str;
    const IMMUTABLE_COLUMNS: &'static [&'static str];

    /// Store-assigned id; `None` until first save.
    fn id(&self) -> Option<&str>;

    /// Value of `MATCH_COLUMN` for this record.
    fn match_key(&self) -> Option<&str>;

    /// Applies a user edit to one field, parsing `value` for typed fields.
    fn set_field(&mut self, field: &str, value: &str) -> AdminResult<()>;

    /// Client-side preconditions checked before create/update.
    fn validate(&self) -> AdminResult<()> {
        Ok(())
    }

    /// Columns sent when a saved draft updates an existing record.
    fn save_fields(&self) -> AdminResult<Row>;

    fn to_row(&self) -> AdminResult<Row> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(_) => Err(AdminError::store(format!(
                "{} record did not encode as an object",
                Self::COLLECTION
            ))),
            Err(err) => Err(AdminError::store(format!(
                "encode {} record: {}",
                Self::COLLECTION,
                err
            ))),
        }
    }

    fn from_row(row: Row) -> AdminResult<Self> {
        serde_json::from_value(serde_json::Value::Object(row)).map_err(|err| {
            AdminError::store(format!("decode {} row: {}", Self::COLLECTION, err))
        })
    }
}

/// Picks the named columns out of an encoded record.
pub(crate) fn pick(row: Row, columns: &[&str]) -> Row {
    row.into_iter()
        .filter(|(k, _)| columns.contains(&k.as_str()))
        .collect()
}

pub(crate) fn not_editable<R: Record>(field: &str) -> AdminError {
    AdminError::validation(format!(
        "field `{}` of {} is not editable",
        field,
        R::COLLECTION
    ))
}
