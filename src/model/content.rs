use serde::{Deserialize, Serialize};

use super::de;
use super::record::{Record, not_editable, pick};
use crate::errors::AdminResult;
use crate::rows::{Collection, Row};

/// A named block of site copy.
///
/// `content` may contain markup. Nothing in this crate sanitizes it; a surface
/// that renders it as markup is responsible for doing so.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub section_key: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub content_type: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub updated_at: String,
}

impl Record for ContentSection {
    const COLLECTION: Collection = Collection::ContentSections;
    const MATCH_COLUMN: &'static str = "section_key";
    const ORDER_COLUMN: &'static str = "section_key";
    const IMMUTABLE_COLUMNS: &'static [&'static str] = &["id", "section_key", "updated_at"];

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn match_key(&self) -> Option<&str> {
        Some(&self.section_key)
    }

    fn set_field(&mut self, field: &str, value: &str) -> AdminResult<()> {
        match field {
            "content" => {
                self.content = value.to_string();
                Ok(())
            }
            other => Err(not_editable::<Self>(other)),
        }
    }

    fn save_fields(&self) -> AdminResult<Row> {
        Ok(pick(self.to_row()?, &["content"]))
    }
}
