use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::de;
use super::record::{Record, not_editable, pick};
use crate::errors::{AdminError, AdminResult};
use crate::rows::{Collection, Row};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Sunset,
    Pivoted,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Sunset => "SUNSET",
            ProductStatus::Pivoted => "PIVOTED",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(ProductStatus::Active),
            "SUNSET" => Ok(ProductStatus::Sunset),
            "PIVOTED" => Ok(ProductStatus::Pivoted),
            _ => Err(AdminError::validation(format!(
                "unknown product status `{}` (expected ACTIVE, SUNSET or PIVOTED)",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    #[serde(
        default,
        deserialize_with = "de::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub description: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub cycle_info: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub modal_content: String,
    #[serde(default = "first_position", deserialize_with = "de::position")]
    pub sort_order: i64,
}

pub(crate) const FIRST_POSITION: i64 = 1;

fn first_position() -> i64 {
    FIRST_POSITION
}

const EDITABLE: &[&str] = &[
    "title",
    "description",
    "status",
    "cycle_info",
    "image_url",
    "modal_content",
    "sort_order",
];

impl ProductCard {
    /// Blank card placed after `existing` cards.
    pub fn draft(existing: usize) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            status: ProductStatus::Active,
            cycle_info: String::new(),
            image_url: String::new(),
            modal_content: String::new(),
            sort_order: existing as i64 + 1,
        }
    }
}

pub(crate) fn parse_sort_order(value: &str) -> AdminResult<i64> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| AdminError::validation(format!("sort_order `{}` is not an integer", value)))?;
    if n < 1 {
        return Err(AdminError::validation(format!(
            "sort_order must be at least 1, got {}",
            n
        )));
    }
    Ok(n)
}

impl Record for ProductCard {
    const COLLECTION: Collection = Collection::ProductCards;
    const MATCH_COLUMN: &'static str = "id";
    const ORDER_COLUMN: &'static str = "sort_order";
    const IMMUTABLE_COLUMNS: &'static [&'static str] = &["id"];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn match_key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_field(&mut self, field: &str, value: &str) -> AdminResult<()> {
        match field {
            "title" => self.title = value.to_string(),
            "description" => self.description = value.to_string(),
            "status" => self.status = value.parse()?,
            "cycle_info" => self.cycle_info = value.to_string(),
            "image_url" => self.image_url = value.to_string(),
            "modal_content" => self.modal_content = value.to_string(),
            "sort_order" => self.sort_order = parse_sort_order(value)?,
            other => return Err(not_editable::<Self>(other)),
        }
        Ok(())
    }

    fn validate(&self) -> AdminResult<()> {
        if self.title.trim().is_empty() {
            return Err(AdminError::validation("product title is required"));
        }
        if self.sort_order < 1 {
            return Err(AdminError::validation(format!(
                "sort_order must be at least 1, got {}",
                self.sort_order
            )));
        }
        Ok(())
    }

    fn save_fields(&self) -> AdminResult<Row> {
        Ok(pick(self.to_row()?, EDITABLE))
    }
}

#[cfg(test)]
#[path = "../tests/model/product_tests.rs"]
mod tests;
