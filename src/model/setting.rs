use serde::{Deserialize, Serialize};

use super::de;
use super::record::{Record, not_editable, pick};
use crate::errors::{AdminError, AdminResult};
use crate::rows::{Collection, Row};

/// Logical type of a setting. Values are always stored as text; any type
/// name outside this set is edited as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Number,
    Boolean,
    #[default]
    #[serde(other)]
    Text,
}

impl SettingType {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingType::Text => "text",
            SettingType::Number => "number",
            SettingType::Boolean => "boolean",
        }
    }

    /// Checks that `value` is a valid stored form for this type.
    pub fn coerce(self, value: &str) -> AdminResult<String> {
        match self {
            SettingType::Text => Ok(value.to_string()),
            SettingType::Number => {
                let trimmed = value.trim();
                trimmed.parse::<f64>().map_err(|_| {
                    AdminError::validation(format!("`{}` is not a number", value))
                })?;
                Ok(trimmed.to_string())
            }
            SettingType::Boolean => match value.trim() {
                "true" => Ok("true".to_string()),
                "false" => Ok("false".to_string()),
                _ => Err(AdminError::validation(format!(
                    "`{}` is not a boolean (expected true or false)",
                    value
                ))),
            },
        }
    }
}

pub fn encode_flag(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

pub fn decode_flag(value: &str) -> bool {
    value == "true"
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetting {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub setting_key: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub setting_value: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub setting_type: SettingType,
}

impl SiteSetting {
    pub fn flag(&self) -> bool {
        decode_flag(&self.setting_value)
    }
}

impl Record for SiteSetting {
    const COLLECTION: Collection = Collection::SiteSettings;
    const MATCH_COLUMN: &'static str = "setting_key";
    const ORDER_COLUMN: &'static str = "setting_key";
    const IMMUTABLE_COLUMNS: &'static [&'static str] = &["id", "setting_key"];

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn match_key(&self) -> Option<&str> {
        Some(&self.setting_key)
    }

    fn set_field(&mut self, field: &str, value: &str) -> AdminResult<()> {
        match field {
            "setting_value" => {
                self.setting_value = self.setting_type.coerce(value)?;
                Ok(())
            }
            other => Err(not_editable::<Self>(other)),
        }
    }

    fn save_fields(&self) -> AdminResult<Row> {
        Ok(pick(self.to_row()?, &["setting_value"]))
    }
}
