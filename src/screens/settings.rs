use std::collections::HashMap;
use std::sync::Arc;

use super::LocalCollection;
use crate::errors::{AdminError, AdminResult};
use crate::model::{SiteSetting, decode_flag, encode_flag};
use crate::repository::Repository;
use crate::rows::{Row, RowStore};
use crate::session::patch;
use crate::views;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsSummary {
    pub total: usize,
    pub categories: usize,
}

/// Settings are edited as a form: every setting has a pending value and one
/// "save all" writes the ones that changed.
pub struct SettingsScreen {
    repo: Repository<SiteSetting>,
    settings: LocalCollection<SiteSetting>,
    pending: HashMap<String, String>,
    message: Option<String>,
}

impl SettingsScreen {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            repo: Repository::new(store),
            settings: LocalCollection::default(),
            pending: HashMap::new(),
            message: None,
        }
    }

    pub fn load(&mut self) -> bool {
        let ok = self.settings.load(&self.repo);
        self.pending = self
            .settings
            .items
            .iter()
            .map(|s| (s.setting_key.clone(), s.setting_value.clone()))
            .collect();
        ok
    }

    pub fn loading(&self) -> bool {
        self.settings.loading
    }

    pub fn settings(&self) -> &[SiteSetting] {
        &self.settings.items
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Pending value of `key`, or empty when there is none.
    pub fn value(&self, key: &str) -> &str {
        self.pending.get(key).map(String::as_str).unwrap_or("")
    }

    /// Checkbox state for a boolean setting.
    pub fn flag(&self, key: &str) -> bool {
        decode_flag(self.value(key))
    }

    fn setting(&self, key: &str) -> AdminResult<&SiteSetting> {
        self.settings
            .find_by_key(key)
            .ok_or_else(|| AdminError::NotFound {
                collection: "site_settings",
                key: key.to_string(),
            })
    }

    /// Sets the pending value, checked against the setting's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> AdminResult<()> {
        let coerced = self.setting(key)?.setting_type.coerce(value)?;
        self.pending.insert(key.to_string(), coerced);
        Ok(())
    }

    pub fn set_flag(&mut self, key: &str, flag: bool) -> AdminResult<()> {
        self.set_value(key, encode_flag(flag))
    }

    /// Keys whose pending value differs from the stored one, in list order.
    pub fn modified_keys(&self) -> Vec<String> {
        self.settings
            .items
            .iter()
            .filter(|s| {
                self.pending
                    .get(&s.setting_key)
                    .is_some_and(|v| v != &s.setting_value)
            })
            .map(|s| s.setting_key.clone())
            .collect()
    }

    pub fn grouped(&self) -> Vec<(&'static str, Vec<&SiteSetting>)> {
        views::group_settings(&self.settings.items)
    }

    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            total: self.settings.items.len(),
            categories: self.grouped().len(),
        }
    }

    /// Writes every modified setting concurrently and returns how many were
    /// saved.
    ///
    /// The local list is patched only when every update succeeds. On partial
    /// failure the error lists both the failed keys and the keys the store
    /// accepted, and nothing is patched locally.
    pub fn save_all(&mut self) -> AdminResult<usize> {
        let changes: Vec<(String, String)> = self
            .modified_keys()
            .into_iter()
            .map(|k| {
                let v = self.value(&k).to_string();
                (k, v)
            })
            .collect();
        if changes.is_empty() {
            self.message = Some("No changes to save.".to_string());
            return Ok(0);
        }

        let repo = &self.repo;
        let results: Vec<(String, AdminResult<SiteSetting>)> = std::thread::scope(|s| {
            let handles: Vec<_> = changes
                .iter()
                .map(|(key, value)| {
                    let key = key.clone();
                    let value = value.clone();
                    s.spawn(move || {
                        let mut fields = Row::new();
                        fields.insert("setting_value".to_string(), value.into());
                        let res = repo.update(&key, fields);
                        (key, res)
                    })
                })
                .collect();
            handles
                .into_iter()
                .zip(changes.iter())
                .map(|(h, (key, _))| {
                    h.join().unwrap_or_else(|_| {
                        (key.clone(), Err(AdminError::store("update thread panicked")))
                    })
                })
                .collect()
        });

        let mut stored = Vec::new();
        let mut failed = Vec::new();
        let mut applied = Vec::new();
        for (key, res) in results {
            match res {
                Ok(setting) => {
                    applied.push(key);
                    stored.push(setting);
                }
                Err(err) => failed.push((key, err.to_string())),
            }
        }

        if !failed.is_empty() {
            tracing::error!(
                failed = failed.len(),
                applied = applied.len(),
                "error saving settings"
            );
            self.message = Some("Error saving settings. Please try again.".to_string());
            return Err(AdminError::BatchSave { failed, applied });
        }

        let saved = stored.len();
        for setting in stored {
            patch(&mut self.settings.items, setting);
        }
        self.message = Some("Settings saved successfully!".to_string());
        tracing::info!(saved, "settings saved");
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "../tests/screens/settings_tests.rs"]
mod tests;
