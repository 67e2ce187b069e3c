//! Per-screen controllers: each owns its local copy of a collection.

use crate::model::Record;
use crate::repository::Repository;

mod content;
mod dashboard;
mod products;
mod settings;

pub use self::content::{ContentScreen, SectionRow};
pub use self::dashboard::{DashboardStats, QUICK_ACTIONS, QuickAction, load_stats};
pub use self::products::{DeleteOutcome, ProductScreen};
pub use self::settings::{SettingsScreen, SettingsSummary};

/// A screen's in-memory copy of one collection.
#[derive(Debug)]
pub struct LocalCollection<R> {
    pub items: Vec<R>,
    /// True until the first load resolves, successfully or not.
    pub loading: bool,
}

impl<R> Default for LocalCollection<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
        }
    }
}

impl<R: Record> LocalCollection<R> {
    /// Replaces the local copy with a full listing. A failed listing is
    /// logged and leaves the collection empty.
    pub fn load(&mut self, repo: &Repository<R>) -> bool {
        let ok = match repo.list() {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(err) => {
                tracing::error!("error loading {}: {}", R::COLLECTION, err);
                self.items.clear();
                false
            }
        };
        self.loading = false;
        ok
    }

    pub fn find_by_id(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == Some(id))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&R> {
        self.items.iter().find(|r| r.match_key() == Some(key))
    }

    pub fn remove_by_id(&mut self, id: &str) {
        self.items.retain(|r| r.id() != Some(id));
    }
}
