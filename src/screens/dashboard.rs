use std::sync::Arc;

use crate::auth::Route;
use crate::errors::AdminResult;
use crate::model::{ContentSection, ProductCard};
use crate::repository::Repository;
use crate::rows::RowStore;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DashboardStats {
    pub content_sections: usize,
    pub product_cards: usize,
    /// Local date the stats were loaded (`YYYY-MM-DD`); `None` when loading
    /// failed.
    pub last_updated: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        title: "Edit Content",
        description: "Update headlines, subtitles, and text content",
        route: Route::Content,
    },
    QuickAction {
        title: "Manage Products",
        description: "Add, edit, or remove product cards",
        route: Route::Products,
    },
    QuickAction {
        title: "Site Settings",
        description: "Configure global site settings and links",
        route: Route::Settings,
    },
];

/// Local calendar date; UTC when the local offset cannot be determined.
fn today() -> String {
    let now =
        time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    calendar_date(now)
}

fn calendar_date(at: time::OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        at.year(),
        u8::from(at.month()),
        at.day()
    )
}

/// Counts both collections, listing them concurrently. A failure is logged
/// and yields zero counts.
pub fn load_stats(store: Arc<dyn RowStore>) -> DashboardStats {
    let sections: Repository<ContentSection> = Repository::new(store.clone());
    let cards: Repository<ProductCard> = Repository::new(store);

    let (s, c): (AdminResult<Vec<ContentSection>>, AdminResult<Vec<ProductCard>>) =
        std::thread::scope(|scope| {
            let s = scope.spawn(|| sections.list());
            let c = scope.spawn(|| cards.list());
            (join(s), join(c))
        });

    match (s, c) {
        (Ok(s), Ok(c)) => DashboardStats {
            content_sections: s.len(),
            product_cards: c.len(),
            last_updated: Some(today()),
        },
        (Err(err), _) | (_, Err(err)) => {
            tracing::error!("error loading stats: {}", err);
            DashboardStats::default()
        }
    }
}

fn join<T>(h: std::thread::ScopedJoinHandle<'_, AdminResult<T>>) -> AdminResult<T> {
    h.join()
        .unwrap_or_else(|_| Err(crate::errors::AdminError::store("list thread panicked")))
}

#[cfg(test)]
#[path = "../tests/screens/dashboard_tests.rs"]
mod tests;
