use std::sync::Arc;

use super::LocalCollection;
use crate::errors::{AdminError, AdminResult};
use crate::model::ProductCard;
use crate::repository::Repository;
use crate::rows::RowStore;
use crate::session::{EditSession, SaveOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was sent.
    Declined,
}

pub struct ProductScreen {
    repo: Repository<ProductCard>,
    products: LocalCollection<ProductCard>,
    session: EditSession<ProductCard>,
    message: Option<String>,
}

impl ProductScreen {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            repo: Repository::new(store),
            products: LocalCollection::default(),
            session: EditSession::new(),
            message: None,
        }
    }

    pub fn load(&mut self) -> bool {
        self.products.load(&self.repo)
    }

    pub fn loading(&self) -> bool {
        self.products.loading
    }

    pub fn products(&self) -> &[ProductCard] {
        &self.products.items
    }

    pub fn session(&self) -> &EditSession<ProductCard> {
        &self.session
    }

    /// Last user-visible message from a save or delete.
    pub fn message(&self) -> Option<&str> {
        self.session.message().or(self.message.as_deref())
    }

    /// Opens the add form with a blank card placed after the current list.
    pub fn begin_add(&mut self) {
        self.message = None;
        self.session
            .begin_create(ProductCard::draft(self.products.items.len()));
    }

    pub fn begin_edit(&mut self, id: &str) -> AdminResult<()> {
        let card = self
            .products
            .find_by_id(id)
            .ok_or_else(|| AdminError::NotFound {
                collection: "product_cards",
                key: id.to_string(),
            })?;
        self.message = None;
        self.session.begin_edit(card);
        Ok(())
    }

    pub fn update_field(&mut self, field: &str, value: &str) -> AdminResult<()> {
        self.session.update_draft_field(field, value)
    }

    /// Whether the save action is available: a draft exists and has a title.
    pub fn can_save(&self) -> bool {
        self.session
            .draft()
            .is_some_and(|d| !d.record.title.trim().is_empty())
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn save(&mut self) -> AdminResult<SaveOutcome> {
        self.session.save(&self.repo, &mut self.products.items)
    }

    /// Deletes a card once `confirm` approves. The local list changes only
    /// after the store confirms the removal.
    pub fn delete(
        &mut self,
        id: &str,
        confirm: impl FnOnce(Option<&ProductCard>) -> bool,
    ) -> AdminResult<DeleteOutcome> {
        if !confirm(self.products.find_by_id(id)) {
            return Ok(DeleteOutcome::Declined);
        }
        match self.repo.delete(id) {
            Ok(()) => {
                self.products.remove_by_id(id);
                self.message = None;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                tracing::warn!(id, "delete failed: {}", err);
                self.message = Some(format!("Error deleting product: {}. Please try again.", err));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/screens/products_tests.rs"]
mod tests;
