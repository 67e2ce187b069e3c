use std::sync::Arc;

use super::LocalCollection;
use crate::errors::{AdminError, AdminResult};
use crate::model::ContentSection;
use crate::repository::Repository;
use crate::rows::RowStore;
use crate::session::{EditSession, SaveOutcome};
use crate::views;

/// One line of the content list as a presentation layer shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionRow<'a> {
    pub display_name: String,
    pub category: &'static str,
    pub editing: bool,
    pub section: &'a ContentSection,
}

pub struct ContentScreen {
    repo: Repository<ContentSection>,
    sections: LocalCollection<ContentSection>,
    session: EditSession<ContentSection>,
    search: String,
}

impl ContentScreen {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            repo: Repository::new(store),
            sections: LocalCollection::default(),
            session: EditSession::new(),
            search: String::new(),
        }
    }

    pub fn load(&mut self) -> bool {
        self.sections.load(&self.repo)
    }

    pub fn loading(&self) -> bool {
        self.sections.loading
    }

    pub fn sections(&self) -> &[ContentSection] {
        &self.sections.items
    }

    pub fn session(&self) -> &EditSession<ContentSection> {
        &self.session
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn rows(&self) -> Vec<SectionRow<'_>> {
        views::filter_sections(&self.sections.items, &self.search)
            .into_iter()
            .map(|section| SectionRow {
                display_name: views::display_name(&section.section_key),
                category: views::section_category(&section.section_key),
                editing: self.session.is_editing_record(section),
                section,
            })
            .collect()
    }

    /// Message for an empty filtered list.
    pub fn empty_hint(&self) -> &'static str {
        if self.search.is_empty() {
            "No content sections available."
        } else {
            "Try adjusting your search terms."
        }
    }

    pub fn begin_edit(&mut self, section_key: &str) -> AdminResult<()> {
        let section = self.sections.find_by_key(section_key).ok_or_else(|| {
            AdminError::NotFound {
                collection: "content_sections",
                key: section_key.to_string(),
            }
        })?;
        self.session.begin_edit(section);
        Ok(())
    }

    pub fn set_content(&mut self, content: &str) -> AdminResult<()> {
        self.session.update_draft_field("content", content)
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn save(&mut self) -> AdminResult<SaveOutcome> {
        self.session.save(&self.repo, &mut self.sections.items)
    }
}

#[cfg(test)]
#[path = "../tests/screens/content_tests.rs"]
mod tests;
