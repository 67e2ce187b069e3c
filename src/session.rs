//! Single-record edit session shared by the screens.
//!
//! ```text
//! Viewing --begin_edit--> Editing --save--> Saving --ok--> Viewing
//!                            ^                 |
//!                            +-----failed------+
//! Editing --cancel--> Viewing
//! ```

use crate::errors::{AdminError, AdminResult};
use crate::model::Record;
use crate::repository::Repository;

#[derive(Clone, Debug, PartialEq)]
pub struct Draft<R> {
    pub record: R,
    /// The record as it was when editing began; `None` for a new record.
    pub original: Option<R>,
}

impl<R: Record> Draft<R> {
    pub fn is_new(&self) -> bool {
        self.record.id().is_none()
    }

    pub fn is_dirty(&self) -> bool {
        self.original.as_ref() != Some(&self.record)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditState<R> {
    Viewing,
    Editing(Draft<R>),
    Saving(Draft<R>),
}

#[derive(Debug)]
pub struct EditSession<R> {
    state: EditState<R>,
    /// Last failure shown to the user.
    message: Option<String>,
}

impl<R: Record> Default for EditSession<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a successful save did to the local list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Updated,
    Created,
}

impl<R: Record> EditSession<R> {
    pub fn new() -> Self {
        Self {
            state: EditState::Viewing,
            message: None,
        }
    }

    pub fn state(&self) -> &EditState<R> {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        !matches!(self.state, EditState::Viewing)
    }

    pub fn draft(&self) -> Option<&Draft<R>> {
        match &self.state {
            EditState::Viewing => None,
            EditState::Editing(d) | EditState::Saving(d) => Some(d),
        }
    }

    /// True when `record` is the one being edited.
    pub fn is_editing_record(&self, record: &R) -> bool {
        self.draft()
            .and_then(|d| d.record.id())
            .is_some_and(|id| Some(id) == record.id())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Starts editing a copy of `record`, replacing any draft in progress.
    pub fn begin_edit(&mut self, record: &R) {
        self.message = None;
        self.state = EditState::Editing(Draft {
            record: record.clone(),
            original: Some(record.clone()),
        });
    }

    /// Starts editing a record that has not been saved yet.
    pub fn begin_create(&mut self, record: R) {
        self.message = None;
        self.state = EditState::Editing(Draft {
            record,
            original: None,
        });
    }

    pub fn update_draft_field(&mut self, field: &str, value: &str) -> AdminResult<()> {
        match &mut self.state {
            EditState::Editing(d) | EditState::Saving(d) => d.record.set_field(field, value),
            EditState::Viewing => Err(AdminError::validation("no record is being edited")),
        }
    }

    /// Discards the draft without asking.
    pub fn cancel(&mut self) {
        self.state = EditState::Viewing;
        self.message = None;
    }

    /// Persists the draft and folds the stored record into `local`.
    ///
    /// Existing records are updated and patched in place by id; new ones are
    /// created and appended. On failure the draft stays in `Editing`.
    pub fn save(&mut self, repo: &Repository<R>, local: &mut Vec<R>) -> AdminResult<SaveOutcome> {
        let draft = match std::mem::replace(&mut self.state, EditState::Viewing) {
            EditState::Editing(d) => d,
            other => {
                self.state = other;
                return Err(AdminError::validation("save requires an edit in progress"));
            }
        };
        self.state = EditState::Saving(draft.clone());

        match persist(repo, &draft.record) {
            Ok((stored, outcome)) => {
                match outcome {
                    SaveOutcome::Updated => patch(local, stored),
                    SaveOutcome::Created => local.push(stored),
                }
                self.state = EditState::Viewing;
                self.message = None;
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(collection = %R::COLLECTION, "save failed: {}", err);
                self.message = Some(format!("Error saving: {}. Please try again.", err));
                self.state = EditState::Editing(draft);
                Err(err)
            }
        }
    }
}

fn persist<R: Record>(repo: &Repository<R>, record: &R) -> AdminResult<(R, SaveOutcome)> {
    record.validate()?;
    match (record.id(), record.match_key()) {
        (Some(_), Some(key)) => Ok((repo.update(key, record.save_fields()?)?, SaveOutcome::Updated)),
        (None, _) => Ok((repo.create(record)?, SaveOutcome::Created)),
        (Some(id), None) => Err(AdminError::validation(format!(
            "record {} has no {}",
            id,
            R::MATCH_COLUMN
        ))),
    }
}

/// Replaces the entry with the same id as `stored`.
pub(crate) fn patch<R: Record>(local: &mut [R], stored: R) {
    if let Some(slot) = local.iter_mut().find(|r| r.id() == stored.id()) {
        *slot = stored;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
