use thiserror::Error;

/// Failures surfaced by the data-access layer and the screens built on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminError {
    /// Transport or remote store failure, not otherwise classified.
    #[error("store error: {0}")]
    Store(String),

    #[error("no {collection} record matches {key}")]
    NotFound {
        collection: &'static str,
        key: String,
    },

    /// Client-side precondition failure, raised before any remote call.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("auth error: {0}")]
    Auth(String),

    /// One or more updates of a batch failed. `applied` lists the keys the
    /// store did accept; none of the batch is reflected locally.
    #[error("failed to save {} setting(s): {}", .failed.len(), render_failed(.failed))]
    BatchSave {
        failed: Vec<(String, String)>,
        applied: Vec<String>,
    },
}

impl AdminError {
    pub fn store(msg: impl Into<String>) -> Self {
        AdminError::Store(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AdminError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::NotFound { .. })
    }
}

fn render_failed(failed: &[(String, String)]) -> String {
    failed
        .iter()
        .map(|(key, err)| format!("{} ({})", key, err))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;
