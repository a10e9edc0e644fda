//! Error types for node editing.

use thiserror::Error;

pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    /// Input text cannot be converted to the kind of the field's original
    /// value. The reason is shown next to the offending field.
    #[error("Value {0}")]
    InvalidValue(&'static str),

    /// The store's canonical text is not valid JSON.
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    #[error("editor is not in edit mode")]
    NotEditing,
}

impl EditError {
    /// The short reason carried by [`EditError::InvalidValue`].
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            EditError::InvalidValue(reason) => Some(reason),
            _ => None,
        }
    }
}
