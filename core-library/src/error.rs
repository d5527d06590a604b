use bridge_traits::error::TagError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Corrupt library data: {0}")]
    Decode(String),

    #[error("Failed to encode library: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    #[error("Tags of {path} were not fully written: {message}")]
    TagWrite { path: PathBuf, message: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id {id}")]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },
}

impl LibraryError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        LibraryError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn already_exists(entity_type: &str, id: impl ToString) -> Self {
        LibraryError::AlreadyExists {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether the error means the input was not a usable library file
    pub fn is_format_error(&self) -> bool {
        matches!(self, LibraryError::Format(_) | LibraryError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
