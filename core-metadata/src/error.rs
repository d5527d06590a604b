use bridge_traits::error::TagError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to extract metadata from {path}: {message}")]
    ExtractionFailed { path: PathBuf, message: String },

    #[error("Failed to write tags to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag error: {0}")]
    Tag(#[from] TagError),
}

impl From<MetadataError> for TagError {
    fn from(error: MetadataError) -> Self {
        match error {
            MetadataError::NotAFile(path) => TagError::NotAFile(path),
            MetadataError::ExtractionFailed { path, message } => TagError::Unreadable { path, message },
            MetadataError::WriteFailed { path, message } => TagError::WriteFailed { path, message },
            MetadataError::Io(e) => TagError::Io(e),
            MetadataError::Tag(e) => e,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
