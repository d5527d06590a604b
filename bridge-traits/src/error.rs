use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable tags in {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Failed to write tags to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TagError>;
