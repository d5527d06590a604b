//! Audio Tag Abstractions
//!
//! Provides the contract between the catalog and whatever reads or writes the
//! descriptive tags embedded in audio files.

use std::path::Path;

use crate::error::{Result, TagError};

/// File extensions the catalog accepts as audio (lowercase, without the dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "wma", "aac", "flac", "ogg", "m4a"];

/// Descriptive fields carried by an audio file's tags
///
/// Numeric fields use `0` for "unknown" and text fields use the empty string,
/// matching how the catalog stores songs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Release year (0 = unknown)
    pub year: u32,
    /// Genre
    pub genre: String,
    /// Album the track was originally released on
    pub album: String,
    /// Position on the album (0 = unknown)
    pub track_number: u32,
    /// Tracks on the album (0 = unknown)
    pub track_count: u32,
    /// Play time in whole seconds
    pub runtime_secs: u32,
}

/// Tag reading trait
///
/// Implementations must reject paths that are not regular files with
/// [`TagError::NotAFile`] and unsupported extensions with
/// [`TagError::UnsupportedFormat`] before touching the file contents.
pub trait TagReader: Send + Sync {
    /// Read the tags of the file at `path`
    fn read(&self, path: &Path) -> Result<TagFields>;
}

/// Tag writing trait
///
/// A failed write may leave the file partially updated; callers cannot roll it
/// back and must surface the error instead.
pub trait TagWriter: Send + Sync {
    /// Overwrite the tags of the file at `path` with `fields`
    fn write(&self, path: &Path, fields: &TagFields) -> Result<()>;
}

/// Check whether a path carries one of the [`SUPPORTED_EXTENSIONS`]
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Fail with [`TagError::UnsupportedFormat`] unless the path is a supported audio file
pub fn ensure_supported(path: &Path) -> Result<()> {
    if is_supported_extension(path) {
        Ok(())
    } else {
        Err(TagError::UnsupportedFormat(path.display().to_string()))
    }
}
