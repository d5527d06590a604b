//! Audio Tag Extraction
//!
//! Reads descriptive tags from audio files using the `lofty` crate. ID3v2,
//! Vorbis Comments, MP4 ilst, APE and RIFF INFO tags are understood.
//!
//! ## Overview
//!
//! - Extracts title, artist, album, year, genre, track position and run time
//! - Normalizes text (trim whitespace, collapse runs, drop control characters)
//! - Falls back to the file name as title when a file carries no tag at all
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::tags::TagReader;
//! use core_metadata::extractor::LoftyTagReader;
//! use std::path::Path;
//!
//! let reader = LoftyTagReader::new();
//! let fields = reader.read(Path::new("song.flac"))?;
//! println!("{} by {}", fields.title, fields.artist);
//! ```

use bridge_traits::error::{Result as TagResult, TagError};
use bridge_traits::tags::{ensure_supported, TagFields, TagReader};
use lofty::config::ParseOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{MetadataError, Result};

/// Tag reader backed by `lofty`
pub struct LoftyTagReader {
    /// Parse options for lofty
    parse_options: ParseOptions,
}

impl LoftyTagReader {
    /// Create a reader with default settings
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::new(),
        }
    }

    /// Create a reader with custom parse options
    pub fn with_options(parse_options: ParseOptions) -> Self {
        Self { parse_options }
    }

    /// Extract tag fields from an audio file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is not a regular file
    /// - The extension is not a supported audio type
    /// - The file cannot be parsed
    pub fn extract(&self, path: &Path) -> Result<TagFields> {
        debug!("Extracting tags from: {}", path.display());

        let tagged_file = open_tagged(path, self.parse_options)?;
        let runtime_secs = u32::try_from(tagged_file.properties().duration().as_secs()).unwrap_or(u32::MAX);

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
        let fields = match tag {
            Some(tag) => TagFields {
                title: tag.title().map(|s| normalize_text(&s)).unwrap_or_default(),
                artist: tag.artist().map(|s| normalize_text(&s)).unwrap_or_default(),
                album: tag.album().map(|s| normalize_text(&s)).unwrap_or_default(),
                genre: tag.genre().map(|s| normalize_text(&s)).unwrap_or_default(),
                year: tag.year().unwrap_or(0),
                track_number: tag.track().unwrap_or(0),
                track_count: tag.track_total().unwrap_or(0),
                runtime_secs,
            },
            None => {
                warn!(
                    "No tags found in file: {}. Using filename as title.",
                    path.display()
                );
                let filename = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();

                TagFields {
                    title: normalize_text(&filename),
                    runtime_secs,
                    ..TagFields::default()
                }
            }
        };

        Ok(fields)
    }
}

impl Default for LoftyTagReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TagReader for LoftyTagReader {
    fn read(&self, path: &Path) -> TagResult<TagFields> {
        self.extract(path).map_err(TagError::from)
    }
}

/// Check the path and parse the file with `lofty`
pub(crate) fn open_tagged(path: &Path, parse_options: ParseOptions) -> Result<TaggedFile> {
    if !path.is_file() {
        return Err(MetadataError::NotAFile(path.to_path_buf()));
    }
    ensure_supported(path)?;

    let failed = |e: lofty::error::LoftyError| MetadataError::ExtractionFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    Probe::open(path)
        .map_err(failed)?
        .options(parse_options)
        .read()
        .map_err(failed)
}

/// Normalize text metadata
///
/// - Trims leading/trailing whitespace
/// - Normalizes consecutive whitespace to single space
/// - Removes null bytes and control characters
pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello   World  "), "Hello World");
        assert_eq!(
            normalize_text("Title\nWith\tWhitespace"),
            "Title With Whitespace"
        );
        assert_eq!(normalize_text("Nul\0Byte"), "NulByte");
        assert_eq!(normalize_text("Clean Text"), "Clean Text");
    }

    #[test]
    fn test_reader_default() {
        let reader1 = LoftyTagReader::new();
        let reader2 = LoftyTagReader::default();

        assert_eq!(
            format!("{:?}", reader1.parse_options),
            format!("{:?}", reader2.parse_options)
        );
    }

    #[test]
    fn test_missing_file_is_not_a_file() {
        let reader = LoftyTagReader::new();
        let result = reader.read(Path::new("/definitely/missing.mp3"));
        assert!(matches!(result, Err(TagError::NotAFile(_))));
    }
}
