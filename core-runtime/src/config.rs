//! # Catalog Configuration Module
//!
//! Provides configuration management for the media catalog.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `CatalogConfig`. It enforces fail-fast validation so a misconfigured
//! library location is reported before any file is touched.
//!
//! ## Settings
//!
//! - `library_path` - Required. Where the catalog is loaded from and saved to.
//!   Must carry the `.library` suffix.
//! - `music_dir` - Optional default root for folder imports.
//! - `persist_aggregates` - Save albums and artists alongside songs and
//!   playlists (full container). Off by default: the songs-only container is
//!   rebuilt into albums and artists on every load.
//! - `write_tags` - Push song edits back into the audio files (default on).
//! - `follow_links` - Follow symbolic links while importing folders.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::CatalogConfig;
//!
//! let config = CatalogConfig::builder()
//!     .library_path("/home/me/Music/main.library")
//!     .music_dir("/home/me/Music")
//!     .build()
//!     .expect("valid config");
//!
//! assert!(!config.persist_aggregates);
//! assert!(config.write_tags);
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::CatalogConfig;
//!
//! // Wrong suffix: rejected before anything is loaded
//! let config = CatalogConfig::builder()
//!     .library_path("/home/me/Music/main.txt")
//!     .build()
//!     .expect("Should fail - library files end in .library");
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Required suffix for catalog container files (without the dot)
pub const LIBRARY_EXTENSION: &str = "library";

/// Configuration for the media catalog.
///
/// Use [`CatalogConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Container file the catalog is persisted to
    pub library_path: PathBuf,

    /// Default root directory for folder imports
    pub music_dir: Option<PathBuf>,

    /// Persist albums and artists instead of rebuilding them on load
    pub persist_aggregates: bool,

    /// Write song edits back to the audio files
    pub write_tags: bool,

    /// Follow symbolic links during folder imports
    pub follow_links: bool,
}

impl CatalogConfig {
    /// Creates a new builder for constructing a `CatalogConfig`.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Library path is not empty and ends in `.library`
    /// - Music directory, when given, is not empty
    pub fn validate(&self) -> Result<()> {
        if self.library_path.as_os_str().is_empty() {
            return Err(Error::Config("Library path cannot be empty".to_string()));
        }

        if !has_library_extension(&self.library_path) {
            return Err(Error::Config(format!(
                "Library path must end in .{}: {}",
                LIBRARY_EXTENSION,
                self.library_path.display()
            )));
        }

        if let Some(dir) = &self.music_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::Config(
                    "Music directory cannot be empty when provided".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Check whether `path` carries the `.library` suffix (case-insensitive)
pub fn has_library_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(LIBRARY_EXTENSION))
        .unwrap_or(false)
}

/// Builder for [`CatalogConfig`]
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    library_path: Option<PathBuf>,
    music_dir: Option<PathBuf>,
    persist_aggregates: Option<bool>,
    write_tags: Option<bool>,
    follow_links: Option<bool>,
}

impl CatalogConfigBuilder {
    /// Sets the container file the catalog is persisted to (required).
    pub fn library_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.library_path = Some(path.into());
        self
    }

    /// Sets the default root directory for folder imports.
    pub fn music_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.music_dir = Some(path.into());
        self
    }

    /// Persist albums and artists in the container (full shape).
    pub fn persist_aggregates(mut self, enabled: bool) -> Self {
        self.persist_aggregates = Some(enabled);
        self
    }

    /// Write song edits back to the audio files.
    pub fn write_tags(mut self, enabled: bool) -> Self {
        self.write_tags = Some(enabled);
        self
    }

    /// Follow symbolic links during folder imports.
    pub fn follow_links(mut self, enabled: bool) -> Self {
        self.follow_links = Some(enabled);
        self
    }

    /// Builds the configuration, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the library path is missing or invalid.
    pub fn build(self) -> Result<CatalogConfig> {
        let library_path = self.library_path.ok_or_else(|| {
            Error::Config("Library path is required. Use .library_path() to set it.".to_string())
        })?;

        let config = CatalogConfig {
            library_path,
            music_dir: self.music_dir,
            persist_aggregates: self.persist_aggregates.unwrap_or(false),
            write_tags: self.write_tags.unwrap_or(true),
            follow_links: self.follow_links.unwrap_or(false),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_library_path() {
        let result = CatalogConfig::builder().music_dir("/music").build();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Library path is required"));
    }

    #[test]
    fn test_builder_defaults() {
        let config = CatalogConfig::builder()
            .library_path("/tmp/main.library")
            .build()
            .unwrap();

        assert_eq!(config.library_path, PathBuf::from("/tmp/main.library"));
        assert_eq!(config.music_dir, None);
        assert!(!config.persist_aggregates);
        assert!(config.write_tags);
        assert!(!config.follow_links);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CatalogConfig::builder()
            .library_path("/tmp/main.library")
            .music_dir("/music")
            .persist_aggregates(true)
            .write_tags(false)
            .follow_links(true)
            .build()
            .unwrap();

        assert_eq!(config.music_dir, Some(PathBuf::from("/music")));
        assert!(config.persist_aggregates);
        assert!(!config.write_tags);
        assert!(config.follow_links);
    }

    #[test]
    fn test_validate_rejects_wrong_suffix() {
        let result = CatalogConfig::builder()
            .library_path("/tmp/main.txt")
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains(".library")));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let result = CatalogConfig::builder().library_path("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_music_dir() {
        let result = CatalogConfig::builder()
            .library_path("/tmp/main.library")
            .music_dir("")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_has_library_extension() {
        assert!(has_library_extension(Path::new("a.library")));
        assert!(has_library_extension(Path::new("/x/b.LIBRARY")));
        assert!(!has_library_extension(Path::new("/x/b.library.bak")));
        assert!(!has_library_extension(Path::new("library")));
    }
}
