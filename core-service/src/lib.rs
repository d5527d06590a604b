//! Core service façade and bootstrap helpers.
//!
//! This crate wires the host-provided tag capabilities and the catalog
//! configuration into a single [`CatalogService`] that a presentation layer
//! drives. Desktop hosts typically enable the `desktop-shims` feature (which
//! depends on `core-metadata`) and call [`CatalogService::with_defaults`];
//! other hosts pass their own [`CatalogDependencies`].

pub mod error;

pub use error::{CoreError, Result};

pub use core_runtime::config::CatalogConfig;
pub use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};

use std::path::Path;
use std::sync::Arc;

use bridge_traits::tags::{TagReader, TagWriter};
use core_library::{
    import_file, import_folder, AddOutcome, Catalog, ContainerShape, ImportReport, Song, SongEdit, SongId,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Aggregated handle to the tag capabilities the catalog requires.
pub struct CatalogDependencies {
    pub tag_reader: Arc<dyn TagReader>,
    pub tag_writer: Arc<dyn TagWriter>,
}

impl CatalogDependencies {
    /// Construct a dependency bundle from explicit capability handles.
    pub fn new(tag_reader: Arc<dyn TagReader>, tag_writer: Arc<dyn TagWriter>) -> Self {
        Self {
            tag_reader,
            tag_writer,
        }
    }

    /// `lofty`-backed reader and writer for desktop hosts.
    #[cfg(feature = "desktop-shims")]
    pub fn desktop() -> Self {
        Self::new(
            Arc::new(core_metadata::LoftyTagReader::new()),
            Arc::new(core_metadata::LoftyTagWriter::new()),
        )
    }
}

/// Primary façade exposed to host applications.
pub struct CatalogService {
    config: CatalogConfig,
    deps: Arc<CatalogDependencies>,
    catalog: Catalog,
}

impl CatalogService {
    /// Create a service with an empty catalog.
    pub fn new(config: CatalogConfig, deps: CatalogDependencies) -> Self {
        Self {
            config,
            deps: Arc::new(deps),
            catalog: Catalog::new(),
        }
    }

    /// Create a service backed by the desktop tag capabilities.
    #[cfg(feature = "desktop-shims")]
    pub fn with_defaults(config: CatalogConfig) -> Self {
        Self::new(config, CatalogDependencies::desktop())
    }

    /// Create a service and load the configured library file if it exists.
    ///
    /// A missing library file yields an empty catalog; any other load failure
    /// is returned.
    pub fn open(config: CatalogConfig, deps: CatalogDependencies) -> Result<Self> {
        config.validate()?;

        let mut service = Self::new(config, deps);
        if service.config.library_path.exists() {
            service.load()?;
        } else {
            info!(
                path = %service.config.library_path.display(),
                "No library file yet; starting with an empty catalog"
            );
        }
        Ok(service)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Access the capability handles being used by the service.
    pub fn dependencies(&self) -> Arc<CatalogDependencies> {
        Arc::clone(&self.deps)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Container shape used by [`CatalogService::save`].
    pub fn container_shape(&self) -> ContainerShape {
        if self.config.persist_aggregates {
            ContainerShape::Full
        } else {
            ContainerShape::SongsOnly
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Reload the catalog from the configured library file.
    pub fn load(&mut self) -> Result<()> {
        let path = self.config.library_path.clone();
        self.load_from(&path)
    }

    /// Replace the catalog with the contents of another library file.
    ///
    /// The current catalog is kept when loading fails.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        self.catalog.load(path)?;
        Ok(())
    }

    /// Save the catalog to the configured library file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.config.library_path)
    }

    /// Save the catalog to another library file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.catalog.save_as(path, self.container_shape())?;
        Ok(())
    }

    // =========================================================================
    // Import
    // =========================================================================

    /// Read one audio file and add it to the catalog.
    pub fn import_file(&mut self, path: &Path) -> Result<AddOutcome> {
        let outcome = import_file(&mut self.catalog, self.deps.tag_reader.as_ref(), path)?;
        Ok(outcome)
    }

    /// Import a folder tree, defaulting to the configured music directory.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CapabilityMissing`] when no root is given and no
    /// music directory is configured.
    pub fn import_folder(&mut self, root: Option<&Path>, cancel: &CancellationToken) -> Result<ImportReport> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => self
                .config
                .music_dir
                .clone()
                .ok_or_else(|| CoreError::CapabilityMissing {
                    capability: "music_dir".to_string(),
                    message: "No folder given and no music directory configured".to_string(),
                })?,
        };

        let report = import_folder(
            &mut self.catalog,
            self.deps.tag_reader.as_ref(),
            &root,
            self.config.follow_links,
            cancel,
        )?;
        Ok(report)
    }

    // =========================================================================
    // Catalog operations
    // =========================================================================

    pub fn add_song(&mut self, song: Song) -> Result<AddOutcome> {
        Ok(self.catalog.add_song(song)?)
    }

    /// Replace a song, writing its tags back when `write_tags` is enabled.
    ///
    /// A failed tag write is reported as an error while the catalog keeps
    /// the new values.
    pub fn update_song(&mut self, old_path: &Path, song: Song) -> Result<SongId> {
        let id = if self.config.write_tags {
            self.catalog
                .update_song(old_path, song, self.deps.tag_writer.as_ref())?
        } else {
            self.catalog.replace_song(old_path, song)?
        };
        Ok(id)
    }

    /// Field-level variant of [`CatalogService::update_song`].
    pub fn update_song_fields(&mut self, path: &Path, edit: &SongEdit) -> Result<SongId> {
        let edited = self
            .catalog
            .song(path)
            .map(|song| edit.apply(song))
            .ok_or_else(|| core_library::LibraryError::NotFound {
                entity_type: "Song".to_string(),
                id: path.display().to_string(),
            })?;
        self.update_song(path, edited)
    }

    pub fn remove_song(&mut self, path: &Path) -> Option<Song> {
        self.catalog.remove_song(path)
    }

    pub fn create_playlist(&mut self, title: &str) -> Result<()> {
        Ok(self.catalog.create_playlist(title)?)
    }

    pub fn add_song_to_playlist(&mut self, title: &str, path: &Path) -> Result<()> {
        Ok(self.catalog.add_song_to_playlist(title, path)?)
    }

    pub fn remove_song_from_playlist(&mut self, title: &str, path: &Path) -> bool {
        self.catalog.remove_song_from_playlist(title, path)
    }

    /// Regroup albums and artists from the songs.
    pub fn validate(&mut self) {
        self.catalog.validate();
    }
}
