//! # Importer
//!
//! Feeds audio files into a [`Catalog`] through a [`TagReader`].
//!
//! Folder imports walk the tree synchronously in file-name order. A file that
//! fails to read is logged and counted; it never stops the walk. The walk can
//! be stopped between files through a [`CancellationToken`].

use crate::catalog::{AddOutcome, Catalog};
use crate::error::{LibraryError, Result};
use crate::models::Song;
use bridge_traits::tags::{ensure_supported, is_supported_extension, TagReader};
use core_runtime::logging::strip_path;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of a folder import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Songs added to the catalog
    pub imported: usize,
    /// Files whose tags could not be read or entries that could not be visited
    pub failed: usize,
    /// Files with an unsupported extension or already in the catalog
    pub skipped: usize,
    /// Whether the walk stopped early on request
    pub cancelled: bool,
}

impl ImportReport {
    /// Files looked at
    pub fn total(&self) -> usize {
        self.imported + self.failed + self.skipped
    }
}

/// Read the tags of one audio file and add it to the catalog
///
/// # Errors
///
/// - [`LibraryError::Tag`] if the extension is unsupported or the tags are unreadable
/// - [`LibraryError::InvalidInput`] if the path is empty
pub fn import_file(catalog: &mut Catalog, reader: &dyn TagReader, path: &Path) -> Result<AddOutcome> {
    if let Some(id) = catalog.song_id(path) {
        return Ok(AddOutcome::Duplicate(id));
    }

    ensure_supported(path)?;
    let fields = reader.read(path)?;
    catalog.add_song(Song::from_tags(path, fields))
}

/// Import every supported audio file below `root`
///
/// # Errors
///
/// Returns [`LibraryError::InvalidInput`] if `root` is not a directory. Failures
/// on individual files are counted in the report instead.
pub fn import_folder(
    catalog: &mut Catalog,
    reader: &dyn TagReader,
    root: &Path,
    follow_links: bool,
    cancel: &CancellationToken,
) -> Result<ImportReport> {
    if !root.is_dir() {
        return Err(LibraryError::InvalidInput {
            field: "root".to_string(),
            message: format!("{} is not a directory", root.display()),
        });
    }

    let mut report = ImportReport::default();
    let walker = WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name();

    for entry in walker {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error accessing entry: {}", e);
                report.failed += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_supported_extension(path) {
            let name = path.to_string_lossy();
            debug!(file = strip_path(&name), "Skipping unsupported file");
            report.skipped += 1;
            continue;
        }

        match import_file(catalog, reader, path) {
            Ok(AddOutcome::Added(_)) => report.imported += 1,
            Ok(AddOutcome::Duplicate(_)) => report.skipped += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to import file");
                report.failed += 1;
            }
        }
    }

    info!(
        root = %root.display(),
        imported = report.imported,
        failed = report.failed,
        skipped = report.skipped,
        cancelled = report.cancelled,
        "Folder import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{Result as TagResult, TagError};
    use bridge_traits::tags::TagFields;
    use std::path::PathBuf;

    struct TitleFromName;

    impl TagReader for TitleFromName {
        fn read(&self, path: &Path) -> TagResult<TagFields> {
            let title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            if title == "broken" {
                return Err(TagError::Unreadable {
                    path: path.to_path_buf(),
                    message: "no tag".to_string(),
                });
            }
            Ok(TagFields {
                title,
                ..TagFields::default()
            })
        }
    }

    #[test]
    fn test_import_file_rejects_unsupported_extension() {
        let mut catalog = Catalog::new();
        let result = import_file(&mut catalog, &TitleFromName, Path::new("/notes.txt"));
        assert!(matches!(result, Err(LibraryError::Tag(TagError::UnsupportedFormat(_)))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_import_file_adds_song() {
        let mut catalog = Catalog::new();
        let outcome = import_file(&mut catalog, &TitleFromName, Path::new("/music/One.MP3")).unwrap();
        assert!(outcome.is_added());
        assert_eq!(catalog.song(Path::new("/music/One.MP3")).unwrap().title, "One");

        let again = import_file(&mut catalog, &TitleFromName, Path::new("/music/One.MP3")).unwrap();
        assert_eq!(again, AddOutcome::Duplicate(outcome.id()));
    }

    #[test]
    fn test_import_file_propagates_reader_error() {
        let mut catalog = Catalog::new();
        let result = import_file(&mut catalog, &TitleFromName, &PathBuf::from("/broken.flac"));
        assert!(matches!(result, Err(LibraryError::Tag(TagError::Unreadable { .. }))));
    }

    #[test]
    fn test_import_folder_requires_directory() {
        let mut catalog = Catalog::new();
        let token = CancellationToken::new();
        let result = import_folder(
            &mut catalog,
            &TitleFromName,
            Path::new("/definitely/not/here"),
            false,
            &token,
        );
        assert!(matches!(result, Err(LibraryError::InvalidInput { .. })));
    }

    #[test]
    fn test_report_total() {
        let report = ImportReport {
            imported: 2,
            failed: 1,
            skipped: 3,
            cancelled: false,
        };
        assert_eq!(report.total(), 6);
    }
}
