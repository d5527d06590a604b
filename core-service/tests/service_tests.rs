//! Integration tests for the catalog service façade

use bridge_traits::error::{Result as TagResult, TagError};
use bridge_traits::tags::{TagFields, TagReader, TagWriter};
use core_library::{LibraryError, Song, SongEdit};
use core_service::{CatalogConfig, CatalogDependencies, CatalogService, CoreError};
use mockall::mock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

mock! {
    pub Reader {}

    impl TagReader for Reader {
        fn read(&self, path: &Path) -> TagResult<TagFields>;
    }
}

mock! {
    pub Writer {}

    impl TagWriter for Writer {
        fn write(&self, path: &Path, fields: &TagFields) -> TagResult<()>;
    }
}

/// Reader that tags every file as a track of "Hits" numbered by its stem
fn hits_reader() -> MockReader {
    let mut reader = MockReader::new();
    reader.expect_read().returning(|path| {
        let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
        Ok(TagFields {
            title: format!("Track {}", stem),
            artist: "Bob".to_string(),
            album: "Hits".to_string(),
            year: 2000,
            track_number: stem.parse().unwrap_or(0),
            track_count: 2,
            runtime_secs: 200,
            ..TagFields::default()
        })
    });
    reader
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        fs::write(music.join("1.mp3"), b"").unwrap();
        fs::write(music.join("2.mp3"), b"").unwrap();
        Self { dir }
    }

    fn library(&self) -> PathBuf {
        self.dir.path().join("main.library")
    }

    fn music(&self) -> PathBuf {
        self.dir.path().join("music")
    }

    fn config(&self, persist_aggregates: bool, write_tags: bool) -> CatalogConfig {
        CatalogConfig::builder()
            .library_path(self.library())
            .music_dir(self.music())
            .persist_aggregates(persist_aggregates)
            .write_tags(write_tags)
            .build()
            .unwrap()
    }
}

fn deps(reader: MockReader, writer: MockWriter) -> CatalogDependencies {
    CatalogDependencies::new(Arc::new(reader), Arc::new(writer))
}

#[test]
fn test_open_without_library_file_is_empty() {
    let fixture = Fixture::new();
    let service = CatalogService::open(
        fixture.config(false, true),
        deps(MockReader::new(), MockWriter::new()),
    )
    .unwrap();

    assert!(service.catalog().is_empty());
}

#[test]
fn test_import_save_and_reopen() {
    let fixture = Fixture::new();
    let mut service = CatalogService::open(
        fixture.config(false, true),
        deps(hits_reader(), MockWriter::new()),
    )
    .unwrap();

    let report = service
        .import_folder(None, &CancellationToken::new())
        .unwrap();
    assert_eq!(report.imported, 2);
    service.create_playlist("Favourites").unwrap();
    service
        .add_song_to_playlist("Favourites", &fixture.music().join("2.mp3"))
        .unwrap();
    service.save().unwrap();

    let reopened = CatalogService::open(
        fixture.config(false, true),
        deps(MockReader::new(), MockWriter::new()),
    )
    .unwrap();
    let catalog = reopened.catalog();
    assert_eq!(catalog.song_count(), 2);
    assert_eq!(catalog.album("Hits").unwrap().songs().count(), 2);
    assert_eq!(catalog.playlist_songs("Favourites")[0].title, "Track 2");
    assert_eq!(catalog.songs().next().unwrap().runtime_display(), "3:20");
}

#[test]
fn test_full_container_when_persisting_aggregates() {
    let fixture = Fixture::new();
    let mut service = CatalogService::new(
        fixture.config(true, true),
        deps(hits_reader(), MockWriter::new()),
    );
    service
        .import_file(&fixture.music().join("1.mp3"))
        .unwrap();
    service.save().unwrap();

    let bytes = fs::read(fixture.library()).unwrap();
    assert_eq!(&bytes[..4], b"MLIB");
    assert_eq!(bytes[4], 2);
}

#[test]
fn test_update_writes_tags_when_enabled() {
    let fixture = Fixture::new();
    let mut writer = MockWriter::new();
    writer
        .expect_write()
        .withf(|_, fields| fields.genre == "Pop")
        .times(1)
        .returning(|_, _| Ok(()));

    let mut service = CatalogService::new(fixture.config(false, true), deps(MockReader::new(), writer));
    service.add_song(Song::new("/a.mp3")).unwrap();

    let edit = SongEdit {
        genre: Some("Pop".to_string()),
        ..SongEdit::default()
    };
    service
        .update_song_fields(Path::new("/a.mp3"), &edit)
        .unwrap();
}

#[test]
fn test_update_skips_tags_when_disabled() {
    let fixture = Fixture::new();
    let mut writer = MockWriter::new();
    writer.expect_write().never();

    let mut service = CatalogService::new(fixture.config(false, false), deps(MockReader::new(), writer));
    service.add_song(Song::new("/a.mp3")).unwrap();

    let edited = Song {
        title: "Edited".to_string(),
        ..Song::new("/a.mp3")
    };
    service.update_song(Path::new("/a.mp3"), edited).unwrap();
    assert_eq!(service.catalog().song(Path::new("/a.mp3")).unwrap().title, "Edited");
}

#[test]
fn test_update_reports_tag_write_failure() {
    let fixture = Fixture::new();
    let mut writer = MockWriter::new();
    writer.expect_write().returning(|path, _| {
        Err(TagError::WriteFailed {
            path: path.to_path_buf(),
            message: "locked".to_string(),
        })
    });

    let mut service = CatalogService::new(fixture.config(false, true), deps(MockReader::new(), writer));
    service.add_song(Song::new("/a.mp3")).unwrap();

    let edited = Song {
        title: "Edited".to_string(),
        ..Song::new("/a.mp3")
    };
    let result = service.update_song(Path::new("/a.mp3"), edited);

    assert!(matches!(
        result,
        Err(CoreError::Library(LibraryError::TagWrite { .. }))
    ));
    assert_eq!(service.catalog().song(Path::new("/a.mp3")).unwrap().title, "Edited");
}

#[test]
fn test_failed_load_keeps_catalog() {
    let fixture = Fixture::new();
    fs::write(fixture.library(), b"garbage").unwrap();

    let mut service = CatalogService::new(
        fixture.config(false, true),
        deps(MockReader::new(), MockWriter::new()),
    );
    service.add_song(Song::new("/keep.mp3")).unwrap();

    let result = service.load();
    assert!(matches!(result, Err(CoreError::Library(ref e)) if e.is_format_error()));
    assert_eq!(service.catalog().song_count(), 1);

    let reopen = CatalogService::open(
        fixture.config(false, true),
        deps(MockReader::new(), MockWriter::new()),
    );
    assert!(reopen.is_err());
}
