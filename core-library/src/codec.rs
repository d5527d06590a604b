//! # Library Container Codec
//!
//! Reads and writes the `.library` container.
//!
//! ## Layout
//!
//! ```text
//! magic    4 bytes  "MLIB"
//! shape    u8       1 = songs only, 2 = full
//! counts   u32 LE   songs, playlists                      (songs only)
//!          u32 LE   songs, albums, artists, playlists     (full)
//! records  tag u8, length u32 LE, MessagePack payload
//! ```
//!
//! Records follow the counts collection by collection. Albums, artists and
//! playlists refer to songs by path and artists refer to albums by their
//! position in the album records.
//!
//! A songs-only container carries no aggregates: albums and artists are
//! regrouped from the songs on load. A full container is loaded as stored.
//!
//! Decoding always builds a fresh [`Catalog`]; the live catalog is replaced
//! only once the whole file has been read successfully.

use crate::catalog::{Catalog, Placement};
use crate::error::{LibraryError, Result};
use crate::models::{Album, AlbumId, Artist, ArtistId, Playlist, Song, SongId, TrackSlot};
use core_runtime::config::{has_library_extension, LIBRARY_EXTENSION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Leading bytes of every container
pub const MAGIC: &[u8; 4] = b"MLIB";

/// Which collections a container carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerShape {
    /// Songs and playlists; albums and artists are rebuilt on load
    #[default]
    SongsOnly,
    /// Songs, albums, artists and playlists, loaded verbatim
    Full,
}

impl ContainerShape {
    fn to_byte(self) -> u8 {
        match self {
            ContainerShape::SongsOnly => 1,
            ContainerShape::Full => 2,
        }
    }

    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            1 => Ok(ContainerShape::SongsOnly),
            2 => Ok(ContainerShape::Full),
            other => Err(LibraryError::Format(format!(
                "Unrecognized container shape {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordTag {
    Song = 1,
    Album = 2,
    Artist = 3,
    Playlist = 4,
}

#[derive(Debug, Serialize, Deserialize)]
struct AlbumRecord {
    title: String,
    year: u32,
    artist: String,
    track_count: u32,
    tracks: Vec<Option<PathBuf>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArtistRecord {
    name: String,
    albums: Vec<u32>,
    songs: Vec<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlaylistRecord {
    title: String,
    songs: Vec<PathBuf>,
}

// =============================================================================
// Encoding
// =============================================================================

/// Serialize `catalog` into a container of the given shape
///
/// # Errors
///
/// Returns [`LibraryError::Encode`] if a record cannot be serialized, for
/// example a path that is not valid UTF-8.
pub fn encode(catalog: &Catalog, shape: ContainerShape) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    writer.write_bytes(MAGIC);
    writer.write_u8(shape.to_byte());

    let songs: Vec<&Song> = catalog.songs().collect();
    let song_path = |id: &SongId| catalog.song_by_id(*id).map(|song| song.path.clone());

    writer.write_count(songs.len())?;
    if shape == ContainerShape::Full {
        writer.write_count(catalog.albums().len())?;
        writer.write_count(catalog.artists().len())?;
    }
    writer.write_count(catalog.playlists().len())?;

    for song in &songs {
        writer.write_record(RecordTag::Song, song)?;
    }

    if shape == ContainerShape::Full {
        for album in catalog.albums() {
            let record = AlbumRecord {
                title: album.title().to_string(),
                year: album.year(),
                artist: album.artist().to_string(),
                track_count: u32::try_from(album.track_count())
                    .map_err(|_| LibraryError::Encode(format!("Album {} declares too many tracks", album)))?,
                tracks: album
                    .tracks()
                    .iter()
                    .map(|slot| slot.song().as_ref().and_then(song_path))
                    .collect(),
            };
            writer.write_record(RecordTag::Album, &record)?;
        }

        for artist in catalog.artists() {
            let albums = artist
                .albums()
                .iter()
                .map(|id| {
                    u32::try_from(id.0)
                        .map_err(|_| LibraryError::Encode(format!("Album position {} too large", id.0)))
                })
                .collect::<Result<Vec<u32>>>()?;
            let record = ArtistRecord {
                name: artist.name().to_string(),
                albums,
                songs: artist.songs().iter().filter_map(song_path).collect(),
            };
            writer.write_record(RecordTag::Artist, &record)?;
        }
    }

    for playlist in catalog.playlists() {
        let record = PlaylistRecord {
            title: playlist.title().to_string(),
            songs: playlist.tracks().iter().filter_map(song_path).collect(),
        };
        writer.write_record(RecordTag::Playlist, &record)?;
    }

    Ok(writer.finish())
}

struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Writer { buffer: Vec::new() }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    fn write_u32_le(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    fn write_count(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count)
            .map_err(|_| LibraryError::Encode(format!("Collection of {} entries is too large", count)))?;
        self.write_u32_le(count);
        Ok(())
    }

    fn write_record<T: Serialize>(&mut self, tag: RecordTag, record: &T) -> Result<()> {
        let payload = rmp_serde::to_vec_named(record)
            .map_err(|e| LibraryError::Encode(format!("{:?} record: {}", tag, e)))?;
        self.write_u8(tag as u8);
        self.write_count(payload.len())?;
        self.write_bytes(&payload);
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Parse a container into a new catalog
///
/// # Errors
///
/// - [`LibraryError::Format`] if the bytes are not a container or the shape is unknown
/// - [`LibraryError::Decode`] if the container is truncated, a record is malformed
///   or out of place, a reference cannot be resolved, or bytes trail the last record
pub fn decode(bytes: &[u8]) -> Result<Catalog> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(LibraryError::Format(
            "Not a media library container".to_string(),
        ));
    }

    let mut cursor = Cursor::new(&bytes[MAGIC.len()..]);
    let shape = ContainerShape::from_byte(cursor.read_u8()?)?;

    let catalog = match shape {
        ContainerShape::SongsOnly => decode_songs_only(&mut cursor)?,
        ContainerShape::Full => decode_full(&mut cursor)?,
    };

    if cursor.remaining() > 0 {
        return Err(LibraryError::Decode(format!(
            "{} unexpected bytes after the last record",
            cursor.remaining()
        )));
    }

    Ok(catalog)
}

fn decode_songs_only(cursor: &mut Cursor<'_>) -> Result<Catalog> {
    let song_count = cursor.read_u32_le()?;
    let playlist_count = cursor.read_u32_le()?;

    let mut catalog = Catalog::new();
    read_songs(cursor, &mut catalog, song_count)?;
    read_playlists(cursor, &mut catalog, playlist_count)?;

    catalog.validate();
    Ok(catalog)
}

fn decode_full(cursor: &mut Cursor<'_>) -> Result<Catalog> {
    let song_count = cursor.read_u32_le()?;
    let album_count = cursor.read_u32_le()?;
    let artist_count = cursor.read_u32_le()?;
    let playlist_count = cursor.read_u32_le()?;

    let mut catalog = Catalog::new();
    read_songs(cursor, &mut catalog, song_count)?;

    for _ in 0..album_count {
        let record: AlbumRecord = cursor.read_record(RecordTag::Album)?;
        let album_id = AlbumId(catalog.albums.len());
        let track_count = record.track_count as usize;
        if record.tracks.len() < track_count {
            return Err(LibraryError::Decode(format!(
                "Album {} declares {} tracks but stores {} slots",
                record.title,
                track_count,
                record.tracks.len()
            )));
        }

        let mut tracks = Vec::with_capacity(record.tracks.len());
        for (index, path) in record.tracks.iter().enumerate() {
            match path {
                Some(path) => {
                    let id = resolve_song(&catalog, path)?;
                    place(&mut catalog, id, Placement::Album {
                        album: album_id,
                        slot: index + 1,
                    })?;
                    tracks.push(TrackSlot::Filled(id));
                }
                None => tracks.push(TrackSlot::Empty),
            }
        }

        catalog
            .album_index
            .entry(record.title.clone())
            .or_default()
            .push(album_id);
        catalog
            .albums
            .push(Album::from_slots(record.title, record.year, record.artist, track_count, tracks));
    }

    for _ in 0..artist_count {
        let record: ArtistRecord = cursor.read_record(RecordTag::Artist)?;
        let artist_id = ArtistId(catalog.artists.len());
        if catalog.artist_index.contains_key(&record.name) {
            return Err(LibraryError::Decode(format!(
                "Artist {} stored twice",
                record.name
            )));
        }

        let mut albums = Vec::new();
        for position in record.albums {
            let album = AlbumId(position as usize);
            if album.0 >= catalog.albums.len() {
                return Err(LibraryError::Decode(format!(
                    "Artist {} refers to missing album position {}",
                    record.name, position
                )));
            }
            if !albums.contains(&album) {
                albums.push(album);
            }
        }

        let mut songs = Vec::new();
        for path in &record.songs {
            let id = resolve_song(&catalog, path)?;
            place(&mut catalog, id, Placement::Standalone(artist_id))?;
            songs.push(id);
        }

        catalog.artist_index.insert(record.name.clone(), artist_id);
        catalog
            .artists
            .push(Artist::from_parts(record.name, albums, songs));
    }

    read_playlists(cursor, &mut catalog, playlist_count)?;
    Ok(catalog)
}

fn read_songs(cursor: &mut Cursor<'_>, catalog: &mut Catalog, count: u32) -> Result<()> {
    for _ in 0..count {
        let song: Song = cursor.read_record(RecordTag::Song)?;
        song.validate().map_err(LibraryError::Decode)?;
        if catalog.song_index.contains_key(&song.path) {
            return Err(LibraryError::Decode(format!(
                "Song {} stored twice",
                song.path.display()
            )));
        }
        catalog.insert_song(song);
    }
    Ok(())
}

fn read_playlists(cursor: &mut Cursor<'_>, catalog: &mut Catalog, count: u32) -> Result<()> {
    for _ in 0..count {
        let record: PlaylistRecord = cursor.read_record(RecordTag::Playlist)?;
        if catalog.playlist_exists(&record.title) {
            return Err(LibraryError::Decode(format!(
                "Playlist {} stored twice",
                record.title
            )));
        }

        let tracks = record
            .songs
            .iter()
            .map(|path| resolve_song(catalog, path))
            .collect::<Result<Vec<SongId>>>()?;
        catalog.playlists.push(Playlist::from_parts(record.title, tracks));
    }
    Ok(())
}

fn resolve_song(catalog: &Catalog, path: &Path) -> Result<SongId> {
    catalog.song_id(path).ok_or_else(|| {
        LibraryError::Decode(format!("Reference to unknown song {}", path.display()))
    })
}

fn place(catalog: &mut Catalog, id: SongId, placement: Placement) -> Result<()> {
    if catalog.placements.insert(id, placement).is_some() {
        return Err(LibraryError::Decode(format!(
            "{} is grouped more than once",
            id
        )));
    }
    Ok(())
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(LibraryError::Decode("Unexpected end of file".to_string()));
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_record<T: DeserializeOwned>(&mut self, expected: RecordTag) -> Result<T> {
        let tag = self.read_u8()?;
        if tag != expected as u8 {
            return Err(LibraryError::Decode(format!(
                "Expected {:?} record, found tag {}",
                expected, tag
            )));
        }

        let len = self.read_u32_le()? as usize;
        let payload = self.read_bytes(len)?;
        rmp_serde::from_slice(payload)
            .map_err(|e| LibraryError::Decode(format!("Malformed {:?} record: {}", expected, e)))
    }
}

// =============================================================================
// Files
// =============================================================================

fn ensure_library_path(path: &Path) -> Result<()> {
    if !has_library_extension(path) {
        return Err(LibraryError::Format(format!(
            "{} is not a .{} file",
            path.display(),
            LIBRARY_EXTENSION
        )));
    }
    Ok(())
}

/// Read a container file into a new catalog
///
/// # Errors
///
/// - [`LibraryError::Format`] if the path lacks the `.library` suffix or is not a
///   regular file; nothing is read in that case
/// - [`LibraryError::Io`] if the file cannot be read
/// - anything [`decode`] reports
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    ensure_library_path(path)?;

    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(LibraryError::Format(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Write `catalog` to `path` through a sibling temporary file
///
/// # Errors
///
/// - [`LibraryError::Format`] if the path lacks the `.library` suffix
/// - [`LibraryError::Encode`] or [`LibraryError::Io`] if writing fails
pub fn write_catalog(catalog: &Catalog, path: &Path, shape: ContainerShape) -> Result<()> {
    ensure_library_path(path)?;

    let bytes = encode(catalog, shape)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    if let Err(e) = fs::write(&staging, &bytes).and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Library container written");
    Ok(())
}

impl Catalog {
    /// Replace this catalog with the contents of a `.library` file
    ///
    /// On any error the catalog is left exactly as it was.
    ///
    /// # Errors
    ///
    /// See [`read_catalog`].
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let loaded = read_catalog(path)?;
        *self = loaded;

        info!(
            path = %path.display(),
            songs = self.song_count(),
            albums = self.albums().len(),
            artists = self.artists().len(),
            playlists = self.playlists().len(),
            "Library loaded"
        );
        Ok(())
    }

    /// Save as a songs-only container
    ///
    /// # Errors
    ///
    /// See [`write_catalog`].
    pub fn save(&self, path: &Path) -> Result<()> {
        self.save_as(path, ContainerShape::SongsOnly)
    }

    /// Save with an explicit container shape
    ///
    /// # Errors
    ///
    /// See [`write_catalog`].
    pub fn save_as(&self, path: &Path, shape: ContainerShape) -> Result<()> {
        write_catalog(self, path, shape)?;
        info!(
            path = %path.display(),
            ?shape,
            songs = self.song_count(),
            playlists = self.playlists().len(),
            "Library saved"
        );
        Ok(())
    }
}
