//! Domain models for the media catalog
//!
//! Songs are the source of truth. Albums and artists are aggregates derived
//! from songs and refer to them by [`SongId`] into the catalog's song arena
//! rather than holding the songs themselves.
//!
//! Equality and hashing follow each entity's identity key only:
//!
//! | Entity   | Identity key              |
//! |----------|---------------------------|
//! | Song     | file path                 |
//! | Album    | (title, year, artist)     |
//! | Artist   | name (case-sensitive)     |
//! | Playlist | title                     |

use bridge_traits::tags::TagFields;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

// =============================================================================
// ID Types
// =============================================================================

/// Position of a song in the catalog's song arena
///
/// Ids are assigned on insertion and never reused while the catalog lives.
/// They are not persisted; a reload assigns fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongId(pub usize);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "song#{}", self.0)
    }
}

/// Position of an album in the catalog's album list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlbumId(pub usize);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "album#{}", self.0)
    }
}

/// Position of an artist in the catalog's artist list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtistId(pub usize);

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artist#{}", self.0)
    }
}

// =============================================================================
// Song
// =============================================================================

/// A single audio file and its descriptive metadata
///
/// Numeric fields use `0` for "unknown", text fields use the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Song {
    /// Location of the audio file; the song's identity
    pub path: PathBuf,
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Release year
    pub year: u32,
    /// Genre
    pub genre: String,
    /// Album the song was originally released on
    pub album: String,
    /// Position on the album, 1-based
    pub track_number: u32,
    /// Tracks on the album
    pub track_count: u32,
    /// Play time in whole seconds
    pub runtime_secs: u32,
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl Song {
    /// Create a song with only its path set
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build a song from the tags read out of `path`
    pub fn from_tags(path: impl Into<PathBuf>, fields: TagFields) -> Self {
        Self {
            path: path.into(),
            title: fields.title,
            artist: fields.artist,
            year: fields.year,
            genre: fields.genre,
            album: fields.album,
            track_number: fields.track_number,
            track_count: fields.track_count,
            runtime_secs: fields.runtime_secs,
        }
    }

    /// Tags to write back to the audio file
    pub fn to_tags(&self) -> TagFields {
        TagFields {
            title: self.title.clone(),
            artist: self.artist.clone(),
            year: self.year,
            genre: self.genre.clone(),
            album: self.album.clone(),
            track_number: self.track_number,
            track_count: self.track_count,
            runtime_secs: self.runtime_secs,
        }
    }

    /// Validate song data
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("Song path cannot be empty".to_string());
        }

        Ok(())
    }

    /// Whether the song declares an original album
    pub fn has_album(&self) -> bool {
        !self.album.trim().is_empty()
    }

    /// Whether the song declares an artist
    pub fn has_artist(&self) -> bool {
        !self.artist.trim().is_empty()
    }

    /// Whether two versions of a song would be grouped differently
    pub fn grouping_differs(&self, other: &Song) -> bool {
        self.path != other.path
            || self.artist != other.artist
            || self.album != other.album
            || self.year != other.year
            || self.track_number != other.track_number
            || self.track_count != other.track_count
    }

    /// Run time as `m:ss`
    pub fn runtime_display(&self) -> String {
        format!("{}:{:02}", self.runtime_secs / 60, self.runtime_secs % 60)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.path.display())
        } else {
            write!(f, "{}", self.title)
        }
    }
}

/// Field-level edit of a song; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongEdit {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
    pub track_count: Option<u32>,
}

impl SongEdit {
    /// Return a copy of `song` with the edit applied
    pub fn apply(&self, song: &Song) -> Song {
        let mut edited = song.clone();
        if let Some(title) = &self.title {
            edited.title = title.clone();
        }
        if let Some(artist) = &self.artist {
            edited.artist = artist.clone();
        }
        if let Some(year) = self.year {
            edited.year = year;
        }
        if let Some(genre) = &self.genre {
            edited.genre = genre.clone();
        }
        if let Some(album) = &self.album {
            edited.album = album.clone();
        }
        if let Some(track_number) = self.track_number {
            edited.track_number = track_number;
        }
        if let Some(track_count) = self.track_count {
            edited.track_count = track_count;
        }
        edited
    }
}

// =============================================================================
// Album
// =============================================================================

/// One position on an album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackSlot {
    /// No known song occupies this position yet
    #[default]
    Empty,
    /// The position holds this song
    Filled(SongId),
}

impl TrackSlot {
    pub fn song(&self) -> Option<SongId> {
        match self {
            TrackSlot::Filled(id) => Some(*id),
            TrackSlot::Empty => None,
        }
    }
}

/// An album: an ordered run of track slots, 1-indexed in the public API
///
/// The declared track count comes from the song that founded the album and
/// is what matching compares against. The slot run can be longer when a song
/// without a known count lands past the end.
#[derive(Debug, Clone)]
pub struct Album {
    title: String,
    year: u32,
    artist: String,
    track_count: usize,
    tracks: Vec<TrackSlot>,
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.year == other.year && self.artist == other.artist
    }
}

impl Eq for Album {}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.year.hash(state);
        self.artist.hash(state);
    }
}

impl Album {
    /// Create an album with `track_count` empty slots
    pub fn new(title: impl Into<String>, year: u32, artist: impl Into<String>, track_count: usize) -> Self {
        Self {
            title: title.into(),
            year,
            artist: artist.into(),
            track_count,
            tracks: vec![TrackSlot::Empty; track_count],
        }
    }

    pub(crate) fn from_slots(
        title: String,
        year: u32,
        artist: String,
        track_count: usize,
        tracks: Vec<TrackSlot>,
    ) -> Self {
        Self {
            title,
            year,
            artist,
            track_count,
            tracks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year (0 = unknown)
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn set_year(&mut self, year: u32) {
        self.year = year;
    }

    /// Album artist (empty = unknown)
    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.artist = artist.into();
    }

    pub fn has_artist(&self) -> bool {
        !self.artist.trim().is_empty()
    }

    /// Declared number of tracks (0 = unknown)
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Number of slots, filled or not; never less than the declared count
    pub fn slot_count(&self) -> usize {
        self.tracks.len()
    }

    /// All slots in order
    pub fn tracks(&self) -> &[TrackSlot] {
        &self.tracks
    }

    /// Song at position `n` (1-based)
    ///
    /// Returns `None` for `n == 0`, `n > slot_count()` and empty slots.
    pub fn track(&self, n: usize) -> Option<SongId> {
        self.slot(n).and_then(TrackSlot::song)
    }

    /// Slot at position `n` (1-based), `None` when out of range
    pub fn slot(&self, n: usize) -> Option<&TrackSlot> {
        if n == 0 {
            return None;
        }
        self.tracks.get(n - 1)
    }

    /// Put `song` at position `n` (1-based), replacing whatever was there
    ///
    /// Returns `false` without changing anything when `n` is out of range.
    pub fn set_track(&mut self, song: SongId, n: usize) -> bool {
        if n == 0 || n > self.tracks.len() {
            return false;
        }
        self.tracks[n - 1] = TrackSlot::Filled(song);
        true
    }

    /// Empty position `n`, returning the song that was there
    pub fn clear_track(&mut self, n: usize) -> Option<SongId> {
        if n == 0 || n > self.tracks.len() {
            return None;
        }
        std::mem::take(&mut self.tracks[n - 1]).song()
    }

    /// Extend the album with empty slots until it has at least `n` of them
    ///
    /// The declared track count is left alone.
    pub(crate) fn grow_to(&mut self, n: usize) {
        if n > self.tracks.len() {
            self.tracks.resize(n, TrackSlot::Empty);
        }
    }

    /// Filled slots in order
    pub fn songs(&self) -> impl Iterator<Item = SongId> + '_ {
        self.tracks.iter().filter_map(TrackSlot::song)
    }

    /// Position (1-based) of `song` on this album
    pub fn position_of(&self, song: SongId) -> Option<usize> {
        self.tracks
            .iter()
            .position(|slot| *slot == TrackSlot::Filled(song))
            .map(|index| index + 1)
    }

    /// Whether no slot is filled
    pub fn is_vacant(&self) -> bool {
        self.tracks.iter().all(|slot| *slot == TrackSlot::Empty)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

// =============================================================================
// Artist
// =============================================================================

/// An artist with the albums it contributed to and its album-less songs
#[derive(Debug, Clone)]
pub struct Artist {
    name: String,
    albums: Vec<AlbumId>,
    songs: Vec<SongId>,
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Artist {}

impl Hash for Artist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            albums: Vec::new(),
            songs: Vec::new(),
        }
    }

    pub(crate) fn from_parts(name: String, albums: Vec<AlbumId>, songs: Vec<SongId>) -> Self {
        Self { name, albums, songs }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Albums in the order they were attached
    pub fn albums(&self) -> &[AlbumId] {
        &self.albums
    }

    /// Songs not attached to any album
    pub fn songs(&self) -> &[SongId] {
        &self.songs
    }

    pub fn has_album(&self, album: AlbumId) -> bool {
        self.albums.contains(&album)
    }

    pub fn has_song(&self, song: SongId) -> bool {
        self.songs.contains(&song)
    }

    pub(crate) fn add_album(&mut self, album: AlbumId) {
        self.albums.push(album);
    }

    pub(crate) fn add_song(&mut self, song: SongId) {
        if !self.has_song(song) {
            self.songs.push(song);
        }
    }

    pub(crate) fn remove_song(&mut self, song: SongId) -> bool {
        let before = self.songs.len();
        self.songs.retain(|id| *id != song);
        self.songs.len() != before
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Playlist
// =============================================================================

/// A user-ordered list of songs; the same song may appear more than once
#[derive(Debug, Clone)]
pub struct Playlist {
    title: String,
    tracks: Vec<SongId>,
}

impl PartialEq for Playlist {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Playlist {}

impl Hash for Playlist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl Playlist {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tracks: Vec::new(),
        }
    }

    pub(crate) fn from_parts(title: String, tracks: Vec<SongId>) -> Self {
        Self { title, tracks }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn tracks(&self) -> &[SongId] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Song at position `n` (1-based), `None` when out of range
    pub fn track(&self, n: usize) -> Option<SongId> {
        if n == 0 {
            return None;
        }
        self.tracks.get(n - 1).copied()
    }

    /// Replace position `n` (1-based); `false` when out of range
    pub fn set_track(&mut self, song: SongId, n: usize) -> bool {
        if n == 0 || n > self.tracks.len() {
            return false;
        }
        self.tracks[n - 1] = song;
        true
    }

    pub(crate) fn push(&mut self, song: SongId) {
        self.tracks.push(song);
    }

    /// Remove the first occurrence of `song`
    pub(crate) fn remove_first(&mut self, song: SongId) -> bool {
        match self.tracks.iter().position(|id| *id == song) {
            Some(index) => {
                self.tracks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every occurrence of `song`
    pub(crate) fn remove_all(&mut self, song: SongId) {
        self.tracks.retain(|id| *id != song);
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
