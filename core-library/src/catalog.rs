//! # Catalog
//!
//! The single owner of every song, album, artist and playlist.
//!
//! ## Storage
//!
//! Songs live in an arena addressed by [`SongId`]; removing a song leaves an
//! empty cell so ids held by albums, artists and playlists never shift.
//! Albums and artists are aggregates over songs and are kept in insertion
//! order, which is also the matcher's tie-break order.
//!
//! ## Consistency
//!
//! After every mutation:
//! - each song that could be placed on an album occupies exactly one slot
//! - each song with an artist is reachable from exactly one artist, either
//!   directly or through its album
//! - no two songs share a path
//!
//! [`Catalog::validate`] throws the aggregates away and replays the songs, so
//! albums and artists can always be derived from songs alone.

use crate::error::{LibraryError, Result};
use crate::matcher::{self, SlotDecision};
use crate::models::{Album, AlbumId, Artist, ArtistId, Playlist, Song, SongEdit, SongId};
use bridge_traits::tags::TagWriter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a song currently hangs in the aggregate graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Album { album: AlbumId, slot: usize },
    Standalone(ArtistId),
}

/// Result of [`Catalog::add_song`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The song was new and has been grouped
    Added(SongId),
    /// A song with the same path was already present; nothing changed
    Duplicate(SongId),
}

impl AddOutcome {
    pub fn id(&self) -> SongId {
        match self {
            AddOutcome::Added(id) | AddOutcome::Duplicate(id) => *id,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// In-memory music catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) songs: Vec<Option<Song>>,
    pub(crate) song_index: HashMap<PathBuf, SongId>,
    pub(crate) albums: Vec<Album>,
    pub(crate) album_index: HashMap<String, Vec<AlbumId>>,
    pub(crate) artists: Vec<Artist>,
    pub(crate) artist_index: HashMap<String, ArtistId>,
    pub(crate) playlists: Vec<Playlist>,
    pub(crate) placements: HashMap<SongId, Placement>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the catalog holds no songs and no playlists
    pub fn is_empty(&self) -> bool {
        self.song_index.is_empty() && self.playlists.is_empty()
    }

    // =========================================================================
    // Song queries
    // =========================================================================

    /// Live songs in insertion order
    pub fn songs(&self) -> impl Iterator<Item = &Song> + '_ {
        self.songs.iter().flatten()
    }

    /// Live song ids in insertion order
    pub fn song_ids(&self) -> impl Iterator<Item = SongId> + '_ {
        self.songs
            .iter()
            .enumerate()
            .filter(|(_, song)| song.is_some())
            .map(|(index, _)| SongId(index))
    }

    pub fn song_count(&self) -> usize {
        self.song_index.len()
    }

    /// Look up a song by path
    pub fn song(&self, path: &Path) -> Option<&Song> {
        self.song_id(path).and_then(|id| self.song_by_id(id))
    }

    pub fn song_id(&self, path: &Path) -> Option<SongId> {
        self.song_index.get(path).copied()
    }

    pub fn song_by_id(&self, id: SongId) -> Option<&Song> {
        self.songs.get(id.0).and_then(Option::as_ref)
    }

    fn resolve_songs<'a>(&'a self, ids: impl IntoIterator<Item = SongId> + 'a) -> Vec<&'a Song> {
        ids.into_iter().filter_map(|id| self.song_by_id(id)).collect()
    }

    // =========================================================================
    // Album queries
    // =========================================================================

    /// Albums in creation order
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// First album with the given title
    pub fn album(&self, title: &str) -> Option<&Album> {
        self.album_id(title).and_then(|id| self.album_by_id(id))
    }

    /// First album with the given title
    pub fn album_id(&self, title: &str) -> Option<AlbumId> {
        self.album_index.get(title).and_then(|ids| ids.first()).copied()
    }

    pub fn album_by_id(&self, id: AlbumId) -> Option<&Album> {
        self.albums.get(id.0)
    }

    /// Songs in the album's filled slots, in track order
    pub fn album_songs(&self, id: AlbumId) -> Vec<&Song> {
        match self.album_by_id(id) {
            Some(album) => self.resolve_songs(album.songs()),
            None => Vec::new(),
        }
    }

    /// Song at track `n` (1-based) of the album
    pub fn album_track(&self, id: AlbumId, n: usize) -> Option<&Song> {
        self.album_by_id(id)
            .and_then(|album| album.track(n))
            .and_then(|song| self.song_by_id(song))
    }

    // =========================================================================
    // Artist queries
    // =========================================================================

    /// Artists in creation order
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Look up an artist by exact name
    pub fn artist(&self, name: &str) -> Option<&Artist> {
        self.artist_id(name).and_then(|id| self.artist_by_id(id))
    }

    pub fn artist_id(&self, name: &str) -> Option<ArtistId> {
        self.artist_index.get(name).copied()
    }

    pub fn artist_by_id(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.get(id.0)
    }

    /// Album of the given title among the artist's albums
    pub fn artist_album(&self, name: &str, title: &str) -> Option<&Album> {
        let artist = self.artist(name)?;
        artist
            .albums()
            .iter()
            .filter_map(|id| self.album_by_id(*id))
            .find(|album| album.title() == title)
    }

    /// Song of the given title among the artist's songs
    pub fn artist_song(&self, name: &str, title: &str) -> Option<&Song> {
        self.artist_songs(name)
            .into_iter()
            .find(|song| song.title == title)
    }

    /// Standalone songs first, then album tracks album by album
    pub fn artist_songs(&self, name: &str) -> Vec<&Song> {
        let Some(artist) = self.artist(name) else {
            return Vec::new();
        };

        let mut songs = self.resolve_songs(artist.songs().iter().copied());
        for album in artist.albums().iter().filter_map(|id| self.album_by_id(*id)) {
            songs.extend(self.resolve_songs(album.songs()));
        }
        songs
    }

    // =========================================================================
    // Playlist queries
    // =========================================================================

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, title: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.title() == title)
    }

    pub fn playlist_exists(&self, title: &str) -> bool {
        self.playlist(title).is_some()
    }

    /// Songs of the playlist in playlist order
    pub fn playlist_songs(&self, title: &str) -> Vec<&Song> {
        match self.playlist(title) {
            Some(playlist) => self.resolve_songs(playlist.tracks().iter().copied()),
            None => Vec::new(),
        }
    }

    fn playlist_position(&self, title: &str) -> Option<usize> {
        self.playlists.iter().position(|p| p.title() == title)
    }

    // =========================================================================
    // Song mutations
    // =========================================================================

    /// Add a song and group it into albums and artists
    ///
    /// Adding a path that is already cataloged changes nothing and reports
    /// [`AddOutcome::Duplicate`].
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::InvalidInput`] if the song has no path.
    pub fn add_song(&mut self, song: Song) -> Result<AddOutcome> {
        validate_song(&song)?;

        if let Some(&id) = self.song_index.get(&song.path) {
            debug!(path = %song.path.display(), "Song already cataloged");
            return Ok(AddOutcome::Duplicate(id));
        }

        let id = self.insert_song(song);
        self.place(id);
        Ok(AddOutcome::Added(id))
    }

    /// Replace the song stored at `old_path` without touching its file
    ///
    /// The song keeps its id, so playlists follow the edit. When a field that
    /// drives grouping changed, the song leaves its album slot or artist and is
    /// matched again.
    ///
    /// # Errors
    ///
    /// - [`LibraryError::NotFound`] if `old_path` is not cataloged
    /// - [`LibraryError::AlreadyExists`] if the new path belongs to another song
    /// - [`LibraryError::InvalidInput`] if the new song has no path
    pub fn replace_song(&mut self, old_path: &Path, song: Song) -> Result<SongId> {
        validate_song(&song)?;

        let id = self
            .song_id(old_path)
            .ok_or_else(|| LibraryError::not_found("Song", old_path.display()))?;

        let moved = song.path.as_path() != old_path;
        if moved && self.song_index.contains_key(&song.path) {
            return Err(LibraryError::already_exists("Song", song.path.display()));
        }

        let regroup = self
            .song_by_id(id)
            .map(|current| current.grouping_differs(&song))
            .unwrap_or(true);

        if regroup {
            self.detach(id);
        }
        if moved {
            self.song_index.remove(old_path);
            self.song_index.insert(song.path.clone(), id);
        }
        self.songs[id.0] = Some(song);
        if regroup {
            self.place(id);
        }

        debug!(%id, regroup, "Song replaced");
        Ok(id)
    }

    /// Replace a song and write its tags back to the audio file
    ///
    /// # Errors
    ///
    /// Everything [`Catalog::replace_song`] reports, plus
    /// [`LibraryError::TagWrite`] when the file could not be updated. In that
    /// case the catalog already holds the new values and keeps them.
    pub fn update_song(&mut self, old_path: &Path, song: Song, writer: &dyn TagWriter) -> Result<SongId> {
        let id = self.replace_song(old_path, song)?;
        self.write_tags(id, writer)?;
        Ok(id)
    }

    /// Apply a field-level edit to the song at `path` and write its tags
    ///
    /// # Errors
    ///
    /// See [`Catalog::update_song`].
    pub fn update_song_fields(&mut self, path: &Path, edit: &SongEdit, writer: &dyn TagWriter) -> Result<SongId> {
        let edited = self
            .song(path)
            .map(|song| edit.apply(song))
            .ok_or_else(|| LibraryError::not_found("Song", path.display()))?;
        self.update_song(path, edited, writer)
    }

    fn write_tags(&self, id: SongId, writer: &dyn TagWriter) -> Result<()> {
        let Some(song) = self.song_by_id(id) else {
            return Err(LibraryError::not_found("Song", id));
        };

        writer.write(&song.path, &song.to_tags()).map_err(|e| {
            warn!(path = %song.path.display(), error = %e, "Tag write failed; catalog keeps the new values");
            LibraryError::TagWrite {
                path: song.path.clone(),
                message: e.to_string(),
            }
        })
    }

    /// Remove a song from the catalog and every aggregate that refers to it
    ///
    /// Its album slot becomes empty; playlists drop every occurrence.
    pub fn remove_song(&mut self, path: &Path) -> Option<Song> {
        let id = self.song_index.remove(path)?;
        self.detach(id);
        for playlist in &mut self.playlists {
            playlist.remove_all(id);
        }

        debug!(%id, path = %path.display(), "Song removed");
        self.songs.get_mut(id.0).and_then(Option::take)
    }

    /// Put the song at `path` into slot `n` (1-based) of an album
    ///
    /// This is the only way to overwrite a filled slot. A displaced song falls
    /// back to its artist's standalone list.
    ///
    /// # Errors
    ///
    /// - [`LibraryError::NotFound`] if the song or album does not exist
    /// - [`LibraryError::InvalidInput`] if `n` is outside the album's slots
    pub fn set_album_track(&mut self, album: AlbumId, path: &Path, n: usize) -> Result<()> {
        let id = self
            .song_id(path)
            .ok_or_else(|| LibraryError::not_found("Song", path.display()))?;
        let target = self
            .albums
            .get(album.0)
            .ok_or_else(|| LibraryError::not_found("Album", album))?;

        if target.slot(n).is_none() {
            return Err(LibraryError::InvalidInput {
                field: "track".to_string(),
                message: format!("track {} is outside 1..={}", n, target.slot_count()),
            });
        }
        let displaced = target.track(n).filter(|existing| *existing != id);

        self.detach(id);
        self.albums[album.0].set_track(id, n);
        self.placements.insert(id, Placement::Album { album, slot: n });
        if let Some(name) = self.artist_name_of(id) {
            let artist = self.resolve_artist(&name);
            self.attach_album(artist, album);
        }

        if let Some(displaced) = displaced {
            self.placements.remove(&displaced);
            if let Some(name) = self.artist_name_of(displaced) {
                let artist = self.resolve_artist(&name);
                self.artists[artist.0].add_song(displaced);
                self.placements.insert(displaced, Placement::Standalone(artist));
            }
            debug!(%displaced, %album, slot = n, "Song displaced from album slot");
        }

        Ok(())
    }

    /// Drop every album and artist and regroup all songs from scratch
    ///
    /// Songs are replayed in insertion order, so the result equals what adding
    /// the same songs one by one would have produced.
    pub fn validate(&mut self) {
        self.albums.clear();
        self.album_index.clear();
        self.artists.clear();
        self.artist_index.clear();
        self.placements.clear();

        let ids: Vec<SongId> = self.song_ids().collect();
        for id in ids {
            self.place(id);
        }

        info!(
            songs = self.song_count(),
            albums = self.albums.len(),
            artists = self.artists.len(),
            "Rebuilt albums and artists from songs"
        );
    }

    // =========================================================================
    // Playlist mutations
    // =========================================================================

    /// Create an empty playlist
    ///
    /// # Errors
    ///
    /// - [`LibraryError::InvalidInput`] if the title is blank
    /// - [`LibraryError::AlreadyExists`] if a playlist has this title
    pub fn create_playlist(&mut self, title: &str) -> Result<()> {
        validate_playlist_title(title)?;
        if self.playlist_exists(title) {
            return Err(LibraryError::already_exists("Playlist", title));
        }

        self.playlists.push(Playlist::new(title));
        debug!(title, "Playlist created");
        Ok(())
    }

    /// Give a playlist a new title
    ///
    /// # Errors
    ///
    /// - [`LibraryError::NotFound`] if no playlist has the old title
    /// - [`LibraryError::AlreadyExists`] if another playlist has the new title
    /// - [`LibraryError::InvalidInput`] if the new title is blank
    pub fn rename_playlist(&mut self, old_title: &str, new_title: &str) -> Result<()> {
        validate_playlist_title(new_title)?;
        let index = self
            .playlist_position(old_title)
            .ok_or_else(|| LibraryError::not_found("Playlist", old_title))?;
        if old_title != new_title && self.playlist_exists(new_title) {
            return Err(LibraryError::already_exists("Playlist", new_title));
        }

        self.playlists[index].set_title(new_title);
        Ok(())
    }

    /// Delete a playlist; its songs stay in the catalog
    pub fn remove_playlist(&mut self, title: &str) -> Option<Playlist> {
        let index = self.playlist_position(title)?;
        Some(self.playlists.remove(index))
    }

    /// Append a song to a playlist, creating the playlist on first use
    ///
    /// # Errors
    ///
    /// - [`LibraryError::NotFound`] if the song is not cataloged
    /// - [`LibraryError::InvalidInput`] if the playlist title is blank
    pub fn add_song_to_playlist(&mut self, title: &str, path: &Path) -> Result<()> {
        let id = self
            .song_id(path)
            .ok_or_else(|| LibraryError::not_found("Song", path.display()))?;

        let index = match self.playlist_position(title) {
            Some(index) => index,
            None => {
                self.create_playlist(title)?;
                self.playlists.len() - 1
            }
        };

        self.playlists[index].push(id);
        Ok(())
    }

    /// Remove the first occurrence of a song from a playlist
    ///
    /// Returns `false` when the playlist or the song is missing.
    pub fn remove_song_from_playlist(&mut self, title: &str, path: &Path) -> bool {
        let (Some(index), Some(id)) = (self.playlist_position(title), self.song_id(path)) else {
            return false;
        };
        self.playlists[index].remove_first(id)
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    pub(crate) fn insert_song(&mut self, song: Song) -> SongId {
        let id = SongId(self.songs.len());
        self.song_index.insert(song.path.clone(), id);
        self.songs.push(Some(song));
        id
    }

    /// Run the matcher for one stored song and record where it landed
    fn place(&mut self, id: SongId) {
        // Taken out of the arena so the matcher can back-fill it while albums
        // are borrowed.
        let Some(mut song) = self.songs.get_mut(id.0).and_then(Option::take) else {
            return;
        };

        let slot = self.resolve_album(id, &mut song);
        let artist = if song.has_artist() {
            Some(self.resolve_artist(&song.artist))
        } else {
            None
        };

        match (slot, artist) {
            (Some((album, slot)), artist) => {
                self.placements.insert(id, Placement::Album { album, slot });
                if let Some(artist) = artist {
                    self.attach_album(artist, album);
                }
                debug!(%id, %album, slot, "Song placed on album");
            }
            (None, Some(artist)) => {
                self.artists[artist.0].add_song(id);
                self.placements.insert(id, Placement::Standalone(artist));
                debug!(%id, %artist, "Song placed as standalone");
            }
            (None, None) => {
                debug!(%id, "Song has neither album slot nor artist");
            }
        }

        self.songs[id.0] = Some(song);
    }

    /// Match or found an album for the song and fill its slot
    fn resolve_album(&mut self, id: SongId, song: &mut Song) -> Option<(AlbumId, usize)> {
        if !song.has_album() {
            return None;
        }

        let found = {
            let albums = &self.albums;
            let candidates = self
                .album_index
                .get(&song.album)
                .into_iter()
                .flatten()
                .map(|album_id| (*album_id, &albums[album_id.0]));
            matcher::find_album(candidates, song, id)
        };

        if let Some(found) = found {
            let album = &mut self.albums[found.album.0];
            let filled = matcher::backfill(album, song);
            if filled.album_changed || filled.song_changed {
                debug!(album = %found.album, ?filled, "Back-filled album metadata");
            }

            let slot = match found.decision {
                SlotDecision::Fill(n) => n,
                SlotDecision::Extend(n) => {
                    album.grow_to(n);
                    n
                }
                SlotDecision::Unpositioned | SlotDecision::Occupied => return None,
            };
            album.set_track(id, slot);
            return Some((found.album, slot));
        }

        if !matcher::can_found_album(song) {
            return None;
        }

        let album_id = AlbumId(self.albums.len());
        let slot = song.track_number as usize;
        let mut album = matcher::found_album(song);
        album.set_track(id, slot);
        self.albums.push(album);
        self.album_index
            .entry(song.album.clone())
            .or_default()
            .push(album_id);

        debug!(album = %album_id, title = %song.album, "Album created");
        Some((album_id, slot))
    }

    /// Existing artist of that name, or a new one
    fn resolve_artist(&mut self, name: &str) -> ArtistId {
        if let Some(&id) = self.artist_index.get(name) {
            return id;
        }

        let id = ArtistId(self.artists.len());
        self.artists.push(Artist::new(name));
        self.artist_index.insert(name.to_string(), id);
        debug!(artist = %id, name, "Artist created");
        id
    }

    /// List `album` under `artist` unless an equal album is listed already
    fn attach_album(&mut self, artist: ArtistId, album: AlbumId) {
        let Some(entry) = self.albums.get(album.0) else {
            return;
        };
        let Some(listed) = self.artists.get(artist.0) else {
            return;
        };
        let duplicate = listed
            .albums()
            .iter()
            .any(|existing| self.albums.get(existing.0) == Some(entry));

        if !duplicate {
            self.artists[artist.0].add_album(album);
        }
    }

    /// Take a song out of its album slot or standalone list
    fn detach(&mut self, id: SongId) {
        match self.placements.remove(&id) {
            Some(Placement::Album { album, slot }) => {
                if let Some(album) = self.albums.get_mut(album.0) {
                    if album.track(slot) == Some(id) {
                        album.clear_track(slot);
                    }
                }
            }
            Some(Placement::Standalone(artist)) => {
                if let Some(artist) = self.artists.get_mut(artist.0) {
                    artist.remove_song(id);
                }
            }
            None => {}
        }
    }

    fn artist_name_of(&self, id: SongId) -> Option<String> {
        self.song_by_id(id)
            .filter(|song| song.has_artist())
            .map(|song| song.artist.clone())
    }
}

fn validate_song(song: &Song) -> Result<()> {
    song.validate().map_err(|message| LibraryError::InvalidInput {
        field: "path".to_string(),
        message,
    })
}

fn validate_playlist_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(LibraryError::InvalidInput {
            field: "title".to_string(),
            message: "Playlist title cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackSlot;

    fn track(path: &str, title: &str, album: &str, number: u32, count: u32) -> Song {
        Song {
            title: title.to_string(),
            artist: "Bob".to_string(),
            album: album.to_string(),
            year: 2000,
            track_number: number,
            track_count: count,
            ..Song::new(path)
        }
    }

    #[test]
    fn test_add_rejects_empty_path() {
        let mut catalog = Catalog::new();
        let result = catalog.add_song(Song::new(""));
        assert!(matches!(result, Err(LibraryError::InvalidInput { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_placements_follow_grouping() {
        let mut catalog = Catalog::new();
        let a = catalog
            .add_song(track("/a.mp3", "X", "Hits", 1, 2))
            .unwrap()
            .id();
        let loose = catalog
            .add_song(Song {
                artist: "Bob".to_string(),
                ..Song::new("/loose.mp3")
            })
            .unwrap()
            .id();

        assert_eq!(
            catalog.placements.get(&a),
            Some(&Placement::Album {
                album: AlbumId(0),
                slot: 1
            })
        );
        assert_eq!(catalog.placements.get(&loose), Some(&Placement::Standalone(ArtistId(0))));
    }

    #[test]
    fn test_occupied_slot_keeps_song_standalone() {
        let mut catalog = Catalog::new();
        catalog.add_song(track("/a.mp3", "X", "Hits", 1, 2)).unwrap();
        let b = catalog
            .add_song(track("/b.mp3", "X (remaster)", "Hits", 1, 2))
            .unwrap()
            .id();

        assert_eq!(catalog.albums().len(), 1);
        assert_eq!(catalog.album_index["Hits"], vec![AlbumId(0)]);
        assert_eq!(catalog.album_track(AlbumId(0), 1).unwrap().path, PathBuf::from("/a.mp3"));
        assert_eq!(catalog.placements.get(&b), Some(&Placement::Standalone(ArtistId(0))));

        let bob = catalog.artist("Bob").unwrap();
        assert_eq!(bob.albums(), &[AlbumId(0)]);
        assert_eq!(bob.songs(), &[b]);
    }

    #[test]
    fn test_attach_album_skips_equal_album() {
        let mut catalog = Catalog::new();
        catalog.add_song(track("/a.mp3", "X", "Hits", 1, 2)).unwrap();
        catalog.albums.push(Album::new("Hits", 2000, "Bob", 3));

        catalog.attach_album(ArtistId(0), AlbumId(1));
        catalog.attach_album(ArtistId(0), AlbumId(0));

        assert_eq!(catalog.artists[0].albums(), &[AlbumId(0)]);
    }

    #[test]
    fn test_unknown_track_number_stays_standalone() {
        let mut catalog = Catalog::new();
        catalog.add_song(track("/a.mp3", "X", "Hits", 1, 2)).unwrap();
        let mut bonus = track("/bonus.mp3", "Bonus", "Hits", 0, 0);
        bonus.year = 0;
        let id = catalog.add_song(bonus).unwrap().id();

        let bob = catalog.artist("Bob").unwrap();
        assert_eq!(bob.songs(), &[id]);
        // back-filled from the album it matched
        assert_eq!(catalog.song_by_id(id).unwrap().year, 2000);
    }

    #[test]
    fn test_extend_grows_album() {
        let mut catalog = Catalog::new();
        catalog.add_song(track("/a.mp3", "X", "Hits", 1, 2)).unwrap();
        let hidden = track("/h.mp3", "Hidden", "Hits", 5, 0);
        let id = catalog.add_song(hidden).unwrap().id();

        let album = catalog.album("Hits").unwrap();
        assert_eq!(album.slot_count(), 5);
        assert_eq!(album.track_count(), 2);
        assert_eq!(album.track(5), Some(id));
        assert_eq!(album.slot(3), Some(&TrackSlot::Empty));
    }

    #[test]
    fn test_detach_clears_only_own_slot() {
        let mut catalog = Catalog::new();
        let a = catalog
            .add_song(track("/a.mp3", "X", "Hits", 1, 2))
            .unwrap()
            .id();
        catalog.detach(a);

        assert!(catalog.album("Hits").unwrap().is_vacant());
        assert!(!catalog.placements.contains_key(&a));
        // detaching twice is harmless
        catalog.detach(a);
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut catalog = Catalog::new();
        catalog.add_song(track("/a.mp3", "X", "Hits", 1, 2)).unwrap();
        let b = catalog
            .add_song(track("/b.mp3", "Y", "Hits", 2, 2))
            .unwrap()
            .id();

        assert!(catalog.remove_song(Path::new("/a.mp3")).is_some());
        assert_eq!(catalog.songs.len(), 2);
        assert_eq!(catalog.song_ids().collect::<Vec<_>>(), vec![b]);
        assert!(catalog.remove_song(Path::new("/a.mp3")).is_none());
    }
}
