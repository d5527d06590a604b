//! # Identity Matcher
//!
//! Decides whether an incoming song belongs to an album already in the
//! catalog, or whether it carries enough information to found a new one.
//!
//! ## Matching Rules
//!
//! A candidate album matches when its title equals the song's album name and,
//! for each of track count, year and artist, either side leaves the field
//! unknown or both sides agree. Candidates are tried in insertion order and the
//! first acceptable one wins.
//!
//! Matching settles which album a song belongs to; whether it also gets a slot
//! there is a separate decision. A song with no usable position, or whose
//! slot already holds a different song, still matches (and back-fills) the
//! album but is not placed on it. Slots are only ever overwritten through an
//! explicit track assignment, and no second album with the same identity is
//! founded for such a song.
//!
//! ## Back-fill
//!
//! Once a match is found, missing year and artist values are copied across in
//! both directions so aggregate metadata improves as more songs arrive.

use crate::models::{Album, AlbumId, Song, SongId, TrackSlot};

/// Where a song would land on a candidate album
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDecision {
    /// The slot (1-based) is free or already holds this song
    Fill(usize),
    /// The slot lies past the album's last slot and the song declares no
    /// track count; grow the album to reach it
    Extend(usize),
    /// The song has no usable track number; it joins the album's metadata only
    Unpositioned,
    /// The slot holds a different song
    Occupied,
}

/// Result of a successful album lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlbumMatch {
    pub album: AlbumId,
    pub decision: SlotDecision,
}

/// Which sides a back-fill changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Backfill {
    pub album_changed: bool,
    pub song_changed: bool,
}

/// Permissive multi-field check: every field known on both sides must agree
pub fn fields_agree(album: &Album, song: &Song) -> bool {
    let count_ok = album.track_count() == 0
        || song.track_count == 0
        || album.track_count() == song.track_count as usize;
    let year_ok = album.year() == 0 || song.year == 0 || album.year() == song.year;
    let artist_ok = !album.has_artist() || !song.has_artist() || album.artist() == song.artist;

    count_ok && year_ok && artist_ok
}

/// Where `song` (stored as `id`) would be placed on `album`
///
/// A track number past the song's own known track count is unusable.
pub fn slot_decision(album: &Album, song: &Song, id: SongId) -> SlotDecision {
    let n = song.track_number as usize;
    if n == 0 || (song.track_count != 0 && song.track_number > song.track_count) {
        return SlotDecision::Unpositioned;
    }

    match album.slot(n) {
        None if song.track_count == 0 => SlotDecision::Extend(n),
        None => SlotDecision::Unpositioned,
        Some(TrackSlot::Empty) => SlotDecision::Fill(n),
        Some(TrackSlot::Filled(existing)) if *existing == id => SlotDecision::Fill(n),
        Some(TrackSlot::Filled(_)) => SlotDecision::Occupied,
    }
}

/// Scan `candidates` (albums sharing the song's album title, in insertion
/// order) for the first one the song can join
///
/// Returns `None` when the song declares no album or nothing matches.
pub fn find_album<'a, I>(candidates: I, song: &Song, id: SongId) -> Option<AlbumMatch>
where
    I: IntoIterator<Item = (AlbumId, &'a Album)>,
{
    if !song.has_album() {
        return None;
    }

    candidates
        .into_iter()
        .find(|(_, album)| album.title() == song.album && fields_agree(album, song))
        .map(|(album_id, album)| AlbumMatch {
            album: album_id,
            decision: slot_decision(album, song, id),
        })
}

/// Whether the song carries enough information to found a new album
pub fn can_found_album(song: &Song) -> bool {
    song.has_album() && song.track_number >= 1 && song.track_number <= song.track_count
}

/// A fresh album founded by `song`, which is not placed yet
pub fn found_album(song: &Song) -> Album {
    Album::new(
        song.album.clone(),
        song.year,
        song.artist.clone(),
        song.track_count as usize,
    )
}

/// Copy missing year and artist values between a matched album and song
pub fn backfill(album: &mut Album, song: &mut Song) -> Backfill {
    let mut result = Backfill::default();

    if album.year() == 0 && song.year != 0 {
        album.set_year(song.year);
        result.album_changed = true;
    } else if song.year == 0 && album.year() != 0 {
        song.year = album.year();
        result.song_changed = true;
    }

    if !album.has_artist() && song.has_artist() {
        album.set_artist(song.artist.clone());
        result.album_changed = true;
    } else if !song.has_artist() && album.has_artist() {
        song.artist = album.artist().to_string();
        result.song_changed = true;
    }

    result
}
