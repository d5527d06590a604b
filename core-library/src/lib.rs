//! # Library Management Module
//!
//! Owns the music catalog: songs and the albums, artists and playlists built
//! on top of them.
//!
//! ## Overview
//!
//! This module manages:
//! - The entity model ([`Song`], [`Album`], [`Artist`], [`Playlist`])
//! - Identity matching that groups songs with partial tags into albums
//! - The [`Catalog`] and its mutation operations
//! - The `.library` container codec
//! - Importing single files and folder trees through a tag reader
//!
//! ## Example
//!
//! ```
//! use core_library::{Catalog, Song};
//!
//! let mut catalog = Catalog::new();
//! for (path, title, track) in [("/a.mp3", "X", 1), ("/b.mp3", "Y", 2)] {
//!     catalog
//!         .add_song(Song {
//!             title: title.to_string(),
//!             artist: "Bob".to_string(),
//!             album: "Hits".to_string(),
//!             year: 2000,
//!             track_number: track,
//!             track_count: 2,
//!             ..Song::new(path)
//!         })
//!         .unwrap();
//! }
//!
//! let hits = catalog.album("Hits").unwrap();
//! assert_eq!(hits.songs().count(), 2);
//! assert!(catalog.artist("Bob").unwrap().songs().is_empty());
//! ```

pub mod catalog;
pub mod codec;
pub mod error;
pub mod import;
pub mod matcher;
pub mod models;

pub use catalog::{AddOutcome, Catalog};
pub use codec::{decode, encode, read_catalog, write_catalog, ContainerShape};
pub use error::{LibraryError, Result};
pub use import::{import_file, import_folder, ImportReport};
pub use models::{Album, AlbumId, Artist, ArtistId, Playlist, Song, SongEdit, SongId, TrackSlot};
