//! # Metadata Module
//!
//! Reads and writes the descriptive tags of audio files.
//!
//! ## Overview
//!
//! This module provides the desktop implementation of the tag capabilities
//! declared in `bridge-traits`:
//! - [`LoftyTagReader`] extracts title, artist, album, year, genre, track
//!   position and run time (ID3, Vorbis, MP4, FLAC, RIFF INFO)
//! - [`LoftyTagWriter`] writes edited fields back into the primary tag

pub mod error;
pub mod extractor;
pub mod writer;

pub use error::{MetadataError, Result};
pub use extractor::LoftyTagReader;
pub use writer::LoftyTagWriter;
