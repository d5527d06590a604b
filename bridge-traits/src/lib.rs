//! # Host Bridge Traits
//!
//! Capability traits the catalog core consumes but does not implement itself.
//!
//! ## Overview
//!
//! The catalog never parses audio containers. Reading and writing the
//! descriptive tags of a file (title, artist, year, genre, album, track
//! position, run time) is delegated to a host-provided collaborator:
//!
//! - [`TagReader`](tags::TagReader) - Extract [`TagFields`](tags::TagFields) from a file
//! - [`TagWriter`](tags::TagWriter) - Push edited [`TagFields`](tags::TagFields) back to a file
//!
//! The default desktop implementation lives in `core-metadata` and is backed by
//! `lofty`. Tests substitute `mockall` doubles.
//!
//! ## Supported Files
//!
//! Only files whose extension is one of [`SUPPORTED_EXTENSIONS`](tags::SUPPORTED_EXTENSIONS)
//! (compared case-insensitively) are handed to a reader. Anything else is an
//! [`TagError::UnsupportedFormat`](error::TagError::UnsupportedFormat).
//!
//! ## Error Handling
//!
//! All bridge traits use the [`TagError`](error::TagError) type. Implementations
//! should:
//!
//! - Convert library-specific errors to `TagError`
//! - Include the offending path in the message
//!
//! ## Examples
//!
//! ```ignore
//! use bridge_traits::tags::{TagFields, TagReader};
//! use bridge_traits::error::Result;
//! use std::path::Path;
//!
//! pub struct FixedReader;
//!
//! impl TagReader for FixedReader {
//!     fn read(&self, path: &Path) -> Result<TagFields> {
//!         Ok(TagFields {
//!             title: path.display().to_string(),
//!             ..TagFields::default()
//!         })
//!     }
//! }
//! ```

pub mod error;
pub mod tags;

pub use error::TagError;

// Re-export commonly used types
pub use tags::{ensure_supported, is_supported_extension, TagFields, TagReader, TagWriter, SUPPORTED_EXTENSIONS};
