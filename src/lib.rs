//! Workspace placeholder crate.
//!
//! This crate exposes feature flags that map to the individual workspace
//! crates (`core-service`, `core-library`, `core-metadata`). Host applications
//! can depend on `media-catalog` and enable the documented features without
//! wiring each crate individually.

#[cfg(feature = "service")]
pub use core_service;

#[cfg(feature = "library-only")]
pub use core_library;

#[cfg(feature = "lofty-tags")]
pub use core_metadata;
