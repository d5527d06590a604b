//! Audio Tag Writing
//!
//! Pushes edited [`TagFields`] back into an audio file. The file's primary
//! tag is updated in place, or created when the file has none. Empty text
//! and zero numbers remove the corresponding item. Run time is a property of
//! the audio stream and is never written.

use bridge_traits::error::{Result as TagResult, TagError};
use bridge_traits::tags::{TagFields, TagWriter};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::TaggedFileExt;
use lofty::tag::{Accessor, Tag, TagExt};
use std::path::Path;
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::extractor::open_tagged;

/// Tag writer backed by `lofty`
#[derive(Default)]
pub struct LoftyTagWriter {
    write_options: WriteOptions,
}

impl LoftyTagWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(write_options: WriteOptions) -> Self {
        Self { write_options }
    }

    /// Write `fields` into the primary tag of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unsupported, unparsable or
    /// cannot be saved.
    pub fn store(&self, path: &Path, fields: &TagFields) -> Result<()> {
        let mut tagged_file = open_tagged(path, ParseOptions::new())?;

        if tagged_file.primary_tag().is_none() {
            let tag_type = tagged_file.primary_tag_type();
            debug!("Creating {:?} tag in {}", tag_type, path.display());
            tagged_file.insert_tag(Tag::new(tag_type));
        }

        let tag = tagged_file
            .primary_tag_mut()
            .ok_or_else(|| MetadataError::WriteFailed {
                path: path.to_path_buf(),
                message: "file has no writable tag".to_string(),
            })?;

        apply_fields(tag, fields);

        tag.save_to_path(path, self.write_options)
            .map_err(|e| MetadataError::WriteFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!("Wrote tags to {}", path.display());
        Ok(())
    }
}

impl TagWriter for LoftyTagWriter {
    fn write(&self, path: &Path, fields: &TagFields) -> TagResult<()> {
        self.store(path, fields).map_err(TagError::from)
    }
}

fn apply_fields(tag: &mut Tag, fields: &TagFields) {
    set_text(tag, &fields.title, Tag::set_title, Tag::remove_title);
    set_text(tag, &fields.artist, Tag::set_artist, Tag::remove_artist);
    set_text(tag, &fields.album, Tag::set_album, Tag::remove_album);
    set_text(tag, &fields.genre, Tag::set_genre, Tag::remove_genre);
    set_number(tag, fields.year, Tag::set_year, Tag::remove_year);
    set_number(tag, fields.track_number, Tag::set_track, Tag::remove_track);
    set_number(tag, fields.track_count, Tag::set_track_total, Tag::remove_track_total);
}

fn set_text(tag: &mut Tag, value: &str, set: fn(&mut Tag, String), remove: fn(&mut Tag)) {
    let value = value.trim();
    if value.is_empty() {
        remove(tag);
    } else {
        set(tag, value.to_string());
    }
}

fn set_number(tag: &mut Tag, value: u32, set: fn(&mut Tag, u32), remove: fn(&mut Tag)) {
    if value == 0 {
        remove(tag);
    } else {
        set(tag, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::tag::TagType;

    #[test]
    fn test_apply_fields_sets_and_removes() {
        let mut tag = Tag::new(TagType::VorbisComments);
        tag.set_genre("Noise".to_string());
        tag.set_track_total(12);

        apply_fields(
            &mut tag,
            &TagFields {
                title: " Song ".to_string(),
                artist: "Bob".to_string(),
                track_number: 3,
                ..TagFields::default()
            },
        );

        assert_eq!(tag.title().as_deref(), Some("Song"));
        assert_eq!(tag.artist().as_deref(), Some("Bob"));
        assert_eq!(tag.track(), Some(3));
        assert_eq!(tag.genre(), None);
        assert_eq!(tag.track_total(), None);
    }

    #[test]
    fn test_write_missing_file() {
        let writer = LoftyTagWriter::new();
        let result = writer.write(Path::new("/definitely/missing.flac"), &TagFields::default());
        assert!(matches!(result, Err(TagError::NotAFile(_))));
    }
}
