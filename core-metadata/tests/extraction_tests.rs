//! Integration tests for tag reading and writing
//!
//! Audio files are generated on the fly: a one second silent PCM WAV is
//! enough to exercise probing, property extraction and tag writing.

use bridge_traits::error::TagError;
use bridge_traits::tags::{TagFields, TagReader, TagWriter};
use core_metadata::{LoftyTagReader, LoftyTagWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a one second, 8 kHz, mono, 16-bit silent WAV file
fn write_silent_wav(path: &Path) {
    let sample_rate: u32 = 8000;
    let block_align: u16 = 2;
    let data_len: u32 = sample_rate * u32::from(block_align);

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(4 + 8 + 16 + 8 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);

    fs::write(path, bytes).expect("Failed to write wav fixture");
}

fn wav_in(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    write_silent_wav(&path);
    path
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let reader = LoftyTagReader::new();

    let result = reader.read(&dir.path().join("nonexistent.mp3"));
    assert!(matches!(result, Err(TagError::NotAFile(_))));
}

#[test]
fn test_read_directory() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("album.flac");
    fs::create_dir(&folder).unwrap();

    let reader = LoftyTagReader::new();
    assert!(matches!(reader.read(&folder), Err(TagError::NotAFile(_))));
}

#[test]
fn test_read_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"not audio").unwrap();

    let reader = LoftyTagReader::new();
    assert!(matches!(reader.read(&path), Err(TagError::UnsupportedFormat(_))));
}

#[test]
fn test_read_corrupted_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.mp3");
    fs::write(&path, b"This is not a valid audio file").unwrap();

    let reader = LoftyTagReader::new();
    let result = reader.read(&path);

    assert!(
        matches!(result, Err(TagError::Unreadable { .. })),
        "Should fail for corrupted file, got {:?}",
        result
    );
}

#[test]
fn test_read_untagged_wav_uses_file_name() {
    let dir = TempDir::new().unwrap();
    let path = wav_in(&dir, "Quiet   Track.wav");

    let fields = LoftyTagReader::new().read(&path).unwrap();

    assert_eq!(fields.title, "Quiet Track");
    assert_eq!(fields.artist, "");
    assert_eq!(fields.track_number, 0);
    assert_eq!(fields.runtime_secs, 1);
}

#[test]
fn test_write_then_read_back() {
    let dir = TempDir::new().unwrap();
    let path = wav_in(&dir, "take.wav");

    let written = TagFields {
        title: "Silence".to_string(),
        artist: "Bob".to_string(),
        album: "Hits".to_string(),
        ..TagFields::default()
    };
    LoftyTagWriter::new().write(&path, &written).unwrap();

    let fields = LoftyTagReader::new().read(&path).unwrap();
    assert_eq!(fields.title, "Silence");
    assert_eq!(fields.artist, "Bob");
    assert_eq!(fields.album, "Hits");
    assert_eq!(fields.runtime_secs, 1);
}

#[test]
fn test_write_corrupted_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.ogg");
    fs::write(&path, b"OggS but not really").unwrap();

    let result = LoftyTagWriter::new().write(&path, &TagFields::default());
    assert!(matches!(result, Err(TagError::Unreadable { .. })));
}
