//! Integration tests for logging system

use core_runtime::logging::{init_logging, strip_path, LogFormat, LogLevel, LoggingConfig};

#[test]
fn test_logging_initialization_once() {
    // A process can only install one global subscriber
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    assert!(init_logging(config.clone()).is_ok());
    tracing::info!(target: "core_library", songs = 3, "catalog loaded");

    let second = init_logging(config);
    assert!(second.is_err());
    assert!(second
        .unwrap_err()
        .to_string()
        .contains("Failed to initialize logging"));
}

#[test]
fn test_path_stripping() {
    assert_eq!(strip_path("/home/user/Music/Hits/01 - X.mp3"), "01 - X.mp3");
    assert_eq!(strip_path("D:\\Music\\Hits\\02 - Y.flac"), "02 - Y.flac");
    assert_eq!(strip_path("plain.ogg"), "plain.ogg");
}
