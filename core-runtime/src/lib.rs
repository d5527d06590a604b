//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the media catalog:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities other modules depend on. It
//! establishes the logging conventions and the fail-fast configuration builder
//! used by the catalog service.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
