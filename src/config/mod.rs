//! Configuration module for bulk download sessions
//!
//! This module provides the `DownloadConfig` struct and its type-safe builder
//! for configuring a download session with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{DownloadConfigBuilder, WithListingUrl};
pub use types::DownloadConfig;
