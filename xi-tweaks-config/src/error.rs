//! Typed error variants for the xi-tweaks-config crate.
//!
//! Provides structured error types for settings I/O so callers at the crate
//! boundary can match on specific failure modes instead of opaque `anyhow`
//! strings. The public `Config` functions return `anyhow::Result`;
//! `ConfigError` values coerce automatically through the blanket `From`
//! impl `anyhow` provides for any `std::error::Error`.

use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error reading settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained TOML that could not be parsed.
    #[error("TOML parse error in settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The in-memory settings could not be serialized back to TOML.
    #[error("TOML serialize error in settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
