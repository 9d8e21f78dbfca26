//! Configuration system for the xi-tweaks plugin.
//!
//! This crate provides settings loading, saving, and default values for the
//! tweaks plugin. Settings persist as a single `[tweaks]` table in a TOML
//! file under the platform config directory; the column-marker list is
//! stored as two parallel integer arrays that are reconciled on load.

pub mod config;
pub mod defaults;
mod error;

// Re-export main types for convenience
pub use config::{ColumnMarker, Config};
pub use error::ConfigError;
