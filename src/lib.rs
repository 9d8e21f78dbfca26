//! Xi/Tweaks: cosmetic and navigational tweaks for a text editor's GUI shell.
//!
//! The plugin highlights the focused tab among the editor, sidebar, and
//! message window notebooks, remembers (or auto-computes) the sidebar
//! splitter position across maximize/restore, toggles the menu bar, draws
//! vertical column guide lines on the editing surface, and exposes a pair
//! of keyboard actions.
//!
//! Everything is wired through the host application's signal system; the
//! host itself is reached only through the traits in [`host`], which makes
//! the state machines in [`focus`] and [`pane`] runnable against fakes.
//! Settings live in the `xi-tweaks-config` crate, re-exported as
//! [`config`].

pub mod actions;
pub mod column_markers;
pub mod focus;
pub mod host;
pub mod menubar;
pub mod pane;
pub mod plugin;

pub mod config {
    //! Settings re-exports from the xi-tweaks-config crate.
    pub use xi_tweaks_config::{ColumnMarker, Config, ConfigError};
}

pub use plugin::TweaksPlugin;

/// Plugin version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
