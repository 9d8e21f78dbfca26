//! Settings management for the tweaks plugin.
//!
//! This module provides settings loading, saving, and default values.
//! The on-disk format is a TOML file holding a single `[tweaks]` table of
//! scalar keys plus two parallel integer arrays for the column-marker list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;

/// Name of the settings file inside [`Config::config_dir`].
pub const CONFIG_FILE_NAME: &str = "xi-tweaks.conf";

/// One vertical guide line on the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMarker {
    /// Column the guide line is drawn at.
    pub column: i32,
    /// Line color, BGR byte order.
    pub color: u32,
}

/// Settings for the tweaks plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Focus highlighting
    // ========================================================================
    /// Highlight the focused sidebar tab.
    #[serde(default = "defaults::bool_false")]
    pub sidebar_focus_enabled: bool,

    /// Extend focus highlighting to all tracked containers
    /// (editor, sidebar, and message window), not just the sidebar.
    #[serde(default = "defaults::bool_false")]
    pub notebook_focus_enabled: bool,

    /// Render the focused tab label in bold.
    #[serde(default = "defaults::bool_false")]
    pub sidebar_focus_bold: bool,

    /// Accent color for the focused tab label, as an inline-markup color
    /// (a name like "green" or a "#rrggbb" value). Empty disables the tint.
    #[serde(default = "defaults::sidebar_focus_color")]
    pub sidebar_focus_color: String,

    // ========================================================================
    // Sidebar splitter position
    // ========================================================================
    /// Restore the splitter divider to a remembered position.
    #[serde(default = "defaults::bool_true")]
    pub sidebar_save_size_enabled: bool,

    /// Keep updating the remembered position while the user drags the divider.
    #[serde(default = "defaults::bool_true")]
    pub sidebar_save_size_update: bool,

    /// Remembered divider position for a normal (unmaximized) window.
    #[serde(default)]
    pub sidebar_save_size_normal: i32,

    /// Remembered divider position for a maximized window.
    #[serde(default)]
    pub sidebar_save_size_maximized: i32,

    /// Derive the divider position from the rendered width of a reference
    /// string instead of a remembered pixel value.
    #[serde(default = "defaults::bool_false")]
    pub sidebar_auto_size_enabled: bool,

    /// Reference-string length (characters) for the normal window state.
    #[serde(default = "defaults::auto_size_normal")]
    pub sidebar_auto_size_normal: i32,

    /// Reference-string length (characters) for the maximized window state.
    #[serde(default = "defaults::auto_size_maximized")]
    pub sidebar_auto_size_maximized: i32,

    // ========================================================================
    // Menu bar
    // ========================================================================
    /// Hide the menu bar while the plugin initializes.
    #[serde(default = "defaults::bool_false")]
    pub menubar_hide_on_start: bool,

    /// Restore the menu bar to its recorded visibility on startup.
    #[serde(default = "defaults::bool_false")]
    pub menubar_restore_state: bool,

    /// Menu bar visibility recorded at the last settings save.
    #[serde(default = "defaults::bool_true")]
    pub menubar_previous_state: bool,

    // ========================================================================
    // Column markers
    // ========================================================================
    /// Draw vertical guide lines on the editing surface.
    #[serde(default = "defaults::bool_true")]
    pub column_marker_enabled: bool,

    /// Guide-line columns; index i pairs with index i of
    /// [`Config::column_marker_colors`].
    #[serde(default = "defaults::column_marker_columns")]
    pub column_marker_columns: Vec<i32>,

    /// Guide-line colors (BGR), parallel to [`Config::column_marker_columns`].
    #[serde(default = "defaults::column_marker_colors")]
    pub column_marker_colors: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sidebar_focus_enabled: defaults::bool_false(),
            notebook_focus_enabled: defaults::bool_false(),
            sidebar_focus_bold: defaults::bool_false(),
            sidebar_focus_color: defaults::sidebar_focus_color(),
            sidebar_save_size_enabled: defaults::bool_true(),
            sidebar_save_size_update: defaults::bool_true(),
            sidebar_save_size_normal: 0,
            sidebar_save_size_maximized: 0,
            sidebar_auto_size_enabled: defaults::bool_false(),
            sidebar_auto_size_normal: defaults::auto_size_normal(),
            sidebar_auto_size_maximized: defaults::auto_size_maximized(),
            menubar_hide_on_start: defaults::bool_false(),
            menubar_restore_state: defaults::bool_false(),
            menubar_previous_state: defaults::bool_true(),
            column_marker_enabled: defaults::bool_true(),
            column_marker_columns: defaults::column_marker_columns(),
            column_marker_colors: defaults::column_marker_colors(),
        }
    }
}

/// On-disk wrapper giving the file its single named `[tweaks]` group.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tweaks: Config,
}

impl Config {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from the default location, creating a default file on
    /// first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit path.
    ///
    /// A missing file is not an error: defaults are written out and
    /// returned, matching first-run behavior.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Loading settings from {:?}", path);
            let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
            let file: ConfigFile = toml::from_str(&contents).map_err(ConfigError::Parse)?;
            let mut config = file.tweaks;
            config.sanitize();
            Ok(config)
        } else {
            log::info!("Settings file not found, creating default at {:?}", path);
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let file = ConfigFile {
            tweaks: self.clone(),
        };
        let contents = toml::to_string_pretty(&file).map_err(ConfigError::Serialize)?;
        fs::write(path, contents).map_err(ConfigError::Io)?;
        log::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Replace the file at `path` with a freshly generated default file and
    /// return the defaults.
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Path of the settings file: `<config dir>/xi-tweaks/xi-tweaks.conf`.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Directory holding the settings file.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xi-tweaks")
    }

    /// Whether any focus-highlight scope is switched on.
    pub fn focus_highlight_enabled(&self) -> bool {
        self.sidebar_focus_enabled || self.notebook_focus_enabled
    }

    /// The configured guide lines as (column, color) pairs.
    pub fn column_markers(&self) -> Vec<ColumnMarker> {
        self.column_marker_columns
            .iter()
            .zip(self.column_marker_colors.iter())
            .map(|(&column, &color)| ColumnMarker { column, color })
            .collect()
    }

    /// Replace the guide-line list.
    pub fn set_column_markers(&mut self, markers: &[ColumnMarker]) {
        self.column_marker_columns = markers.iter().map(|m| m.column).collect();
        self.column_marker_colors = markers.iter().map(|m| m.color).collect();
    }

    /// Repair values a hand-edited file may have left inconsistent.
    ///
    /// Pixel positions and reference lengths are clamped at zero; the two
    /// column-marker arrays must be the same length or both are discarded
    /// in favor of the built-in set.
    fn sanitize(&mut self) {
        self.sidebar_save_size_normal = self.sidebar_save_size_normal.max(0);
        self.sidebar_save_size_maximized = self.sidebar_save_size_maximized.max(0);
        self.sidebar_auto_size_normal = self.sidebar_auto_size_normal.max(0);
        self.sidebar_auto_size_maximized = self.sidebar_auto_size_maximized.max(0);

        if self.column_marker_columns.len() != self.column_marker_colors.len() {
            log::warn!(
                "column marker lists disagree ({} columns, {} colors); using built-in set",
                self.column_marker_columns.len(),
                self.column_marker_colors.len()
            );
            self.column_marker_columns = defaults::column_marker_columns();
            self.column_marker_colors = defaults::column_marker_colors();
        }
    }
}
