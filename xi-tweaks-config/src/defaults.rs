//! Default value functions for settings.
//!
//! Each free function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `Config` field, so a missing key in the settings file
//! falls back to the same value a freshly generated file would carry.

pub fn bool_true() -> bool {
    true
}

pub fn bool_false() -> bool {
    false
}

/// Accent color applied to the focused tab label.
pub fn sidebar_focus_color() -> String {
    "green".to_string()
}

/// Reference-string length used to auto-size the splitter in a normal window.
pub fn auto_size_normal() -> i32 {
    76
}

/// Reference-string length used to auto-size the splitter in a maximized window.
pub fn auto_size_maximized() -> i32 {
    100
}

/// Columns of the built-in guide-line set.
pub fn column_marker_columns() -> Vec<i32> {
    vec![60, 72, 80, 88, 96, 104, 112, 120, 128, 136, 144, 152, 160]
}

/// Guide-line colors matching [`column_marker_columns`], BGR byte order.
pub fn column_marker_colors() -> Vec<u32> {
    vec![
        0x00e5_e5e5,
        0x00ff_d0b0, // blue
        0x00ff_c0ff, // purple
        0x00e5_e5e5,
        0x00a0_b0ff, // red
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
        0x00e5_e5e5,
    ]
}
