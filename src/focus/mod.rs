//! Focus-highlight core.
//!
//! Decides, across a storm of overlapping focus notifications, which single
//! tabbed container currently has logical focus, and updates tab styling
//! exactly once per real transition. See [`FocusTracker`] for the debounce
//! and highlight-pass rules.

mod style;
mod tracker;

pub use tracker::{Direction, FocusTracker, HIGHLIGHT_DELAY, MIN_TOGGLE_INTERVAL};
