//! Menu bar visibility policy.

use std::cell::RefCell;
use std::rc::Rc;

use xi_tweaks_config::Config;

use crate::host::HostShell;

/// Applies the configured startup visibility and services the toggle action.
#[derive(Clone)]
pub struct MenuBarController {
    shell: Rc<dyn HostShell>,
    config: Rc<RefCell<Config>>,
}

impl MenuBarController {
    pub fn new(shell: Rc<dyn HostShell>, config: Rc<RefCell<Config>>) -> Self {
        Self { shell, config }
    }

    /// Apply the configured startup policy. Hide-on-start wins over
    /// restore-previous-state.
    pub fn apply_startup_policy(&self) {
        let config = self.config.borrow();
        if config.menubar_hide_on_start {
            self.shell.set_menu_bar_visible(false);
        } else if config.menubar_restore_state {
            self.shell.set_menu_bar_visible(config.menubar_previous_state);
        }
    }

    /// Flip menu bar visibility; returns the new state.
    pub fn toggle(&self) -> bool {
        let visible = !self.shell.menu_bar_visible();
        self.shell.set_menu_bar_visible(visible);
        visible
    }

    /// Record the live visibility into the settings, done just before the
    /// settings are written out.
    pub fn record_state(&self) {
        self.config.borrow_mut().menubar_previous_state = self.shell.menu_bar_visible();
    }
}
