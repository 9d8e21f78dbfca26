//! Sidebar splitter position controller.
//!
//! Keeps the two-pane divider at a remembered or computed position, with
//! separate values for the maximized and normal window states. The switch
//! happens only at the instant the maximized flag actually changes, which
//! is detected by comparing against the previously observed flag on every
//! splitter redraw.

use std::cell::RefCell;
use std::rc::Rc;

use xi_tweaks_config::Config;

use crate::host::{HostShell, SignalKind, SignalSource, SubscriptionId};

/// Auto-computed positions at or below this are bogus measurements (font
/// metrics unavailable mid-teardown, for instance) and are ignored.
const MIN_AUTO_POSITION: i32 = 100;

#[derive(Default)]
struct PaneState {
    subscription: Option<SubscriptionId>,
    was_maximized: Option<bool>,
}

struct PaneShared {
    shell: Rc<dyn HostShell>,
    config: Rc<RefCell<Config>>,
    state: RefCell<PaneState>,
}

/// Saves, restores, and auto-computes the splitter divider position.
#[derive(Clone)]
pub struct PanePositionController {
    shared: Rc<PaneShared>,
}

impl PanePositionController {
    pub fn new(shell: Rc<dyn HostShell>, config: Rc<RefCell<Config>>) -> Self {
        Self {
            shared: Rc::new(PaneShared {
                shell,
                config,
                state: RefCell::new(PaneState::default()),
            }),
        }
    }

    /// Subscribe or unsubscribe the single redraw handler. Idempotent.
    pub fn enable(&self, enable: bool) {
        if enable {
            let mut state = self.shared.state.borrow_mut();
            if state.subscription.is_some() {
                return;
            }
            let weak = Rc::downgrade(&self.shared);
            let id = self.shared.shell.connect(
                SignalSource::Splitter,
                SignalKind::SplitterRedraw,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        PaneShared::on_redraw(&shared);
                    }
                }),
            );
            state.subscription = Some(id);
            state.was_maximized = None;
        } else if let Some(id) = self.shared.state.borrow_mut().subscription.take() {
            self.shared.shell.disconnect(id);
        }
    }

    /// Whether the redraw handler is currently subscribed.
    pub fn is_enabled(&self) -> bool {
        self.shared.state.borrow().subscription.is_some()
    }
}

impl PaneShared {
    fn on_redraw(shared: &Rc<Self>) {
        let (save_enabled, save_update, auto_enabled, length_normal, length_maximized) = {
            let config = shared.config.borrow();
            (
                config.sidebar_save_size_enabled,
                config.sidebar_save_size_update,
                config.sidebar_auto_size_enabled,
                config.sidebar_auto_size_normal,
                config.sidebar_auto_size_maximized,
            )
        };

        if !save_enabled && !auto_enabled {
            // Neither policy is active; this handler has nothing left to do.
            if let Some(id) = shared.state.borrow_mut().subscription.take() {
                shared.shell.disconnect(id);
            }
            return;
        }

        let maximized = shared.shell.is_maximized();
        let previous = shared.state.borrow().was_maximized;

        if previous == Some(maximized) {
            if save_enabled && save_update {
                let position = shared.shell.splitter_position();
                let mut config = shared.config.borrow_mut();
                if maximized {
                    config.sidebar_save_size_maximized = position;
                } else {
                    config.sidebar_save_size_normal = position;
                }
            }
            return;
        }

        // The maximized flag flipped (or this is the first observation):
        // apply the position belonging to the new state.
        let auto = if auto_enabled {
            let length = if maximized { length_maximized } else { length_normal };
            Self::auto_position(shared, length)
        } else {
            None
        };
        let stored = {
            let config = shared.config.borrow();
            if maximized {
                config.sidebar_save_size_maximized
            } else {
                config.sidebar_save_size_normal
            }
        };
        let target = match auto {
            Some(position) if position > MIN_AUTO_POSITION => Some(position),
            _ if stored != 0 => Some(stored),
            _ => None,
        };
        if let Some(position) = target {
            log::debug!(
                "splitter -> {} (maximized: {}, auto: {:?})",
                position,
                maximized,
                auto
            );
            shared.shell.set_splitter_position(position);
        }
        shared.state.borrow_mut().was_maximized = Some(maximized);
    }

    /// Divider position derived from the rendered width of a reference
    /// string of `length` characters in the current document's font.
    fn auto_position(shared: &Rc<Self>, length: i32) -> Option<i32> {
        if length <= 0 {
            return None;
        }
        let reference = "0".repeat(length as usize);
        let width = shared.shell.text_width(&reference)?;
        let origin = shared.shell.column_origin()?;
        Some(origin + width)
    }
}
