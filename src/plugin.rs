//! Plugin lifecycle and wiring.
//!
//! [`TweaksPlugin`] is the context object the host adapter constructs at
//! plugin init and drops at teardown. It owns the settings, the focus
//! tracker, the pane controller, and the menu bar controller, and it is
//! the dispatch point for keyboard and settings-panel actions.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use xi_tweaks_config::Config;

use crate::actions::{PrefAction, PrefButton, TweakAction, pref_buttons, switch_focus};
use crate::column_markers::apply_column_markers;
use crate::focus::{Direction, FocusTracker};
use crate::host::{Clock, HostShell, Scheduler, SignalKind, SignalSource, SubscriptionId};
use crate::menubar::MenuBarController;
use crate::pane::PanePositionController;

struct PluginShared {
    shell: Rc<dyn HostShell>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<RefCell<Config>>,
    config_path: PathBuf,
    focus: FocusTracker,
    pane: PanePositionController,
    menubar: MenuBarController,
    /// Coalesces reload requests: at most one idle reload in flight.
    reload_queued: Cell<bool>,
    subscriptions: RefCell<Vec<SubscriptionId>>,
}

/// The plugin context: everything Xi/Tweaks owns while loaded.
pub struct TweaksPlugin {
    shared: Rc<PluginShared>,
}

impl TweaksPlugin {
    /// Plugin entry point: load settings from the default location and
    /// bring every tweak up.
    pub fn init(
        shell: Rc<dyn HostShell>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Self> {
        let config_path = Config::config_path();
        let config = Config::load_from(&config_path)?;
        Ok(Self::init_at(shell, clock, scheduler, config, config_path))
    }

    /// Lifecycle entry with explicit settings and file location; used by
    /// embedders with nonstandard config directories and by tests.
    pub fn init_at(
        shell: Rc<dyn HostShell>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        config: Config,
        config_path: PathBuf,
    ) -> Self {
        let config = Rc::new(RefCell::new(config));
        let focus = FocusTracker::new(
            Rc::clone(&shell),
            clock,
            Rc::clone(&scheduler),
            Rc::clone(&config),
        );
        let pane = PanePositionController::new(Rc::clone(&shell), Rc::clone(&config));
        let menubar = MenuBarController::new(Rc::clone(&shell), Rc::clone(&config));

        let shared = Rc::new(PluginShared {
            shell,
            scheduler,
            config,
            config_path,
            focus,
            pane,
            menubar,
            reload_queued: Cell::new(false),
            subscriptions: RefCell::new(Vec::new()),
        });

        shared.menubar.apply_startup_policy();
        PluginShared::subscribe_shell_signals(&shared);
        PluginShared::apply_settings(&shared);
        // Settings are read once more at the first idle slot, after the
        // host has finished wiring its own startup state.
        PluginShared::queue_reload(&shared);

        Self { shared }
    }

    /// Plugin teardown: release every subscription, clear all Focused
    /// markers, and write the settings out.
    pub fn cleanup(&self) {
        self.shared.focus.disable();
        self.shared.pane.enable(false);
        for id in self.shared.subscriptions.borrow_mut().drain(..) {
            self.shared.shell.disconnect(id);
        }
        self.shared.menubar.record_state();
        if let Err(e) = self.shared.config.borrow().save_to(&self.shared.config_path) {
            log::error!("failed to save settings on cleanup: {e}");
        }
    }

    /// Button descriptors for the host's configure dialog.
    pub fn configure(&self) -> Vec<PrefButton> {
        pref_buttons()
    }

    /// Run one settings-panel action.
    pub fn run_pref_action(&self, action: PrefAction) {
        match action {
            PrefAction::SaveConfig => {
                self.shared.menubar.record_state();
                if let Err(e) = self.shared.config.borrow().save_to(&self.shared.config_path) {
                    log::error!("failed to save settings: {e}");
                }
            }
            PrefAction::ReloadConfig => PluginShared::queue_reload(&self.shared),
            PrefAction::ResetConfig => match Config::reset_at(&self.shared.config_path) {
                Ok(config) => {
                    *self.shared.config.borrow_mut() = config;
                    PluginShared::apply_settings(&self.shared);
                }
                Err(e) => log::error!("failed to reset settings: {e}"),
            },
            PrefAction::EditConfig => {
                self.shared.shell.open_document(&self.shared.config_path);
            }
            PrefAction::OpenConfigFolder => {
                let folder = self
                    .shared
                    .config_path
                    .parent()
                    .map(PathBuf::from)
                    .unwrap_or_else(Config::config_dir);
                if let Err(e) = open::that(&folder) {
                    log::warn!("failed to open config folder {:?}: {}", folder, e);
                }
            }
        }
    }

    /// Dispatch one keyboard action. Returns whether it was handled.
    pub fn handle_action(&self, action: TweakAction) -> bool {
        match action {
            TweakAction::SwitchFocus => {
                switch_focus(self.shared.shell.as_ref());
                true
            }
            TweakAction::ToggleMenuBar => {
                self.shared.menubar.toggle();
                true
            }
        }
    }

    /// Dispatch a keyboard action by its persisted name.
    pub fn handle_action_by_name(&self, name: &str) -> bool {
        match TweakAction::from_name(name) {
            Some(action) => self.handle_action(action),
            None => {
                log::warn!("unknown action name: {name}");
                false
            }
        }
    }

    /// The live settings, shared with every controller.
    pub fn config(&self) -> Rc<RefCell<Config>> {
        Rc::clone(&self.shared.config)
    }

    /// The focus tracker, for embedders that surface its state.
    pub fn focus_tracker(&self) -> FocusTracker {
        self.shared.focus.clone()
    }
}

impl PluginShared {
    fn subscribe_shell_signals(shared: &Rc<Self>) {
        let mut subscriptions = shared.subscriptions.borrow_mut();

        // Column markers follow the active document.
        let weak = Rc::downgrade(shared);
        subscriptions.push(shared.shell.connect(
            SignalSource::Shell,
            SignalKind::DocumentActivated,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    apply_column_markers(shared.shell.as_ref(), &shared.config.borrow());
                }
            }),
        ));

        // The host re-reads settings once its startup sequence completes.
        let weak = Rc::downgrade(shared);
        subscriptions.push(shared.shell.connect(
            SignalSource::Shell,
            SignalKind::StartupComplete,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::queue_reload(&shared);
                }
            }),
        ));
    }

    /// Bring every controller in line with the live settings.
    fn apply_settings(shared: &Rc<Self>) {
        let (focus_on, pane_on) = {
            let config = shared.config.borrow();
            (
                config.focus_highlight_enabled(),
                config.sidebar_save_size_enabled || config.sidebar_auto_size_enabled,
            )
        };
        if focus_on {
            shared.focus.enable();
            shared.focus.request_highlight(Direction::Gain);
        } else {
            shared.focus.disable();
        }
        shared.pane.enable(pane_on);
        apply_column_markers(shared.shell.as_ref(), &shared.config.borrow());
    }

    fn queue_reload(shared: &Rc<Self>) {
        if shared.reload_queued.replace(true) {
            return;
        }
        let weak = Rc::downgrade(shared);
        shared.scheduler.schedule_idle(Box::new(move || {
            let Some(shared) = weak.upgrade() else { return };
            shared.reload_queued.set(false);
            match Config::load_from(&shared.config_path) {
                Ok(config) => {
                    *shared.config.borrow_mut() = config;
                    Self::apply_settings(&shared);
                }
                Err(e) => log::error!("failed to reload settings: {e}"),
            }
        }));
    }
}
