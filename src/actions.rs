//! Keyboard and settings-panel actions.
//!
//! Keyboard actions are identified by stable snake_case names; the host's
//! keybinding facility persists those names and hands them back for
//! dispatch. Settings-panel actions are described as button descriptors so
//! the host can render them with whatever widgetry it has.

use crate::host::{Container, HostShell, find_focus_target};

/// Keyboard actions the plugin registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweakAction {
    /// Cycle input focus editor → sidebar → message window → editor.
    SwitchFocus,
    /// Toggle menu bar visibility.
    ToggleMenuBar,
}

impl TweakAction {
    pub const ALL: [TweakAction; 2] = [TweakAction::SwitchFocus, TweakAction::ToggleMenuBar];

    /// Stable identifier the host persists in its keybinding store.
    pub fn name(self) -> &'static str {
        match self {
            TweakAction::SwitchFocus => "switch_focus_editor_sidebar_msgwin",
            TweakAction::ToggleMenuBar => "toggle_menubar",
        }
    }

    /// Human-readable description for the host's keybinding UI.
    pub fn label(self) -> &'static str {
        match self {
            TweakAction::SwitchFocus => {
                "Switch focus among editor, sidebar, and message window."
            }
            TweakAction::ToggleMenuBar => "Toggle the menu bar.",
        }
    }

    /// Look an action up by its persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// Settings-panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefAction {
    SaveConfig,
    ReloadConfig,
    ResetConfig,
    EditConfig,
    OpenConfigFolder,
}

/// Descriptor for one settings-panel button.
#[derive(Debug, Clone, Copy)]
pub struct PrefButton {
    pub label: &'static str,
    pub tooltip: &'static str,
    pub action: PrefAction,
}

/// The buttons of the settings panel, in display order.
pub fn pref_buttons() -> Vec<PrefButton> {
    vec![
        PrefButton {
            label: "Save Config",
            tooltip: "Save the active settings to the config file.",
            action: PrefAction::SaveConfig,
        },
        PrefButton {
            label: "Reload Config",
            tooltip: "Reload settings from the config file.  May be used to \
                      apply preferences after editing without restarting the \
                      editor.",
            action: PrefAction::ReloadConfig,
        },
        PrefButton {
            label: "Reset Config",
            tooltip: "Delete the current config file and restore the default \
                      file with explanatory comments.",
            action: PrefAction::ResetConfig,
        },
        PrefButton {
            label: "Edit Config",
            tooltip: "Open the config file in the editor.",
            action: PrefAction::EditConfig,
        },
        PrefButton {
            label: "Open Config Folder",
            tooltip: "Open the config folder in the default file manager.",
            action: PrefAction::OpenConfigFolder,
        },
    ]
}

/// Move input focus to the next visible region in the cycle.
///
/// Editor text widget focused and the sidebar visible → sidebar; the
/// sidebar's focus target focused and the message window visible → message
/// window; anything else → editor.
pub fn switch_focus(shell: &dyn HostShell) {
    let sidebar_target_focused = shell
        .current_tab(Container::Sidebar)
        .and_then(|tab| shell.tab_widget(Container::Sidebar, tab))
        .and_then(|page| find_focus_target(&page))
        .is_some_and(|target| target.has_focus());

    if shell.editor_has_focus() && shell.container_is_visible(Container::Sidebar) {
        shell.grab_focus(Container::Sidebar);
    } else if sidebar_target_focused && shell.container_is_visible(Container::MessageWindow) {
        shell.grab_focus(Container::MessageWindow);
    } else {
        shell.grab_focus(Container::Editor);
    }
}
