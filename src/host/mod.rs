//! Host shell abstraction.
//!
//! The plugin never touches real widgets. Everything it needs from the
//! embedding application — notebook queries, tab styling, the splitter,
//! the menu bar, the signal hub, deferred callbacks — is expressed here as
//! narrow traits, implemented by the host adapter in production and by
//! fakes under test.

mod time;
mod widget;

pub use time::{Clock, Scheduler, SystemClock};
pub use widget::{WidgetNode, find_focus_target};

use std::path::Path;
use std::rc::Rc;

use xi_tweaks_config::ColumnMarker;

/// Identifier for a signal connection, returned by [`HostShell::connect`].
pub type SubscriptionId = u64;

/// Callback invoked each time a subscribed signal fires.
pub type SignalHandler = Box<dyn Fn()>;

/// The three tabbed regions whose focus state is monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Editor,
    Sidebar,
    MessageWindow,
}

impl Container {
    /// All tracked containers, in focus-cycle order.
    pub const ALL: [Container; 3] = [
        Container::Editor,
        Container::Sidebar,
        Container::MessageWindow,
    ];
}

/// Where a signal originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    /// One of the tracked notebook containers.
    Container(Container),
    /// The embedded text-editing widget.
    EditorView,
    /// The sidebar/editor splitter.
    Splitter,
    /// The host application itself.
    Shell,
}

/// Signal kinds the plugin can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A container widget gained input focus.
    FocusGained,
    /// A container widget lost input focus.
    FocusLost,
    /// A widget took an exclusive input grab.
    GrabAcquired,
    /// An exclusive input grab was released.
    GrabReleased,
    /// The focused child inside a container changed.
    ChildFocusChanged,
    /// A tab is about to be selected (pre-change notification).
    TabSelecting,
    /// The active tab changed (post-change notification).
    TabSwitched,
    /// Widget state flags (focus/hover/etc.) changed.
    StateFlagsChanged,
    /// The embedded text widget gained focus.
    EditorFocusIn,
    /// The embedded text widget lost focus.
    EditorFocusOut,
    /// A document became the active document.
    DocumentActivated,
    /// The splitter is about to redraw.
    SplitterRedraw,
    /// The host finished its startup sequence.
    StartupComplete,
}

/// Visual state a tab can be put into by the highlight pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStyle {
    Focused,
    Unfocused,
}

/// Interface to the embedding application's widget tree and event system.
///
/// All queries are best-effort snapshots of live GUI state; `Option`
/// returns mean "momentarily unavailable" and callers degrade to
/// "not focused" / "no target" for that pass.
pub trait HostShell {
    // ------------------------------------------------------------------
    // Signal hub
    // ------------------------------------------------------------------
    /// Subscribe `handler` to a signal. The returned handle stays valid
    /// until passed to [`HostShell::disconnect`].
    fn connect(
        &self,
        source: SignalSource,
        kind: SignalKind,
        handler: SignalHandler,
    ) -> SubscriptionId;

    /// Release a subscription. Unknown handles are ignored.
    fn disconnect(&self, subscription: SubscriptionId);

    // ------------------------------------------------------------------
    // Tabbed containers
    // ------------------------------------------------------------------
    /// Whether the container widget itself reports input focus.
    fn container_has_focus(&self, container: Container) -> bool;

    /// Whether the container is currently visible.
    fn container_is_visible(&self, container: Container) -> bool;

    /// Index of the container's active tab.
    fn current_tab(&self, container: Container) -> Option<usize>;

    /// Number of tabs in the container.
    fn tab_count(&self, container: Container) -> usize;

    /// Label text of a tab; may include inline markup a previous pass set.
    fn tab_label(&self, container: Container, tab: usize) -> Option<String>;

    /// Replace a tab's label, interpreting simple inline bold/color markup.
    fn set_tab_label(&self, container: Container, tab: usize, markup: &str);

    /// Apply a styling hook (widget name / CSS class) to a tab.
    fn set_tab_style(&self, container: Container, tab: usize, style: TabStyle);

    /// Root widget of a tab's page, for focus-target resolution.
    fn tab_widget(&self, container: Container, tab: usize) -> Option<Rc<dyn WidgetNode>>;

    /// Move input focus to the container.
    fn grab_focus(&self, container: Container);

    // ------------------------------------------------------------------
    // Editing surface
    // ------------------------------------------------------------------
    /// Whether the embedded text widget has input focus.
    fn editor_has_focus(&self) -> bool;

    /// Issue vertical guide lines to the editing surface.
    fn set_column_markers(&self, markers: &[ColumnMarker]);

    /// Remove all guide lines from the editing surface.
    fn clear_column_markers(&self);

    /// Rendered pixel width of `text` in the current document's font.
    fn text_width(&self, text: &str) -> Option<i32>;

    /// Horizontal pixel offset of column zero in the current document.
    fn column_origin(&self) -> Option<i32>;

    // ------------------------------------------------------------------
    // Window, splitter, menu bar
    // ------------------------------------------------------------------
    /// Whether the host window is maximized.
    fn is_maximized(&self) -> bool;

    /// Current splitter divider position in pixels.
    fn splitter_position(&self) -> i32;

    /// Move the splitter divider.
    fn set_splitter_position(&self, position: i32);

    /// Whether the menu bar is visible.
    fn menu_bar_visible(&self) -> bool;

    /// Show or hide the menu bar.
    fn set_menu_bar_visible(&self, visible: bool);

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------
    /// Open a file in the host editor.
    fn open_document(&self, path: &Path);
}
