//! Focus tracking across the three tabbed containers.
//!
//! The host shell fires focus-in, focus-out, grab, child-focus, and
//! tab-change notifications in overlapping bursts, and a single real focus
//! transition commonly raises several of them in both directions. The
//! tracker funnels every notification into one debounced highlight pass:
//! requests carry only an advisory direction hint, coalesce into a single
//! pending ticket, and the pass itself re-reads live widget state when it
//! finally runs, so stale hints cannot apply stale styling.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use xi_tweaks_config::Config;

use crate::focus::style::{focused_markup, strip_markup};
use crate::host::{
    Clock, Container, HostShell, Scheduler, SignalHandler, SignalKind, SignalSource,
    SubscriptionId, TabStyle, find_focus_target,
};

/// Delay before a requested highlight pass runs. Long enough to let one
/// burst of notifications finish, short enough to be invisible.
pub const HIGHLIGHT_DELAY: Duration = Duration::from_millis(25);

/// Minimum interval between applications of opposite highlight states.
/// A gain arriving sooner than this after a loss (or vice versa) is the
/// tail of a tab-switch flutter, not a real transition.
pub const MIN_TOGGLE_INTERVAL: Duration = Duration::from_millis(100);

/// Direction hinted by an incoming focus notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A tracked container is gaining the highlight.
    Gain,
    /// The highlight is being dropped.
    Loss,
}

/// Container-level signals the tracker subscribes to when enabled.
const CONTAINER_SIGNALS: [SignalKind; 8] = [
    SignalKind::FocusGained,
    SignalKind::FocusLost,
    SignalKind::GrabAcquired,
    SignalKind::GrabReleased,
    SignalKind::ChildFocusChanged,
    SignalKind::TabSelecting,
    SignalKind::TabSwitched,
    SignalKind::StateFlagsChanged,
];

/// Signals of the embedded text widget the tracker also follows.
const EDITOR_VIEW_SIGNALS: [SignalKind; 2] = [SignalKind::EditorFocusIn, SignalKind::EditorFocusOut];

/// At most one deferred pass may be outstanding; later requests only
/// overwrite the hint. Discarding a ticket (`pending = false`) orphans the
/// already-scheduled callback, which then returns without running a pass.
#[derive(Debug, Default)]
struct DebounceTicket {
    pending: bool,
    hint: Option<Direction>,
}

/// Which container is logically focused, plus the instants the last
/// confirmed gain/loss were applied. Only one of the two timestamps is
/// live at a time; applying one direction clears the other.
#[derive(Debug, Default)]
struct FocusState {
    focused: Option<Container>,
    last_gain: Option<Duration>,
    last_loss: Option<Duration>,
}

#[derive(Default)]
struct TrackerState {
    focus: FocusState,
    ticket: DebounceTicket,
    subscriptions: Vec<SubscriptionId>,
}

struct TrackerShared {
    shell: Rc<dyn HostShell>,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<RefCell<Config>>,
    state: RefCell<TrackerState>,
}

/// Decides which tracked container holds logical focus and keeps tab
/// styling in step with it.
///
/// All mutation happens inside the highlight pass, which only ever runs on
/// the single UI thread; the interior `RefCell` is never borrowed across a
/// shell call that could re-enter it.
#[derive(Clone)]
pub struct FocusTracker {
    shared: Rc<TrackerShared>,
}

impl FocusTracker {
    pub fn new(
        shell: Rc<dyn HostShell>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        config: Rc<RefCell<Config>>,
    ) -> Self {
        Self {
            shared: Rc::new(TrackerShared {
                shell,
                clock,
                scheduler,
                config,
                state: RefCell::new(TrackerState::default()),
            }),
        }
    }

    /// Subscribe to every focus-relevant signal. Idempotent.
    pub fn enable(&self) {
        let mut state = self.shared.state.borrow_mut();
        if !state.subscriptions.is_empty() {
            return;
        }
        for container in Container::ALL {
            for kind in CONTAINER_SIGNALS {
                let id = self.shared.shell.connect(
                    SignalSource::Container(container),
                    kind,
                    self.make_handler(container, kind),
                );
                state.subscriptions.push(id);
            }
        }
        for kind in EDITOR_VIEW_SIGNALS {
            let id = self.shared.shell.connect(
                SignalSource::EditorView,
                kind,
                self.make_handler(Container::Editor, kind),
            );
            state.subscriptions.push(id);
        }
        log::debug!("focus tracker enabled ({} signals)", state.subscriptions.len());
    }

    /// Release every subscription, discard any pending ticket, and run one
    /// synchronous corrective pass that clears all Focused markers.
    pub fn disable(&self) {
        let subscriptions = {
            let mut state = self.shared.state.borrow_mut();
            if state.subscriptions.is_empty() && !state.ticket.pending {
                return;
            }
            state.ticket = DebounceTicket::default();
            std::mem::take(&mut state.subscriptions)
        };
        for id in subscriptions {
            self.shared.shell.disconnect(id);
        }
        TrackerShared::run_corrective_pass(&self.shared);
        log::debug!("focus tracker disabled");
    }

    /// Whether the tracker currently holds subscriptions.
    pub fn is_enabled(&self) -> bool {
        !self.shared.state.borrow().subscriptions.is_empty()
    }

    /// The container whose tab currently carries the Focused marker.
    pub fn focused(&self) -> Option<Container> {
        self.shared.state.borrow().focus.focused
    }

    /// Ask for a debounced highlight pass, e.g. after settings changed.
    pub fn request_highlight(&self, hint: Direction) {
        TrackerShared::request_highlight(&self.shared, hint);
    }

    fn make_handler(&self, container: Container, kind: SignalKind) -> SignalHandler {
        let weak = Rc::downgrade(&self.shared);
        Box::new(move || {
            let Some(shared) = weak.upgrade() else { return };
            if let Some(hint) = TrackerShared::hint_for(&shared, container, kind) {
                TrackerShared::request_highlight(&shared, hint);
            }
        })
    }
}

/// Whether highlighting covers `container` under the current settings.
fn highlight_enabled_for(config: &Config, container: Container) -> bool {
    config.notebook_focus_enabled
        || (config.sidebar_focus_enabled && container == Container::Sidebar)
}

impl TrackerShared {
    /// Map a notification to an advisory direction, or `None` to ignore it.
    ///
    /// Loss-kind signals always hint Loss. Gain-kind signals hint Gain only
    /// when highlighting covers the originating container; focus moving
    /// into an uncovered container still means any existing highlight must
    /// drop. Tab-change notifications count only when their container
    /// already holds the window focus — switching tabs in an unfocused
    /// container is not a focus transition.
    fn hint_for(shared: &Rc<Self>, container: Container, kind: SignalKind) -> Option<Direction> {
        let gain_or_loss = || {
            if highlight_enabled_for(&shared.config.borrow(), container) {
                Direction::Gain
            } else {
                Direction::Loss
            }
        };
        match kind {
            SignalKind::FocusLost | SignalKind::GrabReleased | SignalKind::EditorFocusOut => {
                Some(Direction::Loss)
            }
            SignalKind::TabSelecting | SignalKind::TabSwitched => shared
                .shell
                .container_has_focus(container)
                .then(gain_or_loss),
            SignalKind::FocusGained
            | SignalKind::GrabAcquired
            | SignalKind::ChildFocusChanged
            | SignalKind::StateFlagsChanged
            | SignalKind::EditorFocusIn => Some(gain_or_loss()),
            _ => None,
        }
    }

    /// Coalesce a pass request into the single pending ticket.
    fn request_highlight(shared: &Rc<Self>, hint: Direction) {
        {
            let mut state = shared.state.borrow_mut();
            state.ticket.hint = Some(hint);
            if state.ticket.pending {
                return;
            }
            state.ticket.pending = true;
        }
        let weak = Rc::downgrade(shared);
        shared.scheduler.schedule_once(
            HIGHLIGHT_DELAY,
            Box::new(move || {
                let Some(shared) = weak.upgrade() else { return };
                let hint = {
                    let mut state = shared.state.borrow_mut();
                    if !state.ticket.pending {
                        // Ticket was discarded by disable(); nothing to do.
                        return;
                    }
                    state.ticket.pending = false;
                    state.ticket.hint.take()
                };
                if let Some(hint) = hint {
                    Self::run_highlight_pass(&shared, hint);
                }
            }),
        );
    }

    /// The highlight pass. Runs the interval gate on the hinted direction,
    /// re-resolves the real focus owner, applies styling to every tab, and
    /// records which direction was actually applied.
    fn run_highlight_pass(shared: &Rc<Self>, hint: Direction) {
        let now = shared.clock.now();
        {
            let state = shared.state.borrow();
            let opposite_applied_at = match hint {
                Direction::Gain => state.focus.last_loss,
                Direction::Loss => state.focus.last_gain,
            };
            if opposite_applied_at
                .is_some_and(|at| now.saturating_sub(at) < MIN_TOGGLE_INTERVAL)
            {
                // Opposite-direction flip inside the quiet window: flutter.
                return;
            }
        }

        let (sidebar_on, notebook_on, bold, color) = {
            let config = shared.config.borrow();
            (
                config.sidebar_focus_enabled,
                config.notebook_focus_enabled,
                config.sidebar_focus_bold,
                config.sidebar_focus_color.clone(),
            )
        };
        let enabled_for = |container: Container| {
            notebook_on || (sidebar_on && container == Container::Sidebar)
        };

        if !sidebar_on && !notebook_on {
            // Settings flipped off since this pass was scheduled: release
            // the subscriptions and fall through to unfocus everything.
            let subscriptions =
                std::mem::take(&mut shared.state.borrow_mut().subscriptions);
            for id in subscriptions {
                shared.shell.disconnect(id);
            }
        }

        let owner = if sidebar_on || notebook_on {
            Self::resolve_focus_owner(shared)
        } else {
            None
        };

        let mut highlighted = None;
        for container in Container::ALL {
            let current = shared.shell.current_tab(container);
            for tab in 0..shared.shell.tab_count(container) {
                let focused = owner == Some(container)
                    && current == Some(tab)
                    && enabled_for(container);
                Self::apply_tab_style(shared, container, tab, focused, bold, &color);
                if focused {
                    highlighted = Some(container);
                }
            }
        }

        let applied = if highlighted.is_some() {
            Direction::Gain
        } else {
            Direction::Loss
        };
        let mut state = shared.state.borrow_mut();
        state.focus.focused = highlighted;
        match applied {
            Direction::Gain => {
                state.focus.last_gain = Some(now);
                state.focus.last_loss = None;
            }
            Direction::Loss => {
                state.focus.last_loss = Some(now);
                state.focus.last_gain = None;
            }
        }
    }

    /// Unconditionally clear every Focused marker; used by `disable()`.
    fn run_corrective_pass(shared: &Rc<Self>) {
        for container in Container::ALL {
            for tab in 0..shared.shell.tab_count(container) {
                Self::apply_tab_style(shared, container, tab, false, false, "");
            }
        }
        let now = shared.clock.now();
        let mut state = shared.state.borrow_mut();
        state.focus.focused = None;
        state.focus.last_loss = Some(now);
        state.focus.last_gain = None;
    }

    /// Which container truly owns input focus right now.
    ///
    /// A container owns focus when the container widget itself reports it,
    /// when the focus target inside its visible page reports it, or when
    /// the page widget reports it. For the editor, the embedded text
    /// widget counts as the container.
    fn resolve_focus_owner(shared: &Rc<Self>) -> Option<Container> {
        let shell = &shared.shell;
        for container in Container::ALL {
            if !shell.container_is_visible(container) {
                continue;
            }
            if shell.container_has_focus(container) {
                return Some(container);
            }
            if container == Container::Editor && shell.editor_has_focus() {
                return Some(container);
            }
            if let Some(page) = shell
                .current_tab(container)
                .and_then(|tab| shell.tab_widget(container, tab))
            {
                if find_focus_target(&page).is_some_and(|target| target.has_focus()) {
                    return Some(container);
                }
                if page.has_focus() {
                    return Some(container);
                }
            }
        }
        None
    }

    /// Style one tab. The label is only rewritten when it would actually
    /// change, so repeated passes with no transition do no work.
    fn apply_tab_style(
        shared: &Rc<Self>,
        container: Container,
        tab: usize,
        focused: bool,
        bold: bool,
        color: &str,
    ) {
        let shell = &shared.shell;
        let Some(label) = shell.tab_label(container, tab) else {
            return;
        };
        let plain = strip_markup(&label);
        if focused {
            shell.set_tab_style(container, tab, TabStyle::Focused);
            let color = (!color.is_empty()).then_some(color);
            let markup = focused_markup(&plain, bold, color);
            if markup != label {
                shell.set_tab_label(container, tab, &markup);
            }
        } else {
            shell.set_tab_style(container, tab, TabStyle::Unfocused);
            if plain != label {
                shell.set_tab_label(container, tab, &plain);
            }
        }
    }
}
