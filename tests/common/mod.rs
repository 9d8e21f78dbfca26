//! Shared integration test helpers for xi-tweaks.
//!
//! Provides the fake host shell, clock, and scheduler the state-machine
//! tests drive, plus canonical config factories.
//!
//! Note: Rust integration tests bring this in with `mod common;` (not
//! `use`), and the `#![allow(dead_code)]` suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use xi_tweaks::config::{ColumnMarker, Config};
use xi_tweaks::focus::FocusTracker;
use xi_tweaks::host::{
    Clock, Container, HostShell, Scheduler, SignalHandler, SignalKind, SignalSource,
    SubscriptionId, TabStyle, WidgetNode,
};

// ---------------------------------------------------------------------------
// Fake widgets
// ---------------------------------------------------------------------------

/// Widget stand-in with settable focus flags.
pub struct FakeWidget {
    children: RefCell<Vec<Rc<FakeWidget>>>,
    can_focus: bool,
    has_focus: Cell<bool>,
}

impl FakeWidget {
    pub fn leaf(can_focus: bool) -> Rc<FakeWidget> {
        Rc::new(FakeWidget {
            children: RefCell::new(Vec::new()),
            can_focus,
            has_focus: Cell::new(false),
        })
    }

    pub fn branch(children: Vec<Rc<FakeWidget>>) -> Rc<FakeWidget> {
        Rc::new(FakeWidget {
            children: RefCell::new(children),
            can_focus: false,
            has_focus: Cell::new(false),
        })
    }

    pub fn set_focus(&self, focus: bool) {
        self.has_focus.set(focus);
    }
}

impl WidgetNode for FakeWidget {
    fn children(&self) -> Vec<Rc<dyn WidgetNode>> {
        self.children
            .borrow()
            .iter()
            .map(|child| Rc::clone(child) as Rc<dyn WidgetNode>)
            .collect()
    }

    fn can_focus(&self) -> bool {
        self.can_focus
    }

    fn has_focus(&self) -> bool {
        self.has_focus.get()
    }
}

// ---------------------------------------------------------------------------
// Fake clock and scheduler
// ---------------------------------------------------------------------------

/// Hand-cranked monotonic clock.
pub struct FakeClock {
    now: Cell<Duration>,
}

impl FakeClock {
    pub fn new() -> Rc<FakeClock> {
        Rc::new(FakeClock {
            now: Cell::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

struct ScheduledCall {
    fire_at: Duration,
    callback: Box<dyn FnOnce()>,
}

/// Deterministic scheduler: callbacks fire when the fake clock reaches
/// their deadline and `run_due` (or `advance`) is called.
pub struct FakeScheduler {
    clock: Rc<FakeClock>,
    queue: RefCell<Vec<ScheduledCall>>,
}

impl FakeScheduler {
    pub fn new(clock: Rc<FakeClock>) -> Rc<FakeScheduler> {
        Rc::new(FakeScheduler {
            clock,
            queue: RefCell::new(Vec::new()),
        })
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire every callback whose deadline has passed, including callbacks
    /// they themselves schedule for the current instant.
    pub fn run_due(&self) {
        loop {
            let now = self.clock.now.get();
            let due: Vec<Box<dyn FnOnce()>> = {
                let mut queue = self.queue.borrow_mut();
                let mut due = Vec::new();
                let mut index = 0;
                while index < queue.len() {
                    if queue[index].fire_at <= now {
                        due.push(queue.remove(index).callback);
                    } else {
                        index += 1;
                    }
                }
                due
            };
            if due.is_empty() {
                break;
            }
            for callback in due {
                callback();
            }
        }
    }

    /// Move the clock forward and fire everything that came due.
    pub fn advance(&self, delta: Duration) {
        self.clock.advance(delta);
        self.run_due();
    }
}

impl Scheduler for FakeScheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push(ScheduledCall {
            fire_at: self.clock.now.get() + delay,
            callback,
        });
    }

    fn schedule_idle(&self, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push(ScheduledCall {
            fire_at: self.clock.now.get(),
            callback,
        });
    }
}

// ---------------------------------------------------------------------------
// Fake host shell
// ---------------------------------------------------------------------------

pub struct FakeTab {
    pub label: RefCell<String>,
    pub style: Cell<Option<TabStyle>>,
    pub page: Rc<FakeWidget>,
}

impl FakeTab {
    fn new(label: &str) -> FakeTab {
        // Page tree: a wrapper holding one focusable leaf, like a scrolled
        // window around a tree view.
        let leaf = FakeWidget::leaf(true);
        FakeTab {
            label: RefCell::new(label.to_string()),
            style: Cell::new(None),
            page: FakeWidget::branch(vec![leaf]),
        }
    }

    /// The focusable leaf inside this tab's page.
    pub fn focus_leaf(&self) -> Rc<FakeWidget> {
        Rc::clone(&self.page.children.borrow()[0])
    }
}

pub struct ContainerState {
    pub visible: Cell<bool>,
    pub has_focus: Cell<bool>,
    pub current: Cell<usize>,
    pub tabs: Vec<FakeTab>,
}

impl ContainerState {
    fn new(labels: &[&str]) -> ContainerState {
        ContainerState {
            visible: Cell::new(true),
            has_focus: Cell::new(false),
            current: Cell::new(0),
            tabs: labels.iter().map(|label| FakeTab::new(label)).collect(),
        }
    }
}

type StoredHandler = (SignalSource, SignalKind, Rc<dyn Fn()>);

/// In-memory host shell: three tabbed containers, a splitter, a menu bar,
/// an editing surface with fixed font metrics, and a signal hub.
pub struct FakeShell {
    containers: HashMap<Container, ContainerState>,
    handlers: RefCell<HashMap<SubscriptionId, StoredHandler>>,
    next_subscription: Cell<SubscriptionId>,
    pub editor_focus: Cell<bool>,
    pub maximized: Cell<bool>,
    pub splitter: Cell<i32>,
    pub menu_visible: Cell<bool>,
    pub markers: RefCell<Vec<ColumnMarker>>,
    /// Pixel width of one reference character; `text_width` multiplies.
    pub char_width: Cell<i32>,
    pub origin: Cell<i32>,
    pub grabs: RefCell<Vec<Container>>,
    pub opened_documents: RefCell<Vec<PathBuf>>,
    /// Every `set_tab_label` call, for flicker assertions.
    pub label_writes: RefCell<Vec<(Container, usize, String)>>,
}

impl FakeShell {
    pub fn new() -> Rc<FakeShell> {
        let mut containers = HashMap::new();
        containers.insert(Container::Editor, ContainerState::new(&["untitled"]));
        containers.insert(
            Container::Sidebar,
            ContainerState::new(&["Symbols", "Files"]),
        );
        containers.insert(Container::MessageWindow, ContainerState::new(&["Status"]));
        Rc::new(FakeShell {
            containers,
            handlers: RefCell::new(HashMap::new()),
            next_subscription: Cell::new(1),
            editor_focus: Cell::new(false),
            maximized: Cell::new(false),
            splitter: Cell::new(0),
            menu_visible: Cell::new(true),
            markers: RefCell::new(Vec::new()),
            char_width: Cell::new(7),
            origin: Cell::new(10),
            grabs: RefCell::new(Vec::new()),
            opened_documents: RefCell::new(Vec::new()),
            label_writes: RefCell::new(Vec::new()),
        })
    }

    pub fn container(&self, container: Container) -> &ContainerState {
        &self.containers[&container]
    }

    /// Fire a signal: every handler registered for (source, kind) runs.
    pub fn emit(&self, source: SignalSource, kind: SignalKind) {
        let due: Vec<Rc<dyn Fn()>> = self
            .handlers
            .borrow()
            .values()
            .filter(|(s, k, _)| *s == source && *k == kind)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();
        for handler in due {
            handler();
        }
    }

    /// Number of live signal subscriptions.
    pub fn connection_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Drop all focus flags everywhere.
    pub fn focus_none(&self) {
        self.editor_focus.set(false);
        for state in self.containers.values() {
            state.has_focus.set(false);
            for tab in &state.tabs {
                tab.focus_leaf().set_focus(false);
                tab.page.set_focus(false);
            }
        }
    }

    /// Give `container` the window focus (exclusively) without emitting.
    /// Focus lands on the current tab's focusable leaf, like a real grab.
    pub fn set_exclusive_focus(&self, container: Container) {
        self.focus_none();
        let state = self.container(container);
        state.has_focus.set(true);
        if let Some(tab) = state.tabs.get(state.current.get()) {
            tab.focus_leaf().set_focus(true);
        }
        if container == Container::Editor {
            self.editor_focus.set(true);
        }
    }

    pub fn tab_style_of(&self, container: Container, tab: usize) -> Option<TabStyle> {
        self.container(container).tabs[tab].style.get()
    }

    pub fn tab_label_of(&self, container: Container, tab: usize) -> String {
        self.container(container).tabs[tab].label.borrow().clone()
    }
}

impl HostShell for FakeShell {
    fn connect(
        &self,
        source: SignalSource,
        kind: SignalKind,
        handler: SignalHandler,
    ) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.handlers
            .borrow_mut()
            .insert(id, (source, kind, Rc::from(handler)));
        id
    }

    fn disconnect(&self, subscription: SubscriptionId) {
        self.handlers.borrow_mut().remove(&subscription);
    }

    fn container_has_focus(&self, container: Container) -> bool {
        self.container(container).has_focus.get()
    }

    fn container_is_visible(&self, container: Container) -> bool {
        self.container(container).visible.get()
    }

    fn current_tab(&self, container: Container) -> Option<usize> {
        let state = self.container(container);
        let current = state.current.get();
        (current < state.tabs.len()).then_some(current)
    }

    fn tab_count(&self, container: Container) -> usize {
        self.container(container).tabs.len()
    }

    fn tab_label(&self, container: Container, tab: usize) -> Option<String> {
        self.container(container)
            .tabs
            .get(tab)
            .map(|t| t.label.borrow().clone())
    }

    fn set_tab_label(&self, container: Container, tab: usize, markup: &str) {
        if let Some(t) = self.container(container).tabs.get(tab) {
            *t.label.borrow_mut() = markup.to_string();
            self.label_writes
                .borrow_mut()
                .push((container, tab, markup.to_string()));
        }
    }

    fn set_tab_style(&self, container: Container, tab: usize, style: TabStyle) {
        if let Some(t) = self.container(container).tabs.get(tab) {
            t.style.set(Some(style));
        }
    }

    fn tab_widget(&self, container: Container, tab: usize) -> Option<Rc<dyn WidgetNode>> {
        self.container(container)
            .tabs
            .get(tab)
            .map(|t| Rc::clone(&t.page) as Rc<dyn WidgetNode>)
    }

    fn grab_focus(&self, container: Container) {
        self.grabs.borrow_mut().push(container);
        self.set_exclusive_focus(container);
        self.emit(SignalSource::Container(container), SignalKind::GrabAcquired);
    }

    fn editor_has_focus(&self) -> bool {
        self.editor_focus.get()
    }

    fn set_column_markers(&self, markers: &[ColumnMarker]) {
        self.markers.borrow_mut().extend_from_slice(markers);
    }

    fn clear_column_markers(&self) {
        self.markers.borrow_mut().clear();
    }

    fn text_width(&self, text: &str) -> Option<i32> {
        let width = self.char_width.get();
        (width > 0).then(|| width * text.chars().count() as i32)
    }

    fn column_origin(&self) -> Option<i32> {
        Some(self.origin.get())
    }

    fn is_maximized(&self) -> bool {
        self.maximized.get()
    }

    fn splitter_position(&self) -> i32 {
        self.splitter.get()
    }

    fn set_splitter_position(&self, position: i32) {
        self.splitter.set(position);
    }

    fn menu_bar_visible(&self) -> bool {
        self.menu_visible.get()
    }

    fn set_menu_bar_visible(&self, visible: bool) {
        self.menu_visible.set(visible);
    }

    fn open_document(&self, path: &Path) {
        self.opened_documents.borrow_mut().push(path.to_path_buf());
    }
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

/// Settings with focus highlighting across all containers.
pub fn global_focus_config() -> Config {
    let mut config = Config::default();
    config.notebook_focus_enabled = true;
    config
}

/// Settings with focus highlighting restricted to the sidebar.
pub fn sidebar_focus_config() -> Config {
    let mut config = Config::default();
    config.sidebar_focus_enabled = true;
    config
}

/// Everything a focus-tracker test needs, wired together.
pub struct TestContext {
    pub shell: Rc<FakeShell>,
    pub clock: Rc<FakeClock>,
    pub scheduler: Rc<FakeScheduler>,
    pub config: Rc<RefCell<Config>>,
    pub tracker: FocusTracker,
}

impl TestContext {
    pub fn new(config: Config) -> TestContext {
        let shell = FakeShell::new();
        let clock = FakeClock::new();
        let scheduler = FakeScheduler::new(Rc::clone(&clock));
        let config = Rc::new(RefCell::new(config));
        let tracker = FocusTracker::new(
            Rc::clone(&shell) as Rc<dyn HostShell>,
            Rc::clone(&clock) as Rc<dyn Clock>,
            Rc::clone(&scheduler) as Rc<dyn Scheduler>,
            Rc::clone(&config),
        );
        TestContext {
            shell,
            clock,
            scheduler,
            config,
            tracker,
        }
    }
}
