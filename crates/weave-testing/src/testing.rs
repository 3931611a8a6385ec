use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use weave_core::{Component, DefaultScheduler, Host, HostConfig, HostError, Inflate, RenderReport};
use weave_ui::{GestureEvent, GestureKind, ViewPayload};

/// Installs `env_logger` once for the test binary. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Headless harness around a [`Host`].
///
/// `WeaveTestRule` renders synchronously and exposes the produced tree so tests
/// can assert on it without a view layer.
pub struct WeaveTestRule {
    host: Host,
}

impl WeaveTestRule {
    /// Create a rule for `content` and perform the initial render.
    pub fn new<F, I>(content: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Inflate,
    {
        init_logging();
        let mut host =
            Host::with_config(HostConfig::from_env(), Rc::new(DefaultScheduler), content);
        host.render();
        Self { host }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    pub fn tree(&self) -> &Component {
        self.host.tree()
    }

    /// Force a pass regardless of pending requests.
    pub fn render(&mut self) -> RenderReport {
        self.host.render()
    }

    /// Render while state writes keep requesting passes.
    pub fn pump_until_idle(&mut self) -> Result<Option<RenderReport>, HostError> {
        if !self.host.needs_render() {
            return Ok(None);
        }
        self.host.render_until_settled().map(Some)
    }

    pub fn dump(&self) -> String {
        dump_tree(self.tree())
    }

    pub fn find_views(&self, class: &str) -> Vec<Component> {
        find_views(self.tree(), class)
    }

    pub fn fire_gesture(&self, class: &str, event: GestureEvent) -> bool {
        fire_gesture(self.tree(), class, event)
    }
}

/// Indented outline of `tree` with view classes and attributes inlined.
pub fn dump_tree(tree: &Component) -> String {
    let mut out = String::new();
    tree.walk(&mut |component, depth| {
        let _ = write!(out, "{:indent$}", "", indent = depth * 2);
        match component.payload::<ViewPayload>() {
            Some(view) => {
                let _ = write!(out, "{}", view.config);
                if let Some(size) = view.size {
                    let _ = write!(out, " [{size}]");
                }
            }
            None => out.push_str(component.payload_name()),
        }
        if component.model().is_some() {
            out.push_str(" +model");
        }
        out.push('\n');
    });
    out
}

/// Every payload of type `T` in pre-order.
pub fn collect_payloads<T: Clone + 'static>(tree: &Component) -> Vec<T> {
    let mut found = Vec::new();
    tree.walk(&mut |component, _| {
        if let Some(payload) = component.payload::<T>() {
            found.push(payload.clone());
        }
    });
    found
}

/// Components backed by a view of class `class`, in pre-order.
pub fn find_views(tree: &Component, class: &str) -> Vec<Component> {
    let mut found = Vec::new();
    tree.walk(&mut |component, _| {
        let matches = component
            .payload::<ViewPayload>()
            .map(|view| view.config.class().name() == class)
            .unwrap_or(false);
        if matches {
            found.push(component.clone());
        }
    });
    found
}

/// Fires the first `event.kind` recognizer found on a view of class `class`.
/// Returns `false` when no such recognizer exists.
pub fn fire_gesture(tree: &Component, class: &str, event: GestureEvent) -> bool {
    let gesture = find_views(tree, class).iter().find_map(|component| {
        let view = component.payload::<ViewPayload>()?;
        view.config.gesture(event.kind).cloned()
    });
    match gesture {
        Some(gesture) => {
            gesture.fire(&event);
            true
        }
        None => false,
    }
}

/// Convenience for tap events at the origin.
pub fn tap(tree: &Component, class: &str) -> bool {
    fire_gesture(tree, class, GestureEvent::new(GestureKind::Tap, Default::default()))
}

/// Ordered record of callback invocations shared between closures.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// A callback that records `entry` each time it runs.
    pub fn recorder(&self, entry: impl Into<String>) -> impl Fn() + 'static {
        let log = self.clone();
        let entry = entry.into();
        move || log.push(entry.clone())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Returns the recorded entries and clears the log.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl std::fmt::Debug for CallLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.borrow().iter()).finish()
    }
}
