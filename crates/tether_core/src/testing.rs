//! Recording test doubles
//!
//! A factory, widget, and container that record every call made on them so
//! tests can assert on exact interaction counts and order.
//!
//! Enabled for this crate's own tests and, through the `test-helpers`
//! feature, for downstream crates.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::container::{Container, ContainerHandle};
use crate::dispatch::Dispatcher;
use crate::error::WidgetError;
use crate::events::WidgetEvent;
use crate::options::Options;
use crate::widget::{WidgetFactory, WidgetHandle, WidgetInstance, WidgetKind};

/// Class a [`RecordingWidget`] adds to its container on mount, the way a
/// real widget marks its host surface for its own styling
pub const WIDGET_CLASS: &str = "TetherWidget";

/// A recorded interaction
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create(WidgetKind),
    Mount,
    Update(Options),
    On(WidgetEvent),
    Off(WidgetEvent),
    Destroy,
    FactoryUpdate(Options),
}

/// Ordered log of calls shared between a factory and its widgets
#[derive(Default)]
pub struct CallLog {
    calls: RefCell<Vec<Call>>,
}

impl CallLog {
    pub fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Call) -> bool,
    {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Payloads of every widget `update` call, in order
    pub fn updates(&self) -> Vec<Options> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Update(options) => Some(options.clone()),
                _ => None,
            })
            .collect()
    }

    /// Payloads of every factory `update` call, in order
    pub fn factory_updates(&self) -> Vec<Options> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::FactoryUpdate(options) => Some(options.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }
}

/// Widget that records calls and can emit events to its dispatchers
pub struct RecordingWidget {
    log: Rc<CallLog>,
    dispatchers: RefCell<Vec<(WidgetEvent, Dispatcher)>>,
    fail_destroy: bool,
    destroy_supported: bool,
}

impl RecordingWidget {
    /// Invoke every dispatcher subscribed to `event`
    pub fn emit(&self, event: WidgetEvent, payload: Value) {
        let dispatchers: Vec<_> = self
            .dispatchers
            .borrow()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, d)| d.clone())
            .collect();
        for dispatcher in dispatchers {
            dispatcher(&payload);
        }
    }
}

impl WidgetInstance for RecordingWidget {
    fn mount(&self, container: &ContainerHandle) {
        self.log.push(Call::Mount);
        container.add_class(WIDGET_CLASS);
    }

    fn update(&self, options: &Options) {
        self.log.push(Call::Update(options.clone()));
    }

    fn on(&self, event: WidgetEvent, dispatcher: Dispatcher) {
        self.log.push(Call::On(event));
        self.dispatchers.borrow_mut().push((event, dispatcher));
    }

    fn off(&self, event: WidgetEvent, dispatcher: &Dispatcher) {
        self.log.push(Call::Off(event));
        self.dispatchers
            .borrow_mut()
            .retain(|(e, d)| !(*e == event && Rc::ptr_eq(d, dispatcher)));
    }

    fn destroy(&self) -> Result<(), WidgetError> {
        self.log.push(Call::Destroy);
        self.dispatchers.borrow_mut().clear();
        if self.fail_destroy {
            Err(WidgetError::Destroy("widget already detached".to_string()))
        } else {
            Ok(())
        }
    }

    fn can_destroy(&self) -> bool {
        self.destroy_supported
    }
}

/// Factory that records creations and hands out [`RecordingWidget`]s
pub struct RecordingFactory {
    log: Rc<CallLog>,
    widgets: RefCell<Vec<Rc<RecordingWidget>>>,
    created_options: RefCell<Vec<Options>>,
    fail_destroy: Cell<bool>,
    destroy_supported: Cell<bool>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self {
            log: Rc::new(CallLog::default()),
            widgets: RefCell::new(Vec::new()),
            created_options: RefCell::new(Vec::new()),
            fail_destroy: Cell::new(false),
            destroy_supported: Cell::new(true),
        }
    }

    /// Widgets created from now on fail their `destroy`
    pub fn fail_destroy(&self, fail: bool) {
        self.fail_destroy.set(fail);
    }

    /// Widgets created from now on report whether `destroy` is callable
    pub fn support_destroy(&self, supported: bool) {
        self.destroy_supported.set(supported);
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    pub fn create_count(&self) -> usize {
        self.widgets.borrow().len()
    }

    /// Options passed to each `create`, in order
    pub fn created_options(&self) -> Vec<Options> {
        self.created_options.borrow().clone()
    }

    pub fn last_widget(&self) -> Option<Rc<RecordingWidget>> {
        self.widgets.borrow().last().cloned()
    }
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetFactory for RecordingFactory {
    fn create(&self, kind: &WidgetKind, options: &Options) -> WidgetHandle {
        self.log.push(Call::Create(kind.clone()));
        self.created_options.borrow_mut().push(options.clone());

        let widget = Rc::new(RecordingWidget {
            log: self.log.clone(),
            dispatchers: RefCell::new(Vec::new()),
            fail_destroy: self.fail_destroy.get(),
            destroy_supported: self.destroy_supported.get(),
        });
        self.widgets.borrow_mut().push(widget.clone());
        widget
    }

    fn update(&self, options: &Options) {
        self.log.push(Call::FactoryUpdate(options.clone()));
    }
}

/// Container with an inspectable class list
#[derive(Default)]
pub struct TestContainer {
    classes: RefCell<Vec<String>>,
}

impl TestContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class tokens in insertion order
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }
}

impl Container for TestContainer {
    fn add_class(&self, token: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == token) {
            classes.push(token.to_string());
        }
    }

    fn remove_class(&self, token: &str) {
        self.classes.borrow_mut().retain(|c| c != token);
    }

    fn has_class(&self, token: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == token)
    }
}
