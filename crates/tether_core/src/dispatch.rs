//! Stable event dispatch
//!
//! Callers pass a new closure for every handler on every render. Passing
//! those straight to the widget would mean an `off`/`on` pair per handler
//! per render, and some widgets treat their subscription table as expensive
//! or order-sensitive.
//!
//! Instead, each event gets one [`Dispatcher`] per widget lifetime. The
//! dispatcher closes over a [`CallbackSlot`] and forwards to whatever handler
//! the slot holds when the event fires:
//!
//! ```text
//! render N:   set_handler(change, h1) ──┐
//! render N+1: set_handler(change, h2) ──┤ rewrite slot, no widget call
//!                                       ▼
//!                              ┌─────────────────┐
//! widget.on(change, d) ◄─ once │ CallbackSlot    │
//!          │                   │  Some(h2)       │
//!          ▼                   └─────────────────┘
//!   d(payload) ──────────────────────► h2(arg)
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::events::{EventArg, Handler, WidgetEvent};
use crate::store::CartContext;
use crate::widget::{WidgetHandle, WidgetInstance, WidgetKind};

/// Forwarding function registered with the widget
///
/// Its identity (the `Rc` allocation) never changes for the lifetime of a
/// widget instance.
pub type Dispatcher = Rc<dyn Fn(&Value)>;

/// Single-slot reference to the caller's current handler
pub type CallbackSlot = Rc<RefCell<Option<Handler>>>;

/// How a dispatcher turns a widget payload into a handler argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Forward {
    /// Pass the payload through
    Payload,
    /// Pass the widget reference (most kinds' `ready`)
    Widget,
}

/// Owns one callback slot and at most one bound dispatcher per event
#[derive(Default)]
pub struct EventBindingRegistry {
    slots: FxHashMap<WidgetEvent, CallbackSlot>,
    bound: FxHashMap<WidgetEvent, Dispatcher>,
}

impl EventBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, event: WidgetEvent) -> CallbackSlot {
        self.slots.entry(event).or_default().clone()
    }

    /// Replace the caller's handler for an event
    ///
    /// Never touches the widget.
    pub fn set_handler(&mut self, event: WidgetEvent, handler: Option<Handler>) {
        if handler.is_none() && !self.slots.contains_key(&event) {
            return;
        }
        *self.slot(event).borrow_mut() = handler;
    }

    /// Check whether a caller handler is currently stored for an event
    pub fn has_handler(&self, event: WidgetEvent) -> bool {
        self.slots
            .get(&event)
            .map(|slot| slot.borrow().is_some())
            .unwrap_or(false)
    }

    /// Check whether a dispatcher is registered with the widget
    pub fn is_bound(&self, event: WidgetEvent) -> bool {
        self.bound.contains_key(&event)
    }

    /// The dispatcher registered for an event, if any
    pub fn dispatcher(&self, event: WidgetEvent) -> Option<&Dispatcher> {
        self.bound.get(&event)
    }

    /// Register a dispatcher for `event` with the widget
    ///
    /// Idempotent: returns `false` without touching the widget if the event
    /// is already bound for this widget lifetime.
    pub fn bind(
        &mut self,
        widget: &WidgetHandle,
        kind: &WidgetKind,
        event: WidgetEvent,
        cart: Option<&CartContext>,
    ) -> bool {
        if self.bound.contains_key(&event) {
            return false;
        }

        let slot = self.slot(event);
        let forward = if event == WidgetEvent::Ready && !kind.ready_passes_payload() {
            Forward::Widget
        } else {
            Forward::Payload
        };
        let cart = if kind.is_cart() && event.updates_cart_state() {
            cart.cloned()
        } else {
            None
        };

        let dispatcher = make_dispatcher(slot, forward, Rc::downgrade(widget), cart);
        widget.on(event, dispatcher.clone());
        self.bound.insert(event, dispatcher);

        tracing::debug!("bound '{}' dispatcher for {} widget", event, kind);
        true
    }

    /// Forget bound dispatchers at the end of a widget lifetime
    ///
    /// Caller handlers are kept so the next widget picks them up.
    pub fn release(&mut self) {
        self.bound.clear();
    }
}

fn make_dispatcher(
    slot: CallbackSlot,
    forward: Forward,
    widget: Weak<dyn WidgetInstance>,
    cart: Option<CartContext>,
) -> Dispatcher {
    Rc::new(move |payload: &Value| {
        if let Some(cart) = &cart {
            cart.set_state(payload.clone());
        }

        // Clone out of the slot so the handler may trigger a re-render that
        // rewrites it.
        let handler = slot.borrow().clone();
        let Some(handler) = handler else {
            return;
        };

        match forward {
            Forward::Payload => handler(&EventArg::Payload(payload.clone())),
            Forward::Widget => {
                if let Some(widget) = widget.upgrade() {
                    handler(&EventArg::Widget(widget));
                }
            }
        }
    })
}

/// Events a widget kind always needs bound, handler or not
pub fn required_events(kind: &WidgetKind) -> &'static [WidgetEvent] {
    if kind.is_cart() {
        &[WidgetEvent::Ready, WidgetEvent::Change, WidgetEvent::Checkout]
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerHandle;
    use crate::error::WidgetError;
    use crate::options::Options;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Default)]
    struct Subscriptions {
        on_calls: Cell<u32>,
        off_calls: Cell<u32>,
        handlers: RefCell<Vec<(WidgetEvent, Dispatcher)>>,
    }

    impl Subscriptions {
        fn emit(&self, event: WidgetEvent, payload: Value) {
            let handlers: Vec<_> = self
                .handlers
                .borrow()
                .iter()
                .filter(|(e, _)| *e == event)
                .map(|(_, d)| d.clone())
                .collect();
            for dispatcher in handlers {
                dispatcher(&payload);
            }
        }
    }

    impl WidgetInstance for Subscriptions {
        fn mount(&self, _container: &ContainerHandle) {}
        fn update(&self, _options: &Options) {}
        fn on(&self, event: WidgetEvent, dispatcher: Dispatcher) {
            self.on_calls.set(self.on_calls.get() + 1);
            self.handlers.borrow_mut().push((event, dispatcher));
        }
        fn off(&self, _event: WidgetEvent, _dispatcher: &Dispatcher) {
            self.off_calls.set(self.off_calls.get() + 1);
        }
        fn destroy(&self) -> Result<(), WidgetError> {
            Ok(())
        }
    }

    fn widget() -> (Rc<Subscriptions>, WidgetHandle) {
        let concrete = Rc::new(Subscriptions::default());
        let handle: WidgetHandle = concrete.clone();
        (concrete, handle)
    }

    fn recording_handler(log: &Rc<RefCell<Vec<String>>>, tag: &str) -> Handler {
        let log = log.clone();
        let tag = tag.to_string();
        Rc::new(move |arg: &EventArg| {
            let entry = match arg {
                EventArg::Payload(v) => format!("{}:{}", tag, v),
                EventArg::Widget(_) => format!("{}:widget", tag),
            };
            log.borrow_mut().push(entry);
        })
    }

    #[test]
    fn test_rebinding_handler_does_not_touch_widget() {
        let (concrete, handle) = widget();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventBindingRegistry::new();

        registry.set_handler(WidgetEvent::Change, Some(recording_handler(&log, "h1")));
        assert!(registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Change, None));

        for i in 0..5 {
            let tag = format!("h{}", i + 2);
            registry.set_handler(WidgetEvent::Change, Some(recording_handler(&log, &tag)));
        }
        assert!(!registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Change, None));

        concrete.emit(WidgetEvent::Change, json!({ "complete": true }));

        assert_eq!(concrete.on_calls.get(), 1);
        assert_eq!(concrete.off_calls.get(), 0);
        assert_eq!(*log.borrow(), vec![r#"h6:{"complete":true}"#.to_string()]);
    }

    #[test]
    fn test_dispatcher_identity_is_stable() {
        let (_concrete, handle) = widget();
        let mut registry = EventBindingRegistry::new();
        registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Blur, None);

        let first = registry.dispatcher(WidgetEvent::Blur).unwrap().clone();
        registry.set_handler(WidgetEvent::Blur, Some(Rc::new(|_: &EventArg| {})));
        let second = registry.dispatcher(WidgetEvent::Blur).unwrap();
        assert!(Rc::ptr_eq(&first, second));
    }

    #[test]
    fn test_ready_passes_widget_for_most_kinds() {
        let (concrete, handle) = widget();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventBindingRegistry::new();

        registry.set_handler(WidgetEvent::Ready, Some(recording_handler(&log, "ready")));
        registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Ready, None);
        concrete.emit(WidgetEvent::Ready, json!({ "elementType": "card" }));

        assert_eq!(*log.borrow(), vec!["ready:widget".to_string()]);
    }

    #[test]
    fn test_ready_passes_payload_for_express_checkout() {
        let (concrete, handle) = widget();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventBindingRegistry::new();

        registry.set_handler(WidgetEvent::Ready, Some(recording_handler(&log, "ready")));
        registry.bind(&handle, &WidgetKind::ExpressCheckout, WidgetEvent::Ready, None);
        concrete.emit(WidgetEvent::Ready, json!({ "availablePaymentMethods": {} }));

        assert_eq!(
            *log.borrow(),
            vec![r#"ready:{"availablePaymentMethods":{}}"#.to_string()]
        );
    }

    #[test]
    fn test_cart_events_update_shared_state_before_handler() {
        let (concrete, handle) = widget();
        let cart = CartContext::new();
        let mut registry = EventBindingRegistry::new();

        let observed = Rc::new(RefCell::new(None));
        let observed_clone = observed.clone();
        let cart_reader = cart.clone();
        registry.set_handler(
            WidgetEvent::Change,
            Some(Rc::new(move |_: &EventArg| {
                *observed_clone.borrow_mut() = cart_reader.state();
            })),
        );

        for event in required_events(&WidgetKind::Cart) {
            registry.bind(&handle, &WidgetKind::Cart, *event, Some(&cart));
        }
        concrete.emit(WidgetEvent::Change, json!({ "lineItems": { "count": 3 } }));

        assert_eq!(
            *observed.borrow(),
            Some(json!({ "lineItems": { "count": 3 } }))
        );

        // No handler for checkout: state still mirrored
        concrete.emit(WidgetEvent::Checkout, json!({ "step": "pay" }));
        assert_eq!(cart.state(), Some(json!({ "step": "pay" })));
    }

    #[test]
    fn test_non_cart_kind_never_writes_cart_state() {
        let (concrete, handle) = widget();
        let cart = CartContext::new();
        let mut registry = EventBindingRegistry::new();

        registry.bind(&handle, &WidgetKind::Payment, WidgetEvent::Change, Some(&cart));
        concrete.emit(WidgetEvent::Change, json!({ "complete": false }));
        assert_eq!(cart.state(), None);
    }

    #[test]
    fn test_missing_handler_is_noop() {
        let (concrete, handle) = widget();
        let mut registry = EventBindingRegistry::new();
        registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Focus, None);

        concrete.emit(WidgetEvent::Focus, Value::Null);
        assert!(!registry.has_handler(WidgetEvent::Focus));
    }

    #[test]
    fn test_release_keeps_handlers() {
        let (_concrete, handle) = widget();
        let mut registry = EventBindingRegistry::new();
        registry.set_handler(WidgetEvent::Click, Some(Rc::new(|_: &EventArg| {})));
        registry.bind(&handle, &WidgetKind::Card, WidgetEvent::Click, None);

        registry.release();
        assert!(!registry.is_bound(WidgetEvent::Click));
        assert!(registry.has_handler(WidgetEvent::Click));
    }
}
