//! Shared cart state
//!
//! A cart widget publishes itself and its latest state to a cart context so
//! components outside the mount point (a checkout summary, a badge) can read
//! it. The lifecycle controller is the only writer; everything else reads or
//! subscribes.
//!
//! Unlike reactive state, store writes don't trigger re-renders by
//! themselves. Subscribers decide what to do with a change.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tether_core::store::CartContext;
//!
//! let cart = CartContext::new();
//! let _sub = cart.subscribe_state(|state| println!("cart changed: {}", state));
//!
//! cart.set_state(json!({ "lineItems": { "count": 2 } }));
//! assert_eq!(cart.state().unwrap()["lineItems"]["count"], 2);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::widget::WidgetHandle;

/// Single-value store with change subscribers
///
/// Single-threaded: the render loop is the only writer.
pub struct Store<T: Clone + 'static> {
    value: RefCell<Option<T>>,
    subscribers: RefCell<Vec<(u64, Rc<dyn Fn(&T)>)>>,
    next_subscriber: Cell<u64>,
}

impl<T: Clone + 'static> Store<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber: Cell::new(0),
        }
    }

    /// Get the current value, if one was ever set
    pub fn get(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = Some(value.clone());
        self.notify(&value);
    }

    /// Drop the value without notifying
    pub fn clear(&self) {
        self.value.borrow_mut().take();
    }

    /// Subscribe to changes
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_subscriber.get();
        self.next_subscriber.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        SubscriptionHandle { id }
    }

    /// Remove a subscriber
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != handle.id);
    }

    fn notify(&self, value: &T) {
        // Snapshot first so a subscriber can (un)subscribe while being notified
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in subscribers {
            callback(value);
        }
    }
}

impl<T: Clone + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for unsubscribing from store updates
#[derive(Debug, PartialEq, Eq)]
pub struct SubscriptionHandle {
    id: u64,
}

/// Cart context shared between a cart widget and its readers
///
/// Cheap to clone; clones share the same underlying stores.
#[derive(Clone, Default)]
pub struct CartContext {
    inner: Rc<CartInner>,
}

#[derive(Default)]
struct CartInner {
    element: Store<WidgetHandle>,
    state: Store<Value>,
}

impl CartContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the cart widget itself
    pub fn set_element(&self, widget: WidgetHandle) {
        self.inner.element.set(widget);
    }

    /// The published cart widget
    pub fn element(&self) -> Option<WidgetHandle> {
        self.inner.element.get()
    }

    /// Publish the latest cart state derived from a widget event
    pub fn set_state(&self, state: Value) {
        self.inner.state.set(state);
    }

    /// The latest cart state
    pub fn state(&self) -> Option<Value> {
        self.inner.state.get()
    }

    /// Subscribe to cart state changes
    pub fn subscribe_state<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&Value) + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    pub fn unsubscribe_state(&self, handle: SubscriptionHandle) {
        self.inner.state.unsubscribe(handle);
    }

    /// Forget the published element (its widget was destroyed)
    pub fn clear_element(&self) {
        self.inner.element.clear();
    }
}
