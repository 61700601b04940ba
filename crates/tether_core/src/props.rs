//! Mount point props
//!
//! What a caller hands the mount point on every render: `{ id, className,
//! options, on<Event> handlers }`. Props are rebuilt from scratch each render;
//! the controller decides what actually changed.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::events::{EventArg, Handler, WidgetEvent};
use crate::options::Options;

/// Props for a widget mount point
#[derive(Clone, Default)]
pub struct ElementProps {
    /// `id` attribute of the container surface
    pub id: Option<String>,
    /// Caller-owned class string
    pub class_name: Option<String>,
    /// Widget options
    pub options: Options,
    handlers: FxHashMap<WidgetEvent, Handler>,
}

impl ElementProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the handler for an event
    pub fn on<F>(mut self, event: WidgetEvent, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.handlers.insert(event, Rc::new(handler));
        self
    }

    /// The handler for an event, if the caller supplied one
    pub fn handler(&self, event: WidgetEvent) -> Option<&Handler> {
        self.handlers.get(&event)
    }

    /// Events the caller supplied handlers for
    pub fn handled_events(&self) -> impl Iterator<Item = WidgetEvent> + '_ {
        self.handlers.keys().copied()
    }

    // =========================================================================
    // Convenience registration methods
    // =========================================================================

    pub fn on_ready<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Ready, handler)
    }

    pub fn on_change<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Change, handler)
    }

    pub fn on_blur<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Blur, handler)
    }

    pub fn on_focus<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Focus, handler)
    }

    pub fn on_escape<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Escape, handler)
    }

    pub fn on_click<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Click, handler)
    }

    pub fn on_load_error<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::LoadError, handler)
    }

    pub fn on_loader_start<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::LoaderStart, handler)
    }

    pub fn on_networks_change<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::NetworksChange, handler)
    }

    pub fn on_checkout<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Checkout, handler)
    }

    pub fn on_line_item_click<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::LineItemClick, handler)
    }

    pub fn on_confirm<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Confirm, handler)
    }

    pub fn on_cancel<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::Cancel, handler)
    }

    pub fn on_shipping_address_change<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::ShippingAddressChange, handler)
    }

    pub fn on_shipping_rate_change<F>(self, handler: F) -> Self
    where
        F: Fn(&EventArg) + 'static,
    {
        self.on(WidgetEvent::ShippingRateChange, handler)
    }
}

impl fmt::Debug for ElementProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<_> = self.handled_events().map(|e| e.prop_name()).collect();
        handlers.sort_unstable();
        f.debug_struct("ElementProps")
            .field("id", &self.id)
            .field("class_name", &self.class_name)
            .field("options", &self.options)
            .field("handlers", &handlers)
            .finish()
    }
}
