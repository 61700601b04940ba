//! Widget event names and handler types
//!
//! The set of events a widget can emit is fixed. Each variant maps to the
//! lowercase wire name passed to `WidgetInstance::on`, and to the `on<Event>`
//! prop a caller uses to supply a handler.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde_json::Value;

use crate::widget::WidgetHandle;

/// Events a widget may emit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetEvent {
    Ready,
    Change,
    Blur,
    Focus,
    Escape,
    Click,
    LoadError,
    LoaderStart,
    NetworksChange,
    Checkout,
    LineItemClick,
    Confirm,
    Cancel,
    ShippingAddressChange,
    ShippingRateChange,
}

impl WidgetEvent {
    /// Every recognized event, in binding order
    pub const ALL: [WidgetEvent; 15] = [
        WidgetEvent::Ready,
        WidgetEvent::Change,
        WidgetEvent::Blur,
        WidgetEvent::Focus,
        WidgetEvent::Escape,
        WidgetEvent::Click,
        WidgetEvent::LoadError,
        WidgetEvent::LoaderStart,
        WidgetEvent::NetworksChange,
        WidgetEvent::Checkout,
        WidgetEvent::LineItemClick,
        WidgetEvent::Confirm,
        WidgetEvent::Cancel,
        WidgetEvent::ShippingAddressChange,
        WidgetEvent::ShippingRateChange,
    ];

    /// Wire name passed to the widget
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetEvent::Ready => "ready",
            WidgetEvent::Change => "change",
            WidgetEvent::Blur => "blur",
            WidgetEvent::Focus => "focus",
            WidgetEvent::Escape => "escape",
            WidgetEvent::Click => "click",
            WidgetEvent::LoadError => "loaderror",
            WidgetEvent::LoaderStart => "loaderstart",
            WidgetEvent::NetworksChange => "networkschange",
            WidgetEvent::Checkout => "checkout",
            WidgetEvent::LineItemClick => "lineitemclick",
            WidgetEvent::Confirm => "confirm",
            WidgetEvent::Cancel => "cancel",
            WidgetEvent::ShippingAddressChange => "shippingaddresschange",
            WidgetEvent::ShippingRateChange => "shippingratechange",
        }
    }

    /// Name of the caller prop carrying the handler, e.g. `onLoadError`
    pub fn prop_name(&self) -> &'static str {
        match self {
            WidgetEvent::Ready => "onReady",
            WidgetEvent::Change => "onChange",
            WidgetEvent::Blur => "onBlur",
            WidgetEvent::Focus => "onFocus",
            WidgetEvent::Escape => "onEscape",
            WidgetEvent::Click => "onClick",
            WidgetEvent::LoadError => "onLoadError",
            WidgetEvent::LoaderStart => "onLoaderStart",
            WidgetEvent::NetworksChange => "onNetworksChange",
            WidgetEvent::Checkout => "onCheckout",
            WidgetEvent::LineItemClick => "onLineItemClick",
            WidgetEvent::Confirm => "onConfirm",
            WidgetEvent::Cancel => "onCancel",
            WidgetEvent::ShippingAddressChange => "onShippingAddressChange",
            WidgetEvent::ShippingRateChange => "onShippingRateChange",
        }
    }

    /// Whether a cart widget mirrors this event into the cart context
    pub fn updates_cart_state(&self) -> bool {
        matches!(
            self,
            WidgetEvent::Ready | WidgetEvent::Change | WidgetEvent::Checkout
        )
    }
}

impl fmt::Display for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized event name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown widget event '{}'", self.0)
    }
}

impl std::error::Error for UnknownEvent {}

impl FromStr for WidgetEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetEvent::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// What a caller handler receives
#[derive(Clone)]
pub enum EventArg {
    /// The payload emitted by the widget
    Payload(Value),
    /// The widget itself (most kinds' `ready`)
    Widget(WidgetHandle),
}

impl EventArg {
    /// The event payload, if this argument carries one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            EventArg::Payload(value) => Some(value),
            EventArg::Widget(_) => None,
        }
    }

    /// The widget, if this argument carries one
    pub fn widget(&self) -> Option<&WidgetHandle> {
        match self {
            EventArg::Payload(_) => None,
            EventArg::Widget(widget) => Some(widget),
        }
    }
}

impl fmt::Debug for EventArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArg::Payload(value) => f.debug_tuple("Payload").field(value).finish(),
            EventArg::Widget(_) => f.write_str("Widget(..)"),
        }
    }
}

/// Caller-supplied event handler
///
/// Callers typically build a fresh closure every render; tether never hands
/// these to the widget directly.
pub type Handler = Rc<dyn Fn(&EventArg)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_wire_names() {
        for event in WidgetEvent::ALL {
            assert_eq!(event.as_str().parse::<WidgetEvent>(), Ok(event));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "hover".parse::<WidgetEvent>(),
            Err(UnknownEvent("hover".to_string()))
        );
    }

    #[test]
    fn test_prop_names() {
        assert_eq!(WidgetEvent::LoadError.prop_name(), "onLoadError");
        assert_eq!(
            WidgetEvent::ShippingRateChange.prop_name(),
            "onShippingRateChange"
        );
    }

    #[test]
    fn test_cart_events() {
        let cart_events: Vec<_> = WidgetEvent::ALL
            .into_iter()
            .filter(|e| e.updates_cart_state())
            .collect();
        assert_eq!(
            cart_events,
            vec![WidgetEvent::Ready, WidgetEvent::Change, WidgetEvent::Checkout]
        );
    }
}
