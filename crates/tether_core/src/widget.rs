//! External widget capabilities
//!
//! The widget library is a black box. Tether only ever talks to it through
//! the two traits in this module:
//!
//! ```text
//! WidgetFactory::create(kind, options) ──► WidgetInstance
//!                                           ├─ mount(container)
//!                                           ├─ update(partial options)
//!                                           ├─ on / off(event, dispatcher)
//!                                           └─ destroy()
//! ```
//!
//! Widget kinds are tagged variants handed to the factory, never subclasses.

use std::fmt;
use std::rc::Rc;

use crate::container::ContainerHandle;
use crate::dispatch::Dispatcher;
use crate::error::WidgetError;
use crate::events::WidgetEvent;
use crate::options::Options;

/// Shared handle to a created widget instance
///
/// Uses Rc since the render loop is single-threaded.
pub type WidgetHandle = Rc<dyn WidgetInstance>;

/// Shared handle to a widget factory supplied by a provider
pub type FactoryHandle = Rc<dyn WidgetFactory>;

/// A live widget created by a [`WidgetFactory`]
pub trait WidgetInstance {
    /// Attach the widget to a container surface
    fn mount(&self, container: &ContainerHandle);

    /// Apply a partial options update
    fn update(&self, options: &Options);

    /// Subscribe a dispatcher to an event
    fn on(&self, event: WidgetEvent, dispatcher: Dispatcher);

    /// Unsubscribe a previously registered dispatcher
    fn off(&self, event: WidgetEvent, dispatcher: &Dispatcher);

    /// Tear the widget down. May fail; callers must tolerate failure.
    fn destroy(&self) -> Result<(), WidgetError>;

    /// Whether `destroy` is callable on this instance
    fn can_destroy(&self) -> bool {
        true
    }
}

/// Creates widgets of a given kind
pub trait WidgetFactory {
    /// Create a new widget instance
    fn create(&self, kind: &WidgetKind, options: &Options) -> WidgetHandle;

    /// Apply provider-level option changes
    fn update(&self, _options: &Options) {}
}

/// Widget kinds understood by the factory
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Card,
    CardNumber,
    CardExpiry,
    CardCvc,
    Iban,
    AuBankAccount,
    PaymentRequestButton,
    LinkAuthentication,
    Payment,
    ExpressCheckout,
    Address,
    ShippingAddress,
    Cart,
    PaymentMethodMessaging,
    AffirmMessage,
    AfterpayClearpayMessage,
    /// Any kind tether has no built-in name for
    Custom(String),
}

impl WidgetKind {
    /// Name passed to the factory's `create`
    pub fn wire_name(&self) -> &str {
        match self {
            WidgetKind::Card => "card",
            WidgetKind::CardNumber => "cardNumber",
            WidgetKind::CardExpiry => "cardExpiry",
            WidgetKind::CardCvc => "cardCvc",
            WidgetKind::Iban => "iban",
            WidgetKind::AuBankAccount => "auBankAccount",
            WidgetKind::PaymentRequestButton => "paymentRequestButton",
            WidgetKind::LinkAuthentication => "linkAuthentication",
            WidgetKind::Payment => "payment",
            WidgetKind::ExpressCheckout => "expressCheckout",
            WidgetKind::Address => "address",
            WidgetKind::ShippingAddress => "shippingAddress",
            WidgetKind::Cart => "cart",
            WidgetKind::PaymentMethodMessaging => "paymentMethodMessaging",
            WidgetKind::AffirmMessage => "affirmMessage",
            WidgetKind::AfterpayClearpayMessage => "afterpayClearpayMessage",
            WidgetKind::Custom(name) => name,
        }
    }

    /// Parse a wire name, falling back to [`WidgetKind::Custom`]
    pub fn from_wire_name(name: &str) -> Self {
        match name {
            "card" => WidgetKind::Card,
            "cardNumber" => WidgetKind::CardNumber,
            "cardExpiry" => WidgetKind::CardExpiry,
            "cardCvc" => WidgetKind::CardCvc,
            "iban" => WidgetKind::Iban,
            "auBankAccount" => WidgetKind::AuBankAccount,
            "paymentRequestButton" => WidgetKind::PaymentRequestButton,
            "linkAuthentication" => WidgetKind::LinkAuthentication,
            "payment" => WidgetKind::Payment,
            "expressCheckout" => WidgetKind::ExpressCheckout,
            "address" => WidgetKind::Address,
            "shippingAddress" => WidgetKind::ShippingAddress,
            "cart" => WidgetKind::Cart,
            "paymentMethodMessaging" => WidgetKind::PaymentMethodMessaging,
            "affirmMessage" => WidgetKind::AffirmMessage,
            "afterpayClearpayMessage" => WidgetKind::AfterpayClearpayMessage,
            other => WidgetKind::Custom(other.to_string()),
        }
    }

    /// Component-style name used in diagnostics, e.g. `CardNumberElement`
    pub fn display_name(&self) -> String {
        let wire = self.wire_name();
        let mut chars = wire.chars();
        match chars.next() {
            Some(first) => format!("{}{}Element", first.to_ascii_uppercase(), chars.as_str()),
            None => "Element".to_string(),
        }
    }

    /// Whether this kind shares its state with the cart context
    pub fn is_cart(&self) -> bool {
        matches!(self, WidgetKind::Cart)
    }

    /// Whether the `ready` handler receives the event payload rather than
    /// the widget itself
    pub fn ready_passes_payload(&self) -> bool {
        matches!(self, WidgetKind::ExpressCheckout | WidgetKind::Cart)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_round_trips_known_kinds() {
        for kind in [
            WidgetKind::Card,
            WidgetKind::ExpressCheckout,
            WidgetKind::Cart,
            WidgetKind::AfterpayClearpayMessage,
        ] {
            assert_eq!(WidgetKind::from_wire_name(kind.wire_name()), kind);
        }
    }

    #[test]
    fn test_unknown_wire_name_is_custom() {
        let kind = WidgetKind::from_wire_name("issuingCardNumberDisplay");
        assert_eq!(
            kind,
            WidgetKind::Custom("issuingCardNumberDisplay".to_string())
        );
        assert_eq!(kind.wire_name(), "issuingCardNumberDisplay");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(WidgetKind::Card.display_name(), "CardElement");
        assert_eq!(WidgetKind::CardNumber.display_name(), "CardNumberElement");
        assert_eq!(
            WidgetKind::PaymentRequestButton.display_name(),
            "PaymentRequestButtonElement"
        );
    }

    #[test]
    fn test_ready_payload_rule() {
        assert!(WidgetKind::ExpressCheckout.ready_passes_payload());
        assert!(WidgetKind::Cart.ready_passes_payload());
        assert!(!WidgetKind::Card.ready_passes_payload());
        assert!(!WidgetKind::Payment.ready_passes_payload());
    }
}
