//! Provider context
//!
//! A provider hands its mount points a shared [`ElementsContext`]: the widget
//! factory (once available), the cart context, and configuration. Contexts
//! are passed explicitly; a mount point given no context fails fast with a
//! [`TetherError::ContextMissing`] naming what it was trying to do.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tether_core::{
    CartContext, ControllerConfig, FactoryHandle, Result, TetherError, WidgetHandle,
};

/// Which provider created a context
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// Classic elements provider
    Elements,
    /// Checkout-SDK provider
    Checkout,
}

impl ProviderKind {
    /// Name used in context-misuse diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Elements => "Elements",
            ProviderKind::Checkout => "CheckoutProvider",
        }
    }
}

/// Context shared by a provider and every mount point under it
///
/// Cheap to clone; clones observe the same factory.
#[derive(Clone)]
pub struct ElementsContext {
    inner: Rc<ContextInner>,
}

struct ContextInner {
    kind: ProviderKind,
    factory: RefCell<Option<FactoryHandle>>,
    cart: CartContext,
    config: ControllerConfig,
}

impl ElementsContext {
    pub(crate) fn new(kind: ProviderKind, config: ControllerConfig) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                kind,
                factory: RefCell::new(None),
                cart: CartContext::new(),
                config,
            }),
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.inner.kind
    }

    /// The widget factory, once the provider has one
    pub fn factory(&self) -> Option<FactoryHandle> {
        self.inner.factory.borrow().clone()
    }

    pub(crate) fn install(&self, factory: FactoryHandle) {
        *self.inner.factory.borrow_mut() = Some(factory);
    }

    pub fn cart(&self) -> &CartContext {
        &self.inner.cart
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }
}

/// Resolve a context or fail with a descriptive error
///
/// `use_case` describes the caller, e.g. `mounts <CardElement>`.
pub fn require_context<'a>(
    context: Option<&'a ElementsContext>,
    use_case: &str,
) -> Result<&'a ElementsContext> {
    context.ok_or_else(|| TetherError::context_missing(use_case, ProviderKind::Elements.name()))
}

/// The provider's widget factory, `None` while it is still loading
pub fn use_elements(context: Option<&ElementsContext>) -> Result<Option<FactoryHandle>> {
    Ok(require_context(context, "calls use_elements()")?.factory())
}

/// The mounted cart widget, if any
pub fn use_cart_element(context: Option<&ElementsContext>) -> Result<Option<WidgetHandle>> {
    Ok(require_context(context, "calls use_cart_element()")?
        .cart()
        .element())
}

/// The latest cart state published by the cart widget
pub fn use_cart_state(context: Option<&ElementsContext>) -> Result<Option<Value>> {
    Ok(require_context(context, "calls use_cart_state()")?
        .cart()
        .state())
}
