//! Providers
//!
//! An [`ElementsProvider`] owns the [`ElementsContext`] its mount points
//! read. The host passes it a [`FactoryProp`] on every render; the factory
//! may be missing, still loading, or ready. Loading is modelled as a
//! [`PendingFactory`] cell that the host resolves whenever its load
//! completes. The provider looks at the cell on each render and never polls
//! on its own.

use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{diff, ControllerConfig, FactoryHandle, ImmutableKeySet, Options};
use tracing::{debug, trace, warn};

use crate::context::{ElementsContext, ProviderKind};

/// One-shot cell for a factory that is still loading
///
/// Clones share the same cell.
#[derive(Clone, Default)]
pub struct PendingFactory {
    cell: Rc<RefCell<Option<FactoryHandle>>>,
}

impl PendingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete the load; later calls are ignored
    pub fn resolve(&self, factory: FactoryHandle) {
        let mut cell = self.cell.borrow_mut();
        if cell.is_none() {
            *cell = Some(factory);
        } else {
            trace!("pending factory already resolved");
        }
    }

    pub fn get(&self) -> Option<FactoryHandle> {
        self.cell.borrow().clone()
    }
}

/// The factory a host hands to a provider
#[derive(Clone, Default)]
pub enum FactoryProp {
    /// No factory; mount points wait
    #[default]
    Empty,
    /// Loading; adopted on the first render after it resolves
    Pending(PendingFactory),
    Ready(FactoryHandle),
}

impl FactoryProp {
    fn current(&self) -> Option<FactoryHandle> {
        match self {
            FactoryProp::Empty => None,
            FactoryProp::Pending(pending) => pending.get(),
            FactoryProp::Ready(factory) => Some(factory.clone()),
        }
    }
}

impl From<FactoryHandle> for FactoryProp {
    fn from(factory: FactoryHandle) -> Self {
        FactoryProp::Ready(factory)
    }
}

impl From<PendingFactory> for FactoryProp {
    fn from(pending: PendingFactory) -> Self {
        FactoryProp::Pending(pending)
    }
}

/// Provider for the classic elements path
pub struct ElementsProvider {
    context: ElementsContext,
    immutable_keys: ImmutableKeySet,
    /// Provider options from the previous render
    snapshot: Option<Options>,
}

impl ElementsProvider {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self::build(ProviderKind::Elements, config)
    }

    fn build(kind: ProviderKind, config: ControllerConfig) -> Self {
        let immutable_keys = config.provider_keys();
        Self {
            context: ElementsContext::new(kind, config),
            immutable_keys,
            snapshot: None,
        }
    }

    /// Context to hand to mount points under this provider
    pub fn context(&self) -> &ElementsContext {
        &self.context
    }

    /// Run one render cycle
    ///
    /// Returns `true` once a factory is available.
    pub fn render(&mut self, prop: &FactoryProp, options: &Options) -> bool {
        let incoming = prop.current();

        match (self.context.factory(), incoming) {
            (None, Some(factory)) => {
                debug!("{:?} provider adopted widget factory", self.context.provider_kind());
                self.context.install(factory);
                // Options at adoption time are the factory's creation options
                self.snapshot = Some(options.clone());
                return true;
            }
            (Some(current), Some(incoming)) if !std::ptr::addr_eq(
                Rc::as_ptr(&current),
                Rc::as_ptr(&incoming),
            ) =>
            {
                warn!("Unsupported prop change: the widget factory cannot change after it is set");
            }
            _ => {}
        }

        let Some(factory) = self.context.factory() else {
            return false;
        };

        if let Some(updates) = diff(self.snapshot.as_ref(), options, &self.immutable_keys) {
            trace!("updating factory with {} option(s)", updates.len());
            factory.update(&updates);
        }
        self.snapshot = Some(options.clone());
        true
    }
}

impl Default for ElementsProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Provider for the checkout-SDK path
///
/// Same context shape and event coverage as [`ElementsProvider`].
pub struct CheckoutProvider {
    inner: ElementsProvider,
}

impl CheckoutProvider {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        Self {
            inner: ElementsProvider::build(ProviderKind::Checkout, config),
        }
    }

    pub fn context(&self) -> &ElementsContext {
        self.inner.context()
    }

    pub fn render(&mut self, prop: &FactoryProp, options: &Options) -> bool {
        self.inner.render(prop, options)
    }
}

impl Default for CheckoutProvider {
    fn default() -> Self {
        Self::new()
    }
}
