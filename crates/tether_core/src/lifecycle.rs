//! Widget lifecycle controller
//!
//! Drives one widget instance through its lifetime from inside the host's
//! render loop:
//!
//! ```text
//!                 container + factory ready
//! Uninitialized ─────────────────────────────► Created ──► Mounted
//!       │                                                     │
//!       │ teardown                                   teardown │
//!       ▼                                                     ▼
//!   Destroyed ◄───────────────────────────────────────────────┘
//!       │
//!       │ begin_lifetime (host re-ran setup after cleanup)
//!       ▼
//! Uninitialized
//! ```
//!
//! The render loop may evaluate setup more than once per logical mount. The
//! controller's state is updated synchronously inside [`LifecycleController::render`],
//! so a duplicate evaluation observes the widget created by the first one and
//! performs no further side effects.
//!
//! Creation is never retried by a timer. If the container or factory is
//! missing, the render is a no-op and creation happens on whichever later
//! render sees both.

use tracing::{debug, trace};

use crate::class_name;
use crate::container::{ContainerBinding, ContainerHandle};
use crate::dispatch::{required_events, EventBindingRegistry};
use crate::events::WidgetEvent;
use crate::options::{self, ImmutableKeySet, Options};
use crate::props::ElementProps;
use crate::store::CartContext;
use crate::widget::{FactoryHandle, WidgetHandle, WidgetKind};

/// Where a controller is in its lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Waiting for container and factory
    Uninitialized,
    /// Widget created, not yet mounted
    Created,
    /// Widget mounted and events bound
    Mounted,
    /// Torn down; renders are ignored until a new lifetime begins
    Destroyed,
}

/// What a single render did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Still waiting for a container and/or a factory
    Waiting {
        has_container: bool,
        has_factory: bool,
    },
    /// The widget was created and mounted during this render
    Created,
    /// The widget already existed; `updated` is true if `update` was called
    Synced { updated: bool },
    /// The controller is torn down
    TornDown,
}

/// Creates, updates, and destroys one widget for a mount point
pub struct LifecycleController {
    kind: WidgetKind,
    immutable_keys: ImmutableKeySet,
    state: LifecycleState,
    widget: Option<WidgetHandle>,
    container: ContainerBinding,
    registry: EventBindingRegistry,
    /// Options from the previous render, replaced wholesale each cycle
    snapshot: Option<Options>,
    /// Class string last applied to the container
    applied_class: Option<String>,
    cart: Option<CartContext>,
    lifetime: u32,
}

impl LifecycleController {
    /// Create a controller for a widget kind
    pub fn new(kind: WidgetKind, immutable_keys: ImmutableKeySet) -> Self {
        Self {
            kind,
            immutable_keys,
            state: LifecycleState::Uninitialized,
            widget: None,
            container: ContainerBinding::new(),
            registry: EventBindingRegistry::new(),
            snapshot: None,
            applied_class: None,
            cart: None,
            lifetime: 0,
        }
    }

    /// Share cart state through the given context (cart kind only)
    pub fn with_cart(mut self, cart: CartContext) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The live widget, if one exists in this lifetime
    pub fn widget(&self) -> Option<&WidgetHandle> {
        self.widget.as_ref()
    }

    /// Number of completed lifetimes (teardown followed by a new setup)
    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    pub fn registry(&self) -> &EventBindingRegistry {
        &self.registry
    }

    pub fn container(&self) -> &ContainerBinding {
        &self.container
    }

    /// Run one render cycle
    ///
    /// Order within a render: refresh caller handlers, create and mount if
    /// newly ready, otherwise apply the options diff, then reconcile classes.
    pub fn render(
        &mut self,
        factory: Option<&FactoryHandle>,
        container: Option<ContainerHandle>,
        props: &ElementProps,
    ) -> RenderOutcome {
        if self.state == LifecycleState::Destroyed {
            trace!("render ignored: {} controller is torn down", self.kind);
            return RenderOutcome::TornDown;
        }

        self.container.assign(container);

        for event in WidgetEvent::ALL {
            self.registry.set_handler(event, props.handler(event).cloned());
        }

        let outcome = if self.widget.is_none() {
            self.try_create(factory, &props.options)
        } else {
            self.bind_new_handlers();
            let updated = self.apply_options(&props.options);
            RenderOutcome::Synced { updated }
        };

        self.reconcile_classes(props.class_name.as_deref());
        self.snapshot = Some(props.options.clone());

        outcome
    }

    fn try_create(&mut self, factory: Option<&FactoryHandle>, options: &Options) -> RenderOutcome {
        let container = self.container.get().cloned();
        let (Some(factory), Some(container)) = (factory, container) else {
            return RenderOutcome::Waiting {
                has_container: self.container.is_available(),
                has_factory: factory.is_some(),
            };
        };

        let widget = factory.create(&self.kind, options);
        // Stored before anything else can observe the controller
        self.widget = Some(widget.clone());
        self.state = LifecycleState::Created;
        debug!("created {} widget", self.kind);

        if self.kind.is_cart() {
            if let Some(cart) = &self.cart {
                cart.set_element(widget.clone());
            }
        }

        widget.mount(&container);
        self.state = LifecycleState::Mounted;
        debug!("mounted {} widget", self.kind);

        let required = required_events(&self.kind);
        for event in WidgetEvent::ALL {
            if required.contains(&event) || self.registry.has_handler(event) {
                self.registry
                    .bind(&widget, &self.kind, event, self.cart.as_ref());
            }
        }

        RenderOutcome::Created
    }

    /// Bind dispatchers for events whose first handler arrived after mount
    fn bind_new_handlers(&mut self) {
        let Some(widget) = self.widget.clone() else {
            return;
        };
        for event in WidgetEvent::ALL {
            if self.registry.has_handler(event) && !self.registry.is_bound(event) {
                self.registry
                    .bind(&widget, &self.kind, event, self.cart.as_ref());
            }
        }
    }

    fn apply_options(&mut self, options: &Options) -> bool {
        let Some(widget) = &self.widget else {
            return false;
        };

        match options::diff(self.snapshot.as_ref(), options, &self.immutable_keys) {
            Some(updates) => {
                trace!("updating {} widget with {} option(s)", self.kind, updates.len());
                widget.update(&updates);
                true
            }
            None => false,
        }
    }

    /// Caller classes go on the container only once a widget is mounted on it
    fn reconcile_classes(&mut self, class_name: Option<&str>) {
        if self.state != LifecycleState::Mounted {
            return;
        }
        let Some(container) = self.container.get() else {
            return;
        };
        class_name::reconcile(
            Some(container.as_ref()),
            self.applied_class.as_deref(),
            class_name,
        );
        self.applied_class = class_name.map(str::to_string);
    }

    /// Tear the widget down
    ///
    /// Safe to call any number of times; `destroy` runs at most once per
    /// lifetime. Errors from the widget are logged and discarded. Returns
    /// `true` if this call invoked `destroy`.
    pub fn teardown(&mut self) -> bool {
        if self.state == LifecycleState::Destroyed {
            return false;
        }
        self.state = LifecycleState::Destroyed;

        let mut destroyed = false;
        if let Some(widget) = self.widget.take() {
            if widget.can_destroy() {
                destroyed = true;
                match widget.destroy() {
                    Ok(()) => debug!("destroyed {} widget", self.kind),
                    Err(err) => debug!("ignoring {} widget destroy failure: {}", self.kind, err),
                }
            } else {
                debug!("{} widget has no destroy; dropping reference", self.kind);
            }

            if self.kind.is_cart() {
                if let Some(cart) = &self.cart {
                    cart.clear_element();
                }
            }
        }

        // Caller tokens go with the widget; the container may be reused
        if let Some(container) = self.container.get() {
            class_name::reconcile(Some(container.as_ref()), self.applied_class.as_deref(), None);
        }

        self.registry.release();
        self.container.clear();
        self.snapshot = None;
        self.applied_class = None;
        destroyed
    }

    /// Start a fresh lifetime after teardown
    ///
    /// Hosts call this when they re-run setup for the same logical component
    /// (for example a strict double-commit: setup, cleanup, setup). No-op
    /// while the current lifetime is still live.
    pub fn begin_lifetime(&mut self) {
        if self.state != LifecycleState::Destroyed {
            return;
        }
        self.state = LifecycleState::Uninitialized;
        self.lifetime += 1;
        trace!("{} controller starting lifetime {}", self.kind, self.lifetime);
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        self.teardown();
    }
}
