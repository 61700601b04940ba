//! Interactive mount point
//!
//! An [`Element`] is what a host component holds for one widget: it checks
//! its provider context up front, then forwards every render to a
//! [`LifecycleController`] together with the provider's current factory.

use tether_core::{
    ContainerHandle, ElementProps, LifecycleController, LifecycleState, RenderOutcome, Result,
    WidgetHandle, WidgetKind,
};

use crate::context::{require_context, ElementsContext};
use crate::markup::ContainerMarkup;

/// Mount point for one widget kind
pub struct Element {
    context: ElementsContext,
    controller: LifecycleController,
}

impl Element {
    /// Create a mount point under a provider
    ///
    /// Fails before any widget interaction when `context` is `None`.
    pub fn new(kind: WidgetKind, context: Option<&ElementsContext>) -> Result<Self> {
        let use_case = format!("mounts <{}>", kind.display_name());
        let context = require_context(context, &use_case)?.clone();

        let controller = LifecycleController::new(kind, context.config().element_keys())
            .with_cart(context.cart().clone());

        Ok(Self {
            context,
            controller,
        })
    }

    pub fn kind(&self) -> &WidgetKind {
        self.controller.kind()
    }

    /// Run one render cycle
    ///
    /// `container` is the host surface rendered for this mount point, or
    /// `None` if the host has not attached it yet.
    pub fn render(&mut self, props: &ElementProps, container: Option<ContainerHandle>) -> RenderOutcome {
        let factory = self.context.factory();
        self.controller.render(factory.as_ref(), container, props)
    }

    /// Markup for the container surface
    pub fn markup(&self, props: &ElementProps) -> ContainerMarkup {
        ContainerMarkup::new(props.id.as_deref(), props.class_name.as_deref())
    }

    /// Host cleanup; destroys the widget at most once
    pub fn unmount(&mut self) -> bool {
        self.controller.teardown()
    }

    /// Host re-ran setup after cleanup
    pub fn remount(&mut self) {
        self.controller.begin_lifetime();
    }

    pub fn widget(&self) -> Option<&WidgetHandle> {
        self.controller.widget()
    }

    pub fn state(&self) -> LifecycleState {
        self.controller.state()
    }

    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }
}
