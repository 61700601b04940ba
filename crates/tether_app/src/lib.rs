//! Tether App
//!
//! Host-facing surface for binding external widgets into a component tree:
//! providers that own the widget factory, mount points that drive one widget
//! each, and a server variant that renders only the container.
//!
//! # Example
//!
//! ```ignore
//! use tether_app::prelude::*;
//!
//! fn main() -> Result<()> {
//!     init_logging("info");
//!
//!     let mut provider = ElementsProvider::new();
//!     let factory = FactoryProp::Ready(load_factory());
//!     provider.render(&factory, &Options::new());
//!
//!     let mut card = Element::new(WidgetKind::Card, Some(provider.context()))?;
//!     let props = ElementProps::new()
//!         .id("card")
//!         .class_name("field")
//!         .on_change(|event| println!("{:?}", event.payload()));
//!
//!     card.render(&props, Some(host_container()));
//!     card.unmount();
//!     Ok(())
//! }
//! ```

mod context;
mod element;
mod logging;
mod markup;
mod provider;
mod server;


pub use context::{
    require_context, use_cart_element, use_cart_state, use_elements, ElementsContext,
    ProviderKind,
};
pub use element::Element;
pub use logging::init_logging;
pub use markup::ContainerMarkup;
pub use provider::{CheckoutProvider, ElementsProvider, FactoryProp, PendingFactory};
pub use server::ServerElement;

// Re-export core API for convenience
pub use tether_core::{
    ControllerConfig, ElementProps, EventArg, Options, Result, TetherError, WidgetEvent,
    WidgetKind,
};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::context::{
        use_cart_element, use_cart_state, use_elements, ElementsContext, ProviderKind,
    };
    pub use crate::element::Element;
    pub use crate::logging::init_logging;
    pub use crate::markup::ContainerMarkup;
    pub use crate::provider::{CheckoutProvider, ElementsProvider, FactoryProp, PendingFactory};
    pub use crate::server::ServerElement;

    // Core types
    pub use tether_core::{
        Container, ContainerHandle, ControllerConfig, ElementProps, EventArg, FactoryHandle,
        Options, RenderOutcome, Result, TetherError, WidgetEvent, WidgetFactory, WidgetHandle,
        WidgetInstance, WidgetKind,
    };
}
