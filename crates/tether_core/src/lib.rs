//! Tether Core
//!
//! Binds one externally-provided, stateful widget to a host-managed container
//! and keeps it in sync across re-renders:
//!
//! - **Lifecycle**: create and mount exactly once when container and factory
//!   are both ready, destroy exactly once on teardown
//! - **Options diffing**: minimal `update` payloads, immutable keys dropped
//! - **Stable dispatch**: one dispatcher per event per widget; caller handler
//!   churn never reaches the widget
//! - **Class reconciliation**: caller-owned tokens only, widget tokens untouched
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use serde_json::json;
//! use tether_core::options::options_from;
//! use tether_core::testing::{RecordingFactory, TestContainer};
//! use tether_core::{ElementProps, FactoryHandle, ImmutableKeySet, LifecycleController, WidgetKind};
//!
//! let factory: FactoryHandle = Rc::new(RecordingFactory::new());
//! let container = Rc::new(TestContainer::new());
//! let mut controller = LifecycleController::new(WidgetKind::Card, ImmutableKeySet::element_defaults());
//!
//! let props = ElementProps::new()
//!     .class_name("field")
//!     .options(options_from(json!({ "hidePostalCode": true })))
//!     .on_change(|event| println!("change: {:?}", event));
//!
//! // Render as often as the host likes; the widget is created once
//! controller.render(Some(&factory), Some(container.clone()), &props);
//! controller.render(Some(&factory), Some(container), &props);
//!
//! controller.teardown();
//! ```

pub mod class_name;
pub mod config;
pub mod container;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod options;
pub mod props;
pub mod store;
pub mod widget;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use class_name::{reconcile, ClassDelta};
pub use config::ControllerConfig;
pub use container::{Container, ContainerBinding, ContainerHandle};
pub use dispatch::{CallbackSlot, Dispatcher, EventBindingRegistry};
pub use error::{Result, TetherError, WidgetError};
pub use events::{EventArg, Handler, WidgetEvent};
pub use lifecycle::{LifecycleController, LifecycleState, RenderOutcome};
pub use options::{diff, ImmutableKeySet, Options};
pub use props::ElementProps;
pub use store::{CartContext, Store, SubscriptionHandle};
pub use widget::{FactoryHandle, WidgetFactory, WidgetHandle, WidgetInstance, WidgetKind};
