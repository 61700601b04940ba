//! Server rendering variant
//!
//! Renders only the container surface. There is no widget to talk to, but
//! the provider context is still required so misuse surfaces on the server
//! too.

use tether_core::{ElementProps, Result, WidgetKind};

use crate::context::{require_context, ElementsContext};
use crate::markup::ContainerMarkup;

pub struct ServerElement;

impl ServerElement {
    pub fn render(
        kind: &WidgetKind,
        context: Option<&ElementsContext>,
        props: &ElementProps,
    ) -> Result<ContainerMarkup> {
        require_context(context, &format!("mounts <{}>", kind.display_name()))?;
        Ok(ContainerMarkup::new(
            props.id.as_deref(),
            props.class_name.as_deref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ElementsProvider;

    #[test]
    fn test_renders_container_only() {
        let provider = ElementsProvider::new();
        let props = ElementProps::new().id("pay").class_name("field wide");
        let markup = ServerElement::render(&WidgetKind::Payment, Some(provider.context()), &props)
            .unwrap();
        assert_eq!(markup.to_html(), "<div id=\"pay\" class=\"field wide\"></div>");
    }

    #[test]
    fn test_fails_without_context() {
        let err = ServerElement::render(&WidgetKind::Iban, None, &ElementProps::new()).unwrap_err();
        assert!(err.to_string().contains("mounts <IbanElement>"));
    }
}
