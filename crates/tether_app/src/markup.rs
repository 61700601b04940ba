//! Container markup
//!
//! Mount points render exactly one container surface and nothing else.

use std::fmt;

/// The single container surface a mount point renders
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerMarkup {
    pub id: Option<String>,
    pub class_name: Option<String>,
}

impl ContainerMarkup {
    pub fn new(id: Option<&str>, class_name: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            class_name: class_name.map(str::to_string),
        }
    }

    /// Render as an HTML `div`, omitting absent attributes
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContainerMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<div")?;
        if let Some(id) = &self.id {
            write!(f, " id=\"{}\"", html_escape::encode_double_quoted_attribute(id))?;
        }
        if let Some(class_name) = &self.class_name {
            write!(
                f,
                " class=\"{}\"",
                html_escape::encode_double_quoted_attribute(class_name)
            )?;
        }
        f.write_str("></div>")
    }
}
