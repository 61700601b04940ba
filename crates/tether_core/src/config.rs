//! Controller configuration
//!
//! Defaults cover the documented behavior; a host can override them in
//! code or load them from TOML:
//!
//! ```toml
//! element_immutable_keys = ["paymentRequest", "mode"]
//! provider_immutable_keys = ["clientSecret", "fonts"]
//! log_filter = "tether_core=debug"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TetherError};
use crate::options::{ImmutableKeySet, CLIENT_SECRET_KEY, FONTS_KEY, PAYMENT_REQUEST_KEY};

/// Configuration shared by a provider and the elements mounted under it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Element option keys fixed at creation time
    pub element_immutable_keys: Vec<String>,
    /// Provider option keys fixed once the factory exists
    pub provider_immutable_keys: Vec<String>,
    /// Default `tracing` filter directive when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            element_immutable_keys: vec![PAYMENT_REQUEST_KEY.to_string()],
            provider_immutable_keys: vec![CLIENT_SECRET_KEY.to_string(), FONTS_KEY.to_string()],
            log_filter: "info".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parse a configuration from TOML; missing fields keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TetherError::Config(e.to_string()))
    }

    /// Immutable keys applied to element option diffs
    pub fn element_keys(&self) -> ImmutableKeySet {
        ImmutableKeySet::from_keys(self.element_immutable_keys.iter().cloned())
    }

    /// Immutable keys applied to provider option diffs
    pub fn provider_keys(&self) -> ImmutableKeySet {
        ImmutableKeySet::from_keys(self.provider_immutable_keys.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert!(config.element_keys().contains("paymentRequest"));
        assert!(config.provider_keys().contains("clientSecret"));
        assert!(config.provider_keys().contains("fonts"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ControllerConfig::from_toml_str(
            r#"element_immutable_keys = ["paymentRequest", "mode"]"#,
        )
        .unwrap();
        assert!(config.element_keys().contains("mode"));
        assert_eq!(
            config.provider_immutable_keys,
            ControllerConfig::default().provider_immutable_keys
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = ControllerConfig::from_toml_str("log_filter = 3").unwrap_err();
        assert!(matches!(err, TetherError::Config(_)));
    }
}
