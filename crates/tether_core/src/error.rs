//! Error types for tether_core

use thiserror::Error;

/// Errors surfaced to the host render framework
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TetherError {
    /// A mount point was rendered outside of its required provider
    #[error(
        "Could not find {provider} context; You need to wrap the part of your app that {mount_point} in an <{provider}> provider."
    )]
    ContextMissing {
        /// What the caller was doing, e.g. `mounts <CardElement>`
        mount_point: String,
        /// Name of the provider that was expected
        provider: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TetherError {
    /// Build a context-misuse error for the given use case
    pub fn context_missing(mount_point: impl Into<String>, provider: &'static str) -> Self {
        TetherError::ContextMissing {
            mount_point: mount_point.into(),
            provider,
        }
    }
}

/// Failures reported by an external widget instance
///
/// The lifecycle controller never propagates these; they exist so widget
/// implementations can report a failed teardown without panicking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The widget failed to tear itself down
    #[error("Widget destroy failed: {0}")]
    Destroy(String),
}

/// Result type for tether operations
pub type Result<T> = std::result::Result<T, TetherError>;
