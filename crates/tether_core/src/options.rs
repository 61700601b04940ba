//! Options diffing
//!
//! Widgets are created with a full options mapping and then patched with
//! partial updates. Each render the controller compares the caller's current
//! options with the snapshot from the previous render and sends only what
//! changed.
//!
//! Some keys are fixed at creation time (see [`ImmutableKeySet`]). Changes to
//! those are dropped from the update rather than reported, since resubmitting
//! the same descriptor every render is normal caller behavior.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tether_core::options::{diff, options_from, ImmutableKeySet};
//!
//! let prev = options_from(json!({ "x": 1 }));
//! let next = options_from(json!({ "x": 2, "secret": "a" }));
//! let immutable = ImmutableKeySet::from_keys(["secret"]);
//!
//! let updates = diff(Some(&prev), &next, &immutable).unwrap();
//! assert_eq!(updates, options_from(json!({ "x": 2 })));
//! ```

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

/// Configuration mapping handed to widgets and factories
pub type Options = Map<String, Value>;

/// Key holding the payment-instrument descriptor on an element
pub const PAYMENT_REQUEST_KEY: &str = "paymentRequest";

/// Provider keys fixed once the factory exists
pub const CLIENT_SECRET_KEY: &str = "clientSecret";
pub const FONTS_KEY: &str = "fonts";

/// Convert a JSON value into an options mapping
///
/// Anything other than an object yields an empty mapping.
pub fn options_from(value: Value) -> Options {
    match value {
        Value::Object(map) => map,
        _ => Options::new(),
    }
}

/// Keys that can only be set at creation time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImmutableKeySet {
    keys: FxHashSet<String>,
}

impl ImmutableKeySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from any list of keys
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The default set for elements: the payment-instrument descriptor
    pub fn element_defaults() -> Self {
        Self::from_keys([PAYMENT_REQUEST_KEY])
    }

    /// The default set for providers
    pub fn provider_defaults() -> Self {
        Self::from_keys([CLIENT_SECRET_KEY, FONTS_KEY])
    }

    /// Add a key
    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Check whether a key is immutable
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Compute the minimal update between two option snapshots
///
/// Returns `None` when nothing updatable changed, so callers can skip the
/// widget's `update` entirely. With no previous snapshot (the render that
/// created the widget) there is nothing to patch and the result is `None`.
///
/// Keys removed from `current` are not reported.
pub fn diff(
    previous: Option<&Options>,
    current: &Options,
    immutable: &ImmutableKeySet,
) -> Option<Options> {
    let previous = previous?;
    let mut updates = Options::new();

    for (key, value) in current {
        if previous.get(key) == Some(value) {
            continue;
        }

        if immutable.contains(key) {
            tracing::debug!("dropping change to immutable option '{}'", key);
            continue;
        }

        updates.insert(key.clone(), value.clone());
    }

    if updates.is_empty() {
        None
    } else {
        Some(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(value: Value) -> Options {
        options_from(value)
    }

    #[test]
    fn test_unchanged_is_none() {
        let prev = opts(json!({ "x": 1 }));
        let next = opts(json!({ "x": 1 }));
        assert_eq!(diff(Some(&prev), &next, &ImmutableKeySet::new()), None);
    }

    #[test]
    fn test_immutable_key_dropped() {
        let prev = opts(json!({ "x": 1 }));
        let next = opts(json!({ "x": 2, "secret": "a" }));
        let immutable = ImmutableKeySet::from_keys(["secret"]);
        assert_eq!(
            diff(Some(&prev), &next, &immutable),
            Some(opts(json!({ "x": 2 })))
        );
    }

    #[test]
    fn test_new_key_reported() {
        let prev = Options::new();
        let next = opts(json!({ "y": 5 }));
        assert_eq!(
            diff(Some(&prev), &next, &ImmutableKeySet::new()),
            Some(opts(json!({ "y": 5 })))
        );
    }

    #[test]
    fn test_only_immutable_change_is_none() {
        let prev = opts(json!({ "paymentRequest": { "id": "pr_1" } }));
        let next = opts(json!({ "paymentRequest": { "id": "pr_2" } }));
        assert_eq!(
            diff(Some(&prev), &next, &ImmutableKeySet::element_defaults()),
            None
        );
    }

    #[test]
    fn test_no_previous_snapshot() {
        let next = opts(json!({ "mode": "light" }));
        assert_eq!(diff(None, &next, &ImmutableKeySet::new()), None);
    }

    #[test]
    fn test_nested_values_compare_deeply() {
        let prev = opts(json!({ "style": { "base": { "color": "#000" } } }));
        let same = opts(json!({ "style": { "base": { "color": "#000" } } }));
        let changed = opts(json!({ "style": { "base": { "color": "#fff" } } }));

        assert_eq!(diff(Some(&prev), &same, &ImmutableKeySet::new()), None);
        assert_eq!(
            diff(Some(&prev), &changed, &ImmutableKeySet::new()),
            Some(changed.clone())
        );
    }

    #[test]
    fn test_removed_keys_not_reported() {
        let prev = opts(json!({ "a": 1, "b": 2 }));
        let next = opts(json!({ "a": 1 }));
        assert_eq!(diff(Some(&prev), &next, &ImmutableKeySet::new()), None);
    }

    #[test]
    fn test_non_object_options_are_empty() {
        assert!(options_from(json!([1, 2, 3])).is_empty());
        assert!(options_from(Value::Null).is_empty());
    }
}
