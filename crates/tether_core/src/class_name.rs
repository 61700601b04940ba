//! Class name reconciliation
//!
//! The caller owns the class string it passes in; the widget may add its own
//! tokens to the same container for internal styling. Reconciliation only
//! touches tokens that appear in the caller's previous or current string, so
//! widget-owned tokens survive every render.
//!
//! ```text
//! previous: "a b"        current: "b c"
//!   add    {b, c}   (adding b again is a no-op)
//!   remove {a}
//!   widget-owned tokens: untouched
//! ```

use smallvec::SmallVec;

use crate::container::Container;

/// Split a class string on whitespace, dropping empty tokens
pub fn tokenize(class_name: Option<&str>) -> impl Iterator<Item = &str> {
    class_name.unwrap_or_default().split_whitespace()
}

/// Token changes between two class strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDelta {
    /// Every token in the current string
    pub add: SmallVec<[String; 4]>,
    /// Tokens in the previous string but not the current one
    pub remove: SmallVec<[String; 4]>,
}

impl ClassDelta {
    /// Compute the delta between two caller class strings
    pub fn between(previous: Option<&str>, current: Option<&str>) -> Self {
        let mut add: SmallVec<[String; 4]> = SmallVec::new();
        for token in tokenize(current) {
            if !add.iter().any(|t| t == token) {
                add.push(token.to_string());
            }
        }

        let mut remove: SmallVec<[String; 4]> = SmallVec::new();
        for token in tokenize(previous) {
            if !add.iter().any(|t| t == token) && !remove.iter().any(|t| t == token) {
                remove.push(token.to_string());
            }
        }

        Self { add, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Apply caller class changes to a container
///
/// No-op when the container is not available yet.
pub fn reconcile(
    container: Option<&dyn Container>,
    previous: Option<&str>,
    current: Option<&str>,
) -> ClassDelta {
    let Some(container) = container else {
        return ClassDelta::default();
    };

    let delta = ClassDelta::between(previous, current);
    for token in &delta.add {
        container.add_class(token);
    }
    for token in &delta.remove {
        container.remove_class(token);
    }

    if !delta.remove.is_empty() {
        tracing::trace!("class reconcile: +{:?} -{:?}", delta.add, delta.remove);
    }

    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct ClassList {
        tokens: RefCell<Vec<String>>,
    }

    impl Container for ClassList {
        fn add_class(&self, token: &str) {
            let mut tokens = self.tokens.borrow_mut();
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }

        fn remove_class(&self, token: &str) {
            self.tokens.borrow_mut().retain(|t| t != token);
        }

        fn has_class(&self, token: &str) -> bool {
            self.tokens.borrow().iter().any(|t| t == token)
        }
    }

    #[test]
    fn test_tokenize_drops_empty_tokens() {
        let tokens: Vec<_> = tokenize(Some("  a \t b\n\nc  ")).collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
        assert_eq!(tokenize(None).count(), 0);
        assert_eq!(tokenize(Some("   ")).count(), 0);
    }

    #[test]
    fn test_reconcile_add_and_remove() {
        let list = ClassList::default();
        reconcile(Some(&list), None, Some("a b"));
        assert!(list.has_class("a") && list.has_class("b"));

        let delta = reconcile(Some(&list), Some("a b"), Some("b c"));
        assert!(!list.has_class("a"));
        assert!(list.has_class("b"));
        assert!(list.has_class("c"));
        assert_eq!(delta.remove.as_slice(), ["a".to_string()]);
    }

    #[test]
    fn test_widget_tokens_survive() {
        let list = ClassList::default();
        reconcile(Some(&list), None, Some("mine"));
        list.add_class("widget--focus");

        reconcile(Some(&list), Some("mine"), Some("other"));
        reconcile(Some(&list), Some("other"), None);

        assert!(list.has_class("widget--focus"));
        assert!(!list.has_class("mine"));
        assert!(!list.has_class("other"));
    }

    #[test]
    fn test_reconcile_without_container() {
        let delta = reconcile(None, Some("a"), Some("b"));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_duplicate_tokens() {
        let delta = ClassDelta::between(Some("a a b"), Some("b b"));
        assert_eq!(delta.add.as_slice(), ["b".to_string()]);
        assert_eq!(delta.remove.as_slice(), ["a".to_string()]);
    }
}
