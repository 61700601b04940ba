//! Host container surfaces
//!
//! The render framework owns the surface a widget is mounted into. Tether
//! only observes it: the surface may be replaced by a new object between
//! renders while still being the same logical mount point.

use std::rc::Rc;

/// A mountable surface provided by the host
///
/// Methods take `&self`; hosts back their class list with interior
/// mutability, the way a DOM node's class list is mutated through a shared
/// reference.
pub trait Container {
    /// Add a class token (no-op if already present)
    fn add_class(&self, token: &str);

    /// Remove a class token (no-op if absent)
    fn remove_class(&self, token: &str);

    /// Check whether a class token is present
    fn has_class(&self, token: &str) -> bool;
}

/// Shared handle to a host container
pub type ContainerHandle = Rc<dyn Container>;

/// Tracks which container surface is currently assigned
#[derive(Default)]
pub struct ContainerBinding {
    current: Option<ContainerHandle>,
    /// How many times the host swapped in a different surface object
    reassignments: u32,
}

impl ContainerBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the container the host rendered this cycle
    ///
    /// Returns `true` if the surface object changed identity.
    pub fn assign(&mut self, container: Option<ContainerHandle>) -> bool {
        let changed = match (&self.current, &container) {
            (Some(old), Some(new)) => !Rc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        };

        if changed && self.current.is_some() && container.is_some() {
            self.reassignments += 1;
            tracing::trace!(
                "container surface replaced (reassignment #{})",
                self.reassignments
            );
        }

        self.current = container;
        changed
    }

    /// The currently assigned container, if any
    pub fn get(&self) -> Option<&ContainerHandle> {
        self.current.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.current.is_some()
    }

    /// Number of identity changes observed while a container was assigned
    pub fn reassignments(&self) -> u32 {
        self.reassignments
    }

    /// Forget the current container
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Surface {
        classes: RefCell<Vec<String>>,
    }

    impl Container for Surface {
        fn add_class(&self, token: &str) {
            let mut classes = self.classes.borrow_mut();
            if !classes.iter().any(|c| c == token) {
                classes.push(token.to_string());
            }
        }

        fn remove_class(&self, token: &str) {
            self.classes.borrow_mut().retain(|c| c != token);
        }

        fn has_class(&self, token: &str) -> bool {
            self.classes.borrow().iter().any(|c| c == token)
        }
    }

    #[test]
    fn test_assign_tracks_identity() {
        let mut binding = ContainerBinding::new();
        let a: ContainerHandle = Rc::new(Surface::default());
        let b: ContainerHandle = Rc::new(Surface::default());

        assert!(binding.assign(Some(a.clone())));
        assert!(!binding.assign(Some(a.clone())));
        assert_eq!(binding.reassignments(), 0);

        assert!(binding.assign(Some(b.clone())));
        assert_eq!(binding.reassignments(), 1);
        assert!(Rc::ptr_eq(binding.get().unwrap(), &b));
    }

    #[test]
    fn test_unavailable_container() {
        let mut binding = ContainerBinding::new();
        assert!(!binding.assign(None));
        assert!(!binding.is_available());

        let a: ContainerHandle = Rc::new(Surface::default());
        binding.assign(Some(a));
        assert!(binding.assign(None));
        assert!(!binding.is_available());
        assert_eq!(binding.reassignments(), 0);
    }
}
