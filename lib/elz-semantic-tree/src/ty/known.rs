use std::collections::HashSet;

use elz_prelude::primitives;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegisterPrelude {
    Yes,
    No,
}

/// Type names the compilation environment provides before any declaration.
///
/// User type definitions are tracked by the binding table itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTypes {
    names: HashSet<String>,
}

impl KnownTypes {
    pub fn new(register_prelude: RegisterPrelude) -> Self {
        let mut known = Self::default();
        if register_prelude == RegisterPrelude::Yes {
            known.extend(primitives::ALL.iter().map(|name| name.to_string()));
        }
        known
    }

    /// Just the prelude
    pub fn prelude() -> Self {
        Self::new(RegisterPrelude::Yes)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.insert(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Extend<String> for KnownTypes {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.names.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_is_registered() {
        let known = KnownTypes::prelude();
        assert!(known.contains("int"));
        assert!(known.contains("string"));
        assert_eq!(known.len(), primitives::ALL.len());
    }

    #[test]
    fn prelude_can_be_skipped() {
        let known = KnownTypes::new(RegisterPrelude::No);
        assert!(known.is_empty());
        assert!(!known.contains("int"));
    }

    #[test]
    fn extra_names() {
        let known = KnownTypes::new(RegisterPrelude::No).with("Handle");
        assert!(known.contains("Handle"));
        assert!(!known.contains("bool"));
    }
}
