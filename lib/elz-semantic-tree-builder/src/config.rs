use elz_semantic_tree::{KnownTypes, RegisterPrelude};

/// Settings for building a unit's binding table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub register_prelude: RegisterPrelude,
    /// Type names provided by the environment beyond the prelude
    pub extra_known_types: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            register_prelude: RegisterPrelude::Yes,
            extra_known_types: Vec::new(),
        }
    }
}

impl BuildConfig {
    pub fn without_prelude(mut self) -> Self {
        self.register_prelude = RegisterPrelude::No;
        self
    }

    pub fn with_known_type(mut self, name: impl Into<String>) -> Self {
        self.extra_known_types.push(name.into());
        self
    }

    pub fn known_types(&self) -> KnownTypes {
        let mut known = KnownTypes::new(self.register_prelude);
        known.extend(self.extra_known_types.iter().cloned());
        known
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registers_prelude() {
        let known = BuildConfig::default().known_types();
        assert!(known.contains("int"));
        assert!(known.contains("List"));
    }

    #[test]
    fn extra_types_without_prelude() {
        let known = BuildConfig::default()
            .without_prelude()
            .with_known_type("Socket")
            .known_types();
        assert!(known.contains("Socket"));
        assert!(!known.contains("bool"));
        assert_eq!(known.len(), 1);
    }
}
