use elz_semantic_tree_builder::BuildConfig;
use elz_syntax_tree::SyntaxNode;

use crate::compilation::Compilation;

/// Builder for creating a `Compilation`.
///
/// Add parsed units with their source text, optionally adjust the build
/// configuration, then call `build()` to populate every unit's binding table.
#[derive(Default)]
pub struct CompilationBuilder {
    units: Vec<(String, String, SyntaxNode)>, // (name, source, syntax) triples
    config: BuildConfig,
}

impl CompilationBuilder {
    /// Create a new compilation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed unit.
    ///
    /// # Arguments
    /// * `name` - The name of the unit (e.g., "main.elz")
    /// * `source` - The source text the syntax tree was parsed from
    /// * `syntax` - The unit's syntax tree
    pub fn add_unit(
        mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        syntax: SyntaxNode,
    ) -> Self {
        self.units.push((name.into(), source.into(), syntax));
        self
    }

    /// Replace the build configuration used for every unit.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the compilation.
    ///
    /// Each unit gets its own binding table. A unit with semantic errors is
    /// reported in the diagnostics and left without a table; the remaining
    /// units are still built.
    pub fn build(self) -> Compilation {
        Compilation::from_units(self.units, self.config)
    }
}
