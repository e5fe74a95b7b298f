use elz_reporting::DiagnosticContext;
use elz_semantic_tree::BindingTable;
use elz_semantic_tree_builder::{BindingTableBuilder, BuildConfig};
use elz_syntax_tree::SyntaxNode;
use tracing::debug;

use crate::unit::CompilationUnit;

/// Represents a compiled Elz project.
///
/// Contains all compilation units, each owning its binding table, and the
/// diagnostics collected while building them. Created via
/// `Compilation::builder()`.
pub struct Compilation {
    units: Vec<CompilationUnit>,
    diagnostics: DiagnosticContext,
}

impl Compilation {
    /// Create a new compilation builder.
    pub fn builder() -> crate::CompilationBuilder {
        crate::CompilationBuilder::new()
    }

    pub(crate) fn from_units(units: Vec<(String, String, SyntaxNode)>, config: BuildConfig) -> Self {
        let mut diagnostics = DiagnosticContext::new();
        let builder = BindingTableBuilder::new(config);

        let units = units
            .into_iter()
            .map(|(name, source, syntax)| {
                let file_id = diagnostics.add_file(name.clone(), source.clone());
                let binding_table = builder.build(&syntax, &mut diagnostics, file_id);
                debug!(unit = %name, file_id, ok = binding_table.is_some(), "built unit");
                CompilationUnit::new(name, source, syntax, file_id, binding_table)
            })
            .collect();

        Self { units, diagnostics }
    }

    /// Get all compilation units, in the order they were added.
    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    /// Get a specific unit by name.
    pub fn unit(&self, name: &str) -> Option<&CompilationUnit> {
        self.units.iter().find(|unit| unit.name() == name)
    }

    /// Binding table of a unit, if the unit exists and built cleanly.
    pub fn binding_table(&self, name: &str) -> Option<&BindingTable> {
        self.unit(name).and_then(CompilationUnit::binding_table)
    }

    /// Get the diagnostic context.
    pub fn diagnostics(&self) -> &DiagnosticContext {
        &self.diagnostics
    }

    /// Check if there are any errors in the compilation.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
