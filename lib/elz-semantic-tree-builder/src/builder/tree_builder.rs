//! Binding table builder
//!
//! Runs the AST adapter over a unit's syntax tree and then populates the
//! unit's binding table, reporting every failure as a diagnostic.

use elz_reporting::DiagnosticContext;
use elz_semantic_tree::BindingTable;
use elz_syntax_tree::SyntaxNode;
use tracing::debug;

use crate::config::BuildConfig;

use super::AstBuilder;

/// Builds one binding table per compilation unit.
///
/// # Example
///
/// ```ignore
/// let builder = BindingTableBuilder::new(BuildConfig::default());
/// let file_id = diagnostics.add_file("main.elz".into(), source);
/// if let Some(table) = builder.build(&syntax, &mut diagnostics, file_id) {
///     let main = table.get_export_binding("main")?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BindingTableBuilder {
    config: BuildConfig,
}

impl BindingTableBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the table for one unit.
    ///
    /// Returns `None` if the unit has any semantic error. Errors are thrown
    /// into `diagnostics` against `file_id`; nothing outside this unit is
    /// affected.
    pub fn build(
        &self,
        syntax: &SyntaxNode,
        diagnostics: &mut DiagnosticContext,
        file_id: usize,
    ) -> Option<BindingTable> {
        let program = match AstBuilder::new().build(syntax) {
            Ok(program) => program,
            Err(errors) => {
                debug!(file_id, errors = errors.len(), "declarations rejected");
                for error in errors {
                    diagnostics.throw(error, file_id);
                }
                return None;
            }
        };

        match BindingTable::from_program_with(program, self.config.known_types()) {
            Ok(table) => Some(table),
            Err(error) => {
                debug!(file_id, %error, "binding table rejected");
                diagnostics.throw(error, file_id);
                None
            }
        }
    }
}
