use elz_semantic_tree::BindingTable;
use elz_syntax_tree::SyntaxNode;

/// A compiled unit.
///
/// Contains the original source, its syntax tree, and the binding table built
/// from it. The table is absent when the unit failed semantic checks.
pub struct CompilationUnit {
    name: String,
    source: String,
    syntax_tree: SyntaxNode,
    file_id: usize,
    binding_table: Option<BindingTable>,
}

impl CompilationUnit {
    pub(crate) fn new(
        name: String,
        source: String,
        syntax_tree: SyntaxNode,
        file_id: usize,
        binding_table: Option<BindingTable>,
    ) -> Self {
        Self {
            name,
            source,
            syntax_tree,
            file_id,
            binding_table,
        }
    }

    /// Get the unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the source code.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the syntax tree.
    pub fn syntax_tree(&self) -> &SyntaxNode {
        &self.syntax_tree
    }

    /// File id of this unit in the compilation's diagnostics.
    pub fn file_id(&self) -> usize {
        self.file_id
    }

    pub fn binding_table(&self) -> Option<&BindingTable> {
        self.binding_table.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.binding_table.is_some()
    }
}
