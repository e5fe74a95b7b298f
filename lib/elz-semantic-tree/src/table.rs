use std::collections::HashMap;

use elz_span::Spanned;
use tracing::debug;

use crate::binding::Binding;
use crate::error::SemanticError;
use crate::program::{BindingDecl, BindingTypeDecl, Program, TypeDefine};
use crate::ty::{KnownTypes, Type};

/// Per-compilation-unit registry of bindings, imports and type definitions.
///
/// Tables are owned by their compilation unit. Two units never share one, so
/// a name bound in one unit never collides with the same name in another.
#[derive(Debug, Clone)]
pub struct BindingTable {
    imports: Vec<String>,
    bindings: HashMap<String, Binding>,
    binding_order: Vec<String>,
    type_defines: HashMap<String, TypeDefine>,
    type_define_order: Vec<String>,
    known_types: KnownTypes,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// Empty table whose environment is the prelude
    pub fn new() -> Self {
        Self::with_known_types(KnownTypes::prelude())
    }

    pub fn with_known_types(known_types: KnownTypes) -> Self {
        Self {
            imports: Vec::new(),
            bindings: HashMap::new(),
            binding_order: Vec::new(),
            type_defines: HashMap::new(),
            type_define_order: Vec::new(),
            known_types,
        }
    }

    pub fn from_program(program: Program) -> Result<Self, SemanticError> {
        Self::from_program_with(program, KnownTypes::prelude())
    }

    /// Build a table from a whole program.
    ///
    /// Declarations are processed in passes: type definitions (then their
    /// field types), imports, bindings, and finally binding signatures. Every
    /// binding exists before any signature is attached, so a signature may
    /// appear before the binding it describes. The first failure aborts.
    pub fn from_program_with(
        program: Program,
        known_types: KnownTypes,
    ) -> Result<Self, SemanticError> {
        let mut table = Self::with_known_types(known_types);

        for type_define in program.type_defines {
            table.insert_type_define(type_define)?;
        }
        table.check_type_define_fields()?;

        for import in program.imports {
            table.insert_import(import.access_chain.value);
        }

        for binding in program.bindings {
            table.insert_binding(binding)?;
        }

        for binding_type in program.binding_types {
            table.insert_binding_type(binding_type)?;
        }

        debug!(
            bindings = table.binding_order.len(),
            imports = table.imports.len(),
            type_defines = table.type_define_order.len(),
            "built binding table"
        );

        Ok(table)
    }

    /// Record an import path. Duplicates are kept.
    pub fn insert_import(&mut self, access_chain: impl Into<String>) {
        let access_chain = access_chain.into();
        debug!(import = %access_chain, "recorded import");
        self.imports.push(access_chain);
    }

    pub fn insert_binding(&mut self, decl: BindingDecl) -> Result<(), SemanticError> {
        if let Some(existing) = self.bindings.get(&decl.name.value) {
            return Err(SemanticError::BindingAlreadyExists {
                name: decl.name.value,
                span: decl.name.span,
                original_span: existing.name_span(),
            });
        }

        debug!(
            binding = %decl.name.value,
            params = decl.params.len(),
            export = decl.export,
            "inserted binding"
        );

        let name = decl.name.value.clone();
        self.binding_order.push(name.clone());
        self.bindings.insert(name, Binding::new(decl));
        Ok(())
    }

    /// Attach a signature to an existing binding, replacing any earlier one.
    pub fn insert_binding_type(&mut self, decl: BindingTypeDecl) -> Result<(), SemanticError> {
        let Some(binding) = self.bindings.get_mut(&decl.name.value) else {
            return Err(SemanticError::NoSuchBinding {
                name: decl.name.value,
                span: Some(decl.name.span),
            });
        };

        for ty in &decl.types {
            check_type(&self.known_types, &self.type_defines, ty)?;
        }

        let types: Vec<Type> = decl.types.into_iter().map(Spanned::into_inner).collect();
        if binding.set_type_list(types).is_some() {
            debug!(binding = %decl.name.value, "replaced binding signature");
        } else {
            debug!(binding = %decl.name.value, "attached binding signature");
        }
        Ok(())
    }

    pub fn insert_type_define(&mut self, type_define: TypeDefine) -> Result<(), SemanticError> {
        let name = &type_define.name;
        if let Some(existing) = self.type_defines.get(&name.value) {
            return Err(SemanticError::TypeAlreadyExists {
                name: name.value.clone(),
                span: name.span.clone(),
                original_span: Some(existing.name.span.clone()),
            });
        }
        // `int`, `f64` and `void` always denote their dedicated variants
        let builtin = Type::from_name(&name.value).referenced_name().is_none();
        if builtin || self.known_types.contains(&name.value) {
            return Err(SemanticError::TypeAlreadyExists {
                name: name.value.clone(),
                span: name.span.clone(),
                original_span: None,
            });
        }

        debug!(
            type_define = %name.value,
            fields = type_define.fields.len(),
            "inserted type define"
        );

        let name = name.value.clone();
        self.type_define_order.push(name.clone());
        self.type_defines.insert(name, type_define);
        Ok(())
    }

    /// Look up a binding by name, exported or not
    pub fn get_binding(&self, name: &str) -> Result<&Binding, SemanticError> {
        self.bindings
            .get(name)
            .ok_or_else(|| SemanticError::NoSuchBinding {
                name: name.to_string(),
                span: None,
            })
    }

    /// Look up a binding visible to other units
    pub fn get_export_binding(&self, name: &str) -> Result<&Binding, SemanticError> {
        self.bindings
            .get(name)
            .filter(|binding| binding.is_export())
            .ok_or_else(|| SemanticError::NoExportBinding {
                name: name.to_string(),
            })
    }

    pub fn get_type_define(&self, name: &str) -> Result<&TypeDefine, SemanticError> {
        self.type_defines
            .get(name)
            .ok_or_else(|| SemanticError::NoSuchType {
                name: name.to_string(),
            })
    }

    pub fn type_defines(&self) -> &HashMap<String, TypeDefine> {
        &self.type_defines
    }

    /// Type definitions in declaration order
    pub fn type_defines_ordered(&self) -> impl Iterator<Item = &TypeDefine> {
        self.type_define_order
            .iter()
            .filter_map(|name| self.type_defines.get(name))
    }

    /// Import paths in the order they were recorded
    pub fn dependencies(&self) -> &[String] {
        &self.imports
    }

    /// Bindings in declaration order
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.binding_order
            .iter()
            .filter_map(|name| self.bindings.get(name))
    }

    pub fn export_bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings().filter(|binding| binding.is_export())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether `name` resolves to a type in this unit's environment
    pub fn is_known_type(&self, name: &str) -> bool {
        is_known_type(&self.known_types, &self.type_defines, name)
    }

    pub fn known_types(&self) -> &KnownTypes {
        &self.known_types
    }

    fn check_type_define_fields(&self) -> Result<(), SemanticError> {
        for type_define in self.type_defines_ordered() {
            for field in &type_define.fields {
                check_type(&self.known_types, &self.type_defines, &field.ty)?;
            }
        }
        Ok(())
    }
}

// Free functions so they can borrow the environment while a binding is
// borrowed mutably.
fn is_known_type(
    known_types: &KnownTypes,
    type_defines: &HashMap<String, TypeDefine>,
    name: &str,
) -> bool {
    known_types.contains(name) || type_defines.contains_key(name)
}

fn check_type(
    known_types: &KnownTypes,
    type_defines: &HashMap<String, TypeDefine>,
    ty: &Spanned<Type>,
) -> Result<(), SemanticError> {
    match ty.value.referenced_name() {
        Some(name) if !is_known_type(known_types, type_defines, name) => {
            Err(SemanticError::UnknownType {
                name: name.to_string(),
                span: ty.span.clone(),
            })
        }
        _ => Ok(()),
    }
}
