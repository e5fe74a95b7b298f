//! Declarations collected from one compilation unit
//!
//! A [`Program`] is what the AST construction adapter hands to the binding
//! table. Every declaration keeps the span of its name so that semantic
//! errors can point back into the source.

use elz_span::{Span, Spanned};

use crate::error::SemanticError;
use crate::expr::Expr;
use crate::ty::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Dotted access path, e.g. `std::io`
    pub access_chain: Spanned<String>,
}

impl Import {
    pub fn new(access_chain: impl Into<String>, span: Span) -> Self {
        Self {
            access_chain: Spanned::new(access_chain.into(), span),
        }
    }
}

/// `name p1 p2 ... = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct BindingDecl {
    pub name: Spanned<String>,
    pub params: Vec<String>,
    pub expr: Expr,
    pub export: bool,
}

impl BindingDecl {
    pub fn new(name: Spanned<String>, params: Vec<String>, expr: Expr) -> Self {
        Self {
            name,
            params,
            expr,
            export: false,
        }
    }

    pub fn exported(mut self) -> Self {
        self.export = true;
        self
    }

    /// Split the identifiers of a binding head into its name and parameters.
    ///
    /// The first identifier names the binding; the rest are parameters.
    pub fn from_identifiers(
        identifiers: Vec<Spanned<String>>,
        expr: Expr,
        export: bool,
        decl_span: Span,
    ) -> Result<Self, SemanticError> {
        let mut identifiers = identifiers.into_iter();
        let name = identifiers
            .next()
            .ok_or(SemanticError::MissingBindingName { span: decl_span })?;
        let params = identifiers.map(Spanned::into_inner).collect();
        Ok(Self {
            name,
            params,
            expr,
            export,
        })
    }
}

/// `name :: T1 -> T2 -> ...`
#[derive(Debug, Clone, PartialEq)]
pub struct BindingTypeDecl {
    pub name: Spanned<String>,
    pub types: Vec<Spanned<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeField {
    pub name: Spanned<String>,
    pub ty: Spanned<Type>,
}

/// `type Name ( field: T, ... )`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefine {
    pub name: Spanned<String>,
    pub fields: Vec<TypeField>,
    pub export: bool,
}

impl TypeDefine {
    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn field(&self, name: &str) -> Option<&TypeField> {
        self.fields.iter().find(|field| field.name.value == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub imports: Vec<Import>,
    pub bindings: Vec<BindingDecl>,
    pub binding_types: Vec<BindingTypeDecl>,
    pub type_defines: Vec<TypeDefine>,
}
