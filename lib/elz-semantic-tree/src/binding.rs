use elz_span::Span;

use crate::expr::Expr;
use crate::program::BindingDecl;
use crate::ty::Type;

/// A named top-level definition.
///
/// The type list is absent until a signature is attached through
/// [`BindingTable::insert_binding_type`](crate::BindingTable::insert_binding_type).
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    name: String,
    name_span: Span,
    params: Vec<String>,
    expr: Expr,
    type_list: Option<Vec<Type>>,
    export: bool,
}

impl Binding {
    pub fn new(decl: BindingDecl) -> Self {
        Self {
            name: decl.name.value,
            name_span: decl.name.span,
            params: decl.params,
            expr: decl.expr,
            type_list: None,
            export: decl.export,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_span(&self) -> Span {
        self.name_span.clone()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Declared signature, parameters first and result last
    pub fn type_list(&self) -> Option<&[Type]> {
        self.type_list.as_deref()
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.type_list.as_ref().and_then(|types| types.last())
    }

    pub fn is_export(&self) -> bool {
        self.export
    }

    pub(crate) fn set_type_list(&mut self, types: Vec<Type>) -> Option<Vec<Type>> {
        self.type_list.replace(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elz_span::Spanned;

    #[test]
    fn new_binding_has_no_signature() {
        let decl = BindingDecl::new(
            Spanned::new("one".to_string(), 0..3),
            vec![],
            Expr::int(1, 6..7),
        );
        let binding = Binding::new(decl);
        assert_eq!(binding.name(), "one");
        assert_eq!(binding.name_span(), 0..3);
        assert!(binding.params().is_empty());
        assert!(binding.type_list().is_none());
        assert!(binding.return_type().is_none());
        assert!(!binding.is_export());
    }

    #[test]
    fn signature_replaces_previous() {
        let decl = BindingDecl::new(
            Spanned::new("id".to_string(), 0..2),
            vec!["x".to_string()],
            Expr::identifier("x", 7..8),
        )
        .exported();
        let mut binding = Binding::new(decl);
        assert!(binding.is_export());

        assert_eq!(binding.set_type_list(vec![Type::Int, Type::Int]), None);
        let previous = binding.set_type_list(vec![Type::Float, Type::Float]);
        assert_eq!(previous, Some(vec![Type::Int, Type::Int]));
        assert_eq!(binding.type_list(), Some(&[Type::Float, Type::Float][..]));
        assert_eq!(binding.return_type(), Some(&Type::Float));
    }
}
