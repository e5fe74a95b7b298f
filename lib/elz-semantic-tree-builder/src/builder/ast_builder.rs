//! Syntax tree to [`Program`] adapter
//!
//! `AstBuilder` walks a unit's syntax tree in post-order. Each node kind is
//! handled when the walk leaves it, so children have already produced their
//! type fragments or expressions by the time the parent declaration is seen.

use std::mem;

use elz_semantic_tree::{
    Argument, BindingDecl, BindingTypeDecl, Expr, Import, Operator, Program, SemanticError, Type,
    TypeDefine, TypeField,
};
use elz_span::Spanned;
use elz_syntax_tree::{SyntaxKind, SyntaxNode, WalkEvent};
use tracing::{debug, trace, warn};

use crate::syntax::{
    access_chain_text, direct_identifiers, direct_tokens, find_child, first_identifier,
    get_node_span, is_exported, token_text,
};

/// Collects the declarations of one compilation unit.
#[derive(Debug, Default)]
pub struct AstBuilder {
    /// Type fragments of the signature or field currently being read
    types: Vec<Spanned<Type>>,
    /// Operands of the expression currently being read
    exprs: Vec<Expr>,
    /// Fields of the type definition currently being read
    fields: Vec<TypeField>,
    program: Program,
    errors: Vec<SemanticError>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and return the assembled program, or every error found.
    pub fn build(mut self, root: &SyntaxNode) -> Result<Program, Vec<SemanticError>> {
        for event in root.preorder() {
            if let WalkEvent::Leave(node) = event {
                self.exit(&node);
            }
        }

        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }

    fn exit(&mut self, node: &SyntaxNode) {
        trace!(kind = ?node.kind(), "exit");

        match node.kind() {
            SyntaxKind::ImportDeclaration => self.exit_import(node),
            SyntaxKind::Binding => self.exit_binding(node),
            SyntaxKind::BindType => self.exit_bind_type(node),
            SyntaxKind::TypeDefine => self.exit_type_define(node),
            SyntaxKind::TypeField => self.exit_type_field(node),

            SyntaxKind::ExistType => {
                if let Some(name) = token_text(node, SyntaxKind::Identifier) {
                    self.push_type(Type::from_name(&name), node);
                }
            }
            SyntaxKind::VoidType => self.push_type(Type::Void, node),
            SyntaxKind::VariantType => {
                if let Some(name) = token_text(node, SyntaxKind::Identifier) {
                    self.push_type(Type::variant(name), node);
                }
            }
            SyntaxKind::CombineType => {
                let nested = node
                    .parent()
                    .map_or(false, |parent| parent.kind() == SyntaxKind::CombineType);
                if nested {
                    warn!(
                        signature = %node.text(),
                        "higher-order signature is flattened into a curried type list"
                    );
                }
            }

            SyntaxKind::IntLiteral => self.exit_int_literal(node),
            SyntaxKind::FloatLiteral => self.exit_float_literal(node),
            SyntaxKind::StringLiteral => {
                let text = token_text(node, SyntaxKind::String).unwrap_or_default();
                let value = text
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .unwrap_or(&text);
                self.exprs.push(Expr::string(value, get_node_span(node)));
            }
            SyntaxKind::BoolLiteral => {
                let value = token_text(node, SyntaxKind::Boolean).as_deref() == Some("true");
                self.exprs.push(Expr::bool(value, get_node_span(node)));
            }
            SyntaxKind::IdentExpr => {
                if let Some(name) = token_text(node, SyntaxKind::Identifier) {
                    self.exprs.push(Expr::identifier(name, get_node_span(node)));
                }
            }
            SyntaxKind::BinaryExpr => self.exit_binary(node),
            SyntaxKind::Argument => self.exit_argument(node),
            SyntaxKind::FuncCall => self.exit_func_call(node),

            // Containers with nothing of their own to record
            SyntaxKind::Program
            | SyntaxKind::AccessChain
            | SyntaxKind::Visibility
            | SyntaxKind::ParenExpr => {}

            kind => trace!(?kind, "ignored"),
        }
    }

    fn push_type(&mut self, ty: Type, node: &SyntaxNode) {
        self.types.push(Spanned::new(ty, get_node_span(node)));
    }

    fn exit_import(&mut self, node: &SyntaxNode) {
        let Some(chain) = find_child(node, SyntaxKind::AccessChain) else {
            return;
        };
        let access_chain = access_chain_text(&chain);
        debug!(import = %access_chain, "import declaration");
        self.program
            .imports
            .push(Import::new(access_chain, get_node_span(&chain)));
    }

    fn exit_binding(&mut self, node: &SyntaxNode) {
        let span = get_node_span(node);
        let identifiers = direct_identifiers(node);
        let export = is_exported(node);

        let mut exprs = mem::take(&mut self.exprs);
        let has_body = node.children().any(|child| child.kind().is_expr());
        let Some(expr) = exprs.pop().filter(|_| has_body) else {
            let error = match identifiers.first() {
                Some(name) => SemanticError::MissingBindingBody {
                    name: name.value.clone(),
                    span,
                },
                None => SemanticError::MissingBindingName { span },
            };
            self.errors.push(error);
            return;
        };

        match BindingDecl::from_identifiers(identifiers, expr, export, span) {
            Ok(decl) => {
                debug!(binding = %decl.name.value, params = ?decl.params, export, "binding declaration");
                self.program.bindings.push(decl);
            }
            Err(error) => self.errors.push(error),
        }
    }

    fn exit_bind_type(&mut self, node: &SyntaxNode) {
        let types = mem::take(&mut self.types);
        let Some(name) = first_identifier(node) else {
            self.errors.push(SemanticError::MissingBindingName {
                span: get_node_span(node),
            });
            return;
        };

        debug!(binding = %name.value, fragments = types.len(), "binding type declaration");
        self.program
            .binding_types
            .push(BindingTypeDecl { name, types });
    }

    fn exit_type_field(&mut self, node: &SyntaxNode) {
        let mut types = mem::take(&mut self.types).into_iter();
        let (Some(name), Some(ty)) = (first_identifier(node), types.next()) else {
            warn!(field = %node.text(), "type field without a name or type");
            return;
        };
        if types.next().is_some() {
            self.errors.push(SemanticError::FunctionFieldType {
                name: name.value,
                span: get_node_span(node),
            });
            return;
        }
        self.fields.push(TypeField { name, ty });
    }

    fn exit_type_define(&mut self, node: &SyntaxNode) {
        let fields = mem::take(&mut self.fields);
        let Some(name) = first_identifier(node) else {
            warn!(define = %node.text(), "type definition without a name");
            return;
        };

        debug!(type_define = %name.value, fields = fields.len(), "type definition");
        self.program.type_defines.push(TypeDefine {
            name,
            fields,
            export: is_exported(node),
        });
    }

    fn exit_int_literal(&mut self, node: &SyntaxNode) {
        let span = get_node_span(node);
        let text = token_text(node, SyntaxKind::Integer).unwrap_or_default();
        let value = text.parse::<i64>().unwrap_or_else(|_| {
            self.errors.push(SemanticError::InvalidLiteral {
                kind: "integer",
                text: text.clone(),
                span: span.clone(),
            });
            0
        });
        // Pushed even when invalid so the enclosing declaration still sees a body
        self.exprs.push(Expr::int(value, span));
    }

    fn exit_float_literal(&mut self, node: &SyntaxNode) {
        let span = get_node_span(node);
        let text = token_text(node, SyntaxKind::Float).unwrap_or_default();
        let value = text.parse::<f64>().unwrap_or_else(|_| {
            self.errors.push(SemanticError::InvalidLiteral {
                kind: "float",
                text: text.clone(),
                span: span.clone(),
            });
            0.0
        });
        self.exprs.push(Expr::float(value, span));
    }

    fn exit_binary(&mut self, node: &SyntaxNode) {
        let op = [
            SyntaxKind::Plus,
            SyntaxKind::Minus,
            SyntaxKind::Star,
            SyntaxKind::Slash,
        ]
        .into_iter()
        .find_map(|kind| direct_tokens(node, kind).next())
        .and_then(|token| Operator::from_symbol(token.text()));

        let (Some(rhs), Some(lhs), Some(op)) = (self.exprs.pop(), self.exprs.pop(), op) else {
            warn!(expr = %node.text(), "incomplete binary expression");
            return;
        };
        self.exprs.push(Expr::binary(lhs, op, rhs));
    }

    fn exit_argument(&mut self, node: &SyntaxNode) {
        let Some(expr) = self.exprs.pop() else {
            return;
        };
        let name = first_identifier(node).map(Spanned::into_inner);
        self.exprs
            .push(Expr::arg(Argument { name, expr }, get_node_span(node)));
    }

    fn exit_func_call(&mut self, node: &SyntaxNode) {
        let arg_count = node
            .children()
            .filter(|child| child.kind() == SyntaxKind::Argument)
            .count();
        let Some(split) = self.exprs.len().checked_sub(arg_count + 1) else {
            warn!(call = %node.text(), "incomplete call expression");
            return;
        };

        let args = self.exprs.split_off(split + 1);
        let Some(callee) = self.exprs.pop() else {
            return;
        };
        self.exprs
            .push(Expr::func_call(callee, args, get_node_span(node)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elz_semantic_tree::ExprKind;
    use elz_syntax_tree::{EventSink, TreeBuilder};

    /// Builds source text and events side by side
    #[derive(Default)]
    struct Source {
        text: String,
        sink: EventSink,
    }

    impl Source {
        fn start(&mut self, kind: SyntaxKind) -> &mut Self {
            self.sink.start_node(kind);
            self
        }

        fn finish(&mut self) -> &mut Self {
            self.sink.finish_node();
            self
        }

        fn token(&mut self, kind: SyntaxKind, text: &str) -> &mut Self {
            if !self.text.is_empty() && !self.text.ends_with('\n') {
                let start = self.text.len();
                self.text.push(' ');
                self.sink.add_token(SyntaxKind::Whitespace, start..start + 1);
            }
            let start = self.text.len();
            self.text.push_str(text);
            self.sink.add_token(kind, start..self.text.len());
            self
        }

        fn ident_expr(&mut self, name: &str) -> &mut Self {
            self.start(SyntaxKind::IdentExpr)
                .token(SyntaxKind::Identifier, name)
                .finish()
        }

        fn int(&mut self, text: &str) -> &mut Self {
            self.start(SyntaxKind::IntLiteral)
                .token(SyntaxKind::Integer, text)
                .finish()
        }

        fn exist(&mut self, name: &str) -> &mut Self {
            self.start(SyntaxKind::ExistType)
                .token(SyntaxKind::Identifier, name)
                .finish()
        }

        fn build(self) -> Result<Program, Vec<SemanticError>> {
            let tree = TreeBuilder::new(&self.text, self.sink.into_events()).build();
            AstBuilder::new().build(&tree)
        }
    }

    fn program() -> Source {
        let mut source = Source::default();
        source.start(SyntaxKind::Program);
        source
    }

    #[test]
    fn add_binding_with_signature() {
        let mut src = program();
        // add :: int -> int -> int
        src.start(SyntaxKind::BindType)
            .token(SyntaxKind::Identifier, "add")
            .token(SyntaxKind::ColonColon, "::")
            .start(SyntaxKind::CombineType)
            .exist("int")
            .token(SyntaxKind::Arrow, "->")
            .exist("int")
            .token(SyntaxKind::Arrow, "->")
            .exist("int")
            .finish()
            .finish();
        // add x y = x + y
        src.start(SyntaxKind::Binding)
            .token(SyntaxKind::Identifier, "add")
            .token(SyntaxKind::Identifier, "x")
            .token(SyntaxKind::Identifier, "y")
            .token(SyntaxKind::Equals, "=")
            .start(SyntaxKind::BinaryExpr)
            .ident_expr("x")
            .token(SyntaxKind::Plus, "+")
            .ident_expr("y")
            .finish()
            .finish();
        src.finish();

        let program = src.build().unwrap();
        assert_eq!(program.bindings.len(), 1);
        let add = &program.bindings[0];
        assert_eq!(add.name.value, "add");
        assert_eq!(add.params, vec!["x", "y"]);
        assert!(!add.export);
        assert_eq!(add.expr.to_string(), "x + y");

        assert_eq!(program.binding_types.len(), 1);
        let types: Vec<_> = program.binding_types[0]
            .types
            .iter()
            .map(|ty| ty.value.clone())
            .collect();
        assert_eq!(types, vec![Type::Int, Type::Int, Type::Int]);
    }

    #[test]
    fn accumulator_is_reset_between_signatures() {
        let mut src = program();
        src.start(SyntaxKind::BindType)
            .token(SyntaxKind::Identifier, "f")
            .token(SyntaxKind::ColonColon, "::")
            .exist("f64")
            .finish();
        src.start(SyntaxKind::BindType)
            .token(SyntaxKind::Identifier, "g")
            .token(SyntaxKind::ColonColon, "::")
            .start(SyntaxKind::VariantType)
            .token(SyntaxKind::Quote, "'")
            .token(SyntaxKind::Identifier, "a")
            .finish()
            .finish();
        src.finish();

        let program = src.build().unwrap();
        assert_eq!(program.binding_types[0].types.len(), 1);
        assert_eq!(program.binding_types[0].types[0].value, Type::Float);
        assert_eq!(program.binding_types[1].types.len(), 1);
        assert_eq!(program.binding_types[1].types[0].value, Type::variant("a"));
    }

    #[test]
    fn exported_binding_and_import() {
        let mut src = program();
        src.start(SyntaxKind::ImportDeclaration)
            .token(SyntaxKind::Import, "import")
            .start(SyntaxKind::AccessChain)
            .token(SyntaxKind::Identifier, "std")
            .finish()
            .finish();
        src.start(SyntaxKind::Binding)
            .start(SyntaxKind::Visibility)
            .token(SyntaxKind::Pub, "pub")
            .finish()
            .token(SyntaxKind::Identifier, "one")
            .token(SyntaxKind::Equals, "=")
            .int("1")
            .finish();
        src.finish();

        let program = src.build().unwrap();
        assert_eq!(program.imports[0].access_chain.value, "std");
        assert!(program.bindings[0].export);
        assert!(program.bindings[0].params.is_empty());
    }

    #[test]
    fn call_arguments_keep_order() {
        let mut src = program();
        src.start(SyntaxKind::Binding)
            .token(SyntaxKind::Identifier, "main")
            .token(SyntaxKind::Equals, "=")
            .start(SyntaxKind::FuncCall)
            .ident_expr("add")
            .token(SyntaxKind::LParen, "(")
            .start(SyntaxKind::Argument)
            .int("1")
            .finish()
            .token(SyntaxKind::Comma, ",")
            .start(SyntaxKind::Argument)
            .token(SyntaxKind::Identifier, "rhs")
            .token(SyntaxKind::Colon, ":")
            .int("2")
            .finish()
            .token(SyntaxKind::RParen, ")")
            .finish()
            .finish();
        src.finish();

        let program = src.build().unwrap();
        let body = &program.bindings[0].expr;
        assert_eq!(body.to_string(), "add(1, rhs: 2)");
        let ExprKind::FuncCall { args, .. } = &body.kind else {
            panic!("expected a call, got {:?}", body.kind);
        };
        assert_eq!(args.len(), 2);
        assert_eq!(body.callees(), vec!["add"]);
    }

    #[test]
    fn type_define_fields() {
        let mut src = program();
        src.start(SyntaxKind::TypeDefine)
            .token(SyntaxKind::Type, "type")
            .token(SyntaxKind::Identifier, "Point")
            .token(SyntaxKind::LParen, "(");
        for field in ["x", "y"] {
            src.start(SyntaxKind::TypeField)
                .token(SyntaxKind::Identifier, field)
                .token(SyntaxKind::Colon, ":")
                .exist("int")
                .finish();
        }
        src.token(SyntaxKind::RParen, ")").finish();
        src.finish();

        let program = src.build().unwrap();
        let point = &program.type_defines[0];
        assert_eq!(point.name(), "Point");
        assert_eq!(point.fields.len(), 2);
        assert_eq!(point.fields[1].name.value, "y");
        assert_eq!(point.fields[1].ty.value, Type::Int);
    }

    #[test]
    fn function_typed_field_is_rejected() {
        let mut src = program();
        // type Handler (run: int -> f64)
        src.start(SyntaxKind::TypeDefine)
            .token(SyntaxKind::Type, "type")
            .token(SyntaxKind::Identifier, "Handler")
            .token(SyntaxKind::LParen, "(")
            .start(SyntaxKind::TypeField)
            .token(SyntaxKind::Identifier, "run")
            .token(SyntaxKind::Colon, ":")
            .start(SyntaxKind::CombineType)
            .exist("int")
            .token(SyntaxKind::Arrow, "->")
            .exist("f64")
            .finish()
            .finish()
            .token(SyntaxKind::RParen, ")")
            .finish();
        src.finish();

        let errors = src.build().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            SemanticError::FunctionFieldType { name, .. } if name == "run"
        ));
        assert_eq!(
            errors[0].to_string(),
            "field `run` cannot have a function type"
        );
    }

    #[test]
    fn binding_without_body() {
        let mut src = program();
        src.start(SyntaxKind::Binding)
            .token(SyntaxKind::Identifier, "x")
            .token(SyntaxKind::Equals, "=")
            .finish();
        src.finish();

        let errors = src.build().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "binding `x` has no body");
    }

    #[test]
    fn binding_without_name() {
        let mut src = program();
        src.start(SyntaxKind::Binding)
            .token(SyntaxKind::Equals, "=")
            .int("1")
            .finish();
        src.finish();

        let errors = src.build().unwrap_err();
        assert!(matches!(errors[0], SemanticError::MissingBindingName { .. }));
    }

    #[test]
    fn integer_overflow_is_reported() {
        let mut src = program();
        src.start(SyntaxKind::Binding)
            .token(SyntaxKind::Identifier, "big")
            .token(SyntaxKind::Equals, "=")
            .int("99999999999999999999")
            .finish();
        src.finish();

        let errors = src.build().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "invalid integer literal `99999999999999999999`"
        );
    }
}
