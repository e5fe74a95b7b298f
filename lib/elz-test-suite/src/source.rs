//! Source DSL
//!
//! Declarations are written as values and rendered into source text and a
//! syntax tree together, so every token's span points at its own text.
//!
//! ```
//! use elz_test_suite::*;
//!
//! let source = Source::new()
//!     .with(bind_type("add", arrow([exist("int"), exist("int"), exist("int")])))
//!     .with(binding("add", &["x", "y"], binary(ident("x"), '+', ident("y"))));
//!
//! let (text, _syntax) = source.render();
//! assert_eq!(text, "add :: int -> int -> int\nadd x y = x + y");
//! ```

use elz_syntax_tree::{EventSink, SyntaxKind, SyntaxNode, TreeBuilder};

/// A type as written in a signature or field
#[derive(Debug, Clone)]
pub enum Ty {
    Exist(String),
    Void,
    Variant(String),
    /// `a -> b -> c`
    Arrow(Vec<Ty>),
}

pub fn exist(name: &str) -> Ty {
    Ty::Exist(name.to_string())
}

pub fn void() -> Ty {
    Ty::Void
}

pub fn variant(name: &str) -> Ty {
    Ty::Variant(name.to_string())
}

pub fn arrow(types: impl IntoIterator<Item = Ty>) -> Ty {
    Ty::Arrow(types.into_iter().collect())
}

/// An expression as written in a binding body
#[derive(Debug, Clone)]
pub enum Ex {
    Int(String),
    Float(String),
    Str(String),
    Bool(bool),
    Ident(String),
    Binary(Box<Ex>, char, Box<Ex>),
    Paren(Box<Ex>),
    Call(Box<Ex>, Vec<(Option<String>, Ex)>),
}

pub fn int(value: i64) -> Ex {
    Ex::Int(value.to_string())
}

/// Integer literal with arbitrary text, e.g. one that overflows
pub fn int_text(text: &str) -> Ex {
    Ex::Int(text.to_string())
}

pub fn float(text: &str) -> Ex {
    Ex::Float(text.to_string())
}

pub fn string(value: &str) -> Ex {
    Ex::Str(value.to_string())
}

pub fn boolean(value: bool) -> Ex {
    Ex::Bool(value)
}

pub fn ident(name: &str) -> Ex {
    Ex::Ident(name.to_string())
}

pub fn binary(lhs: Ex, op: char, rhs: Ex) -> Ex {
    Ex::Binary(Box::new(lhs), op, Box::new(rhs))
}

pub fn paren(expr: Ex) -> Ex {
    Ex::Paren(Box::new(expr))
}

pub fn call(callee: &str, args: impl IntoIterator<Item = Ex>) -> Ex {
    Ex::Call(
        Box::new(ident(callee)),
        args.into_iter().map(|arg| (None, arg)).collect(),
    )
}

pub fn call_labeled<'a>(callee: &str, args: impl IntoIterator<Item = (&'a str, Ex)>) -> Ex {
    Ex::Call(
        Box::new(ident(callee)),
        args.into_iter()
            .map(|(label, arg)| (Some(label.to_string()), arg))
            .collect(),
    )
}

/// A top-level declaration
#[derive(Debug, Clone)]
pub enum Decl {
    Import(String),
    Binding {
        export: bool,
        idents: Vec<String>,
        body: Option<Ex>,
    },
    BindType {
        name: String,
        ty: Ty,
    },
    TypeDefine {
        export: bool,
        name: String,
        fields: Vec<(String, Ty)>,
    },
}

impl Decl {
    /// Mark a binding or type definition `pub`
    pub fn exported(mut self) -> Self {
        match &mut self {
            Decl::Binding { export, .. } | Decl::TypeDefine { export, .. } => *export = true,
            Decl::Import(_) | Decl::BindType { .. } => {}
        }
        self
    }
}

pub fn import(path: &str) -> Decl {
    Decl::Import(path.to_string())
}

pub fn binding(name: &str, params: &[&str], body: Ex) -> Decl {
    let idents = std::iter::once(name)
        .chain(params.iter().copied())
        .map(str::to_string)
        .collect();
    Decl::Binding {
        export: false,
        idents,
        body: Some(body),
    }
}

/// A binding head without a body, as a recovering parser would produce
pub fn binding_without_body(name: &str) -> Decl {
    Decl::Binding {
        export: false,
        idents: vec![name.to_string()],
        body: None,
    }
}

/// A binding with no name before `=`
pub fn anonymous_binding(body: Ex) -> Decl {
    Decl::Binding {
        export: false,
        idents: Vec::new(),
        body: Some(body),
    }
}

pub fn bind_type(name: &str, ty: Ty) -> Decl {
    Decl::BindType {
        name: name.to_string(),
        ty,
    }
}

pub fn type_define<'a>(name: &str, fields: impl IntoIterator<Item = (&'a str, Ty)>) -> Decl {
    Decl::TypeDefine {
        export: false,
        name: name.to_string(),
        fields: fields
            .into_iter()
            .map(|(field, ty)| (field.to_string(), ty))
            .collect(),
    }
}

/// A program: declarations in source order
#[derive(Debug, Clone, Default)]
pub struct Source {
    decls: Vec<Decl>,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Render to source text and the syntax tree over it
    pub fn render(&self) -> (String, SyntaxNode) {
        let mut writer = Writer::default();
        writer.sink.start_node(SyntaxKind::Program);
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                writer.raw(SyntaxKind::Whitespace, "\n");
            }
            writer.decl(decl);
        }
        writer.sink.finish_node();

        let syntax = TreeBuilder::new(&writer.text, writer.sink.into_events()).build();
        (writer.text, syntax)
    }
}

#[derive(Default)]
struct Writer {
    text: String,
    sink: EventSink,
}

impl Writer {
    fn raw(&mut self, kind: SyntaxKind, text: &str) {
        let start = self.text.len();
        self.text.push_str(text);
        self.sink.add_token(kind, start..self.text.len());
    }

    /// Token separated from the previous one by a space
    fn token(&mut self, kind: SyntaxKind, text: &str) {
        if !self.text.is_empty() && !self.text.ends_with(['\n', ' ', '(', '\'']) {
            self.raw(SyntaxKind::Whitespace, " ");
        }
        self.raw(kind, text);
    }

    fn node(&mut self, kind: SyntaxKind, body: impl FnOnce(&mut Self)) {
        self.sink.start_node(kind);
        body(self);
        self.sink.finish_node();
    }

    fn visibility(&mut self, export: bool) {
        if export {
            self.node(SyntaxKind::Visibility, |w| w.token(SyntaxKind::Pub, "pub"));
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Import(path) => self.node(SyntaxKind::ImportDeclaration, |w| {
                w.token(SyntaxKind::Import, "import");
                w.node(SyntaxKind::AccessChain, |w| {
                    for (i, segment) in path.split("::").enumerate() {
                        if i == 0 {
                            w.token(SyntaxKind::Identifier, segment);
                        } else {
                            w.raw(SyntaxKind::ColonColon, "::");
                            w.raw(SyntaxKind::Identifier, segment);
                        }
                    }
                });
            }),
            Decl::Binding {
                export,
                idents,
                body,
            } => self.node(SyntaxKind::Binding, |w| {
                w.visibility(*export);
                for ident in idents {
                    w.token(SyntaxKind::Identifier, ident);
                }
                w.token(SyntaxKind::Equals, "=");
                if let Some(body) = body {
                    w.expr(body);
                }
            }),
            Decl::BindType { name, ty } => self.node(SyntaxKind::BindType, |w| {
                w.token(SyntaxKind::Identifier, name);
                w.token(SyntaxKind::ColonColon, "::");
                w.ty(ty);
            }),
            Decl::TypeDefine {
                export,
                name,
                fields,
            } => self.node(SyntaxKind::TypeDefine, |w| {
                w.visibility(*export);
                w.token(SyntaxKind::Type, "type");
                w.token(SyntaxKind::Identifier, name);
                w.token(SyntaxKind::LParen, "(");
                for (i, (field, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        w.raw(SyntaxKind::Comma, ",");
                    }
                    w.node(SyntaxKind::TypeField, |w| {
                        w.token(SyntaxKind::Identifier, field);
                        w.raw(SyntaxKind::Colon, ":");
                        w.ty(ty);
                    });
                }
                w.raw(SyntaxKind::RParen, ")");
            }),
        }
    }

    fn ty(&mut self, ty: &Ty) {
        match ty {
            Ty::Exist(name) => self.node(SyntaxKind::ExistType, |w| {
                w.token(SyntaxKind::Identifier, name)
            }),
            Ty::Void => self.node(SyntaxKind::VoidType, |w| {
                w.token(SyntaxKind::LParen, "(");
                w.raw(SyntaxKind::RParen, ")");
            }),
            Ty::Variant(name) => self.node(SyntaxKind::VariantType, |w| {
                w.token(SyntaxKind::Quote, "'");
                w.raw(SyntaxKind::Identifier, name);
            }),
            Ty::Arrow(types) => self.node(SyntaxKind::CombineType, |w| {
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        w.token(SyntaxKind::Arrow, "->");
                    }
                    if matches!(ty, Ty::Arrow(_)) {
                        w.token(SyntaxKind::LParen, "(");
                        w.ty(ty);
                        w.raw(SyntaxKind::RParen, ")");
                    } else {
                        w.ty(ty);
                    }
                }
            }),
        }
    }

    fn expr(&mut self, expr: &Ex) {
        match expr {
            Ex::Int(text) => self.node(SyntaxKind::IntLiteral, |w| {
                w.token(SyntaxKind::Integer, text)
            }),
            Ex::Float(text) => self.node(SyntaxKind::FloatLiteral, |w| {
                w.token(SyntaxKind::Float, text)
            }),
            Ex::Str(value) => self.node(SyntaxKind::StringLiteral, |w| {
                w.token(SyntaxKind::String, &format!("\"{}\"", value))
            }),
            Ex::Bool(value) => self.node(SyntaxKind::BoolLiteral, |w| {
                w.token(SyntaxKind::Boolean, if *value { "true" } else { "false" })
            }),
            Ex::Ident(name) => self.node(SyntaxKind::IdentExpr, |w| {
                w.token(SyntaxKind::Identifier, name)
            }),
            Ex::Binary(lhs, op, rhs) => self.node(SyntaxKind::BinaryExpr, |w| {
                let kind = match op {
                    '+' => SyntaxKind::Plus,
                    '-' => SyntaxKind::Minus,
                    '*' => SyntaxKind::Star,
                    '/' => SyntaxKind::Slash,
                    _ => SyntaxKind::Error,
                };
                w.expr(lhs);
                w.token(kind, &op.to_string());
                w.expr(rhs);
            }),
            Ex::Paren(inner) => self.node(SyntaxKind::ParenExpr, |w| {
                w.token(SyntaxKind::LParen, "(");
                w.expr(inner);
                w.raw(SyntaxKind::RParen, ")");
            }),
            Ex::Call(callee, args) => self.node(SyntaxKind::FuncCall, |w| {
                w.expr(callee);
                w.raw(SyntaxKind::LParen, "(");
                for (i, (label, arg)) in args.iter().enumerate() {
                    if i > 0 {
                        w.raw(SyntaxKind::Comma, ",");
                    }
                    w.node(SyntaxKind::Argument, |w| {
                        if let Some(label) = label {
                            w.token(SyntaxKind::Identifier, label);
                            w.raw(SyntaxKind::Colon, ":");
                        }
                        w.expr(arg);
                    });
                }
                w.raw(SyntaxKind::RParen, ")");
            }),
        }
    }
}
