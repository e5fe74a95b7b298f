//! Elz Syntax Tree
//!
//! This crate defines the parse tree handed to the semantic core. Trees are
//! built with `rowan`, so they are lossless and immutable, and every node kind
//! the binding adapter dispatches on is a variant of [`SyntaxKind`].
//!
//! # Example
//!
//! ```
//! use elz_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxNode};
//!
//! let mut builder = GreenNodeBuilder::new();
//! builder.start_node(SyntaxKind::ExistType.into());
//! builder.token(SyntaxKind::Identifier.into(), "int");
//! builder.finish_node();
//!
//! let syntax = SyntaxNode::new_root(builder.finish());
//! assert_eq!(syntax.kind(), SyntaxKind::ExistType);
//! ```

pub mod event;

use rowan::Language;

pub use event::{Event, EventSink, TreeBuilder};
pub use rowan::{GreenNodeBuilder, WalkEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // ===== Syntax Nodes (Non-terminals) =====
    Program,
    /// `import std::io`
    ImportDeclaration,
    AccessChain,
    /// `pub add x y = x + y`
    Binding,
    Visibility,
    /// `add :: int -> int -> int`
    BindType,
    /// `type Point (x: int, y: int)`
    TypeDefine,
    TypeField,

    // Type nodes
    ExistType,
    VoidType,
    VariantType,
    CombineType,

    // Expression nodes
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    BoolLiteral,
    IdentExpr,
    BinaryExpr,
    ParenExpr,
    FuncCall,
    Argument,

    // ===== Tokens (Terminals) =====
    // Literals
    Identifier,
    Integer,
    Float,
    String,
    Boolean,

    // Keywords
    Import,
    Type,
    Pub,

    // Braces
    LParen,
    RParen,

    // Punctuation
    Comma,
    Colon,
    ColonColon,
    Equals,
    Arrow,
    Quote,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Trivia
    Whitespace,
    LineComment,

    // Special
    Error,
}

impl SyntaxKind {
    /// Every kind in discriminant order.
    const ALL: &'static [SyntaxKind] = &[
        SyntaxKind::Program,
        SyntaxKind::ImportDeclaration,
        SyntaxKind::AccessChain,
        SyntaxKind::Binding,
        SyntaxKind::Visibility,
        SyntaxKind::BindType,
        SyntaxKind::TypeDefine,
        SyntaxKind::TypeField,
        SyntaxKind::ExistType,
        SyntaxKind::VoidType,
        SyntaxKind::VariantType,
        SyntaxKind::CombineType,
        SyntaxKind::IntLiteral,
        SyntaxKind::FloatLiteral,
        SyntaxKind::StringLiteral,
        SyntaxKind::BoolLiteral,
        SyntaxKind::IdentExpr,
        SyntaxKind::BinaryExpr,
        SyntaxKind::ParenExpr,
        SyntaxKind::FuncCall,
        SyntaxKind::Argument,
        SyntaxKind::Identifier,
        SyntaxKind::Integer,
        SyntaxKind::Float,
        SyntaxKind::String,
        SyntaxKind::Boolean,
        SyntaxKind::Import,
        SyntaxKind::Type,
        SyntaxKind::Pub,
        SyntaxKind::LParen,
        SyntaxKind::RParen,
        SyntaxKind::Comma,
        SyntaxKind::Colon,
        SyntaxKind::ColonColon,
        SyntaxKind::Equals,
        SyntaxKind::Arrow,
        SyntaxKind::Quote,
        SyntaxKind::Plus,
        SyntaxKind::Minus,
        SyntaxKind::Star,
        SyntaxKind::Slash,
        SyntaxKind::Whitespace,
        SyntaxKind::LineComment,
        SyntaxKind::Error,
    ];

    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::LineComment)
    }

    /// Node kinds that produce an expression when they complete.
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::BoolLiteral
                | SyntaxKind::IdentExpr
                | SyntaxKind::BinaryExpr
                | SyntaxKind::ParenExpr
                | SyntaxKind::FuncCall
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElzLanguage;

impl Language for ElzLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::ALL
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ElzLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ElzLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ElzLanguage>;
