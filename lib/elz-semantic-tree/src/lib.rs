//! Semantic model of an Elz compilation unit
//!
//! Holds the type representation, bound expressions, and the binding table
//! the code generator queries for everything a unit declares.

pub mod binding;
pub mod error;
pub mod expr;
pub mod program;
pub mod table;
pub mod ty;

pub use binding::Binding;
pub use error::SemanticError;
pub use expr::{Argument, Expr, ExprKind, Operator};
pub use program::{BindingDecl, BindingTypeDecl, Import, Program, TypeDefine, TypeField};
pub use table::BindingTable;
pub use ty::{render_signature, type_of, BackendType, KnownTypes, RegisterPrelude, Type};
