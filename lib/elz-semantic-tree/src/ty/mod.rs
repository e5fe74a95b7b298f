mod backend;
mod known;

pub use backend::BackendType;
pub use known::{KnownTypes, RegisterPrelude};

use std::fmt;

use elz_prelude::primitives;

use crate::expr::{Expr, ExprKind};

/// A type as it appears in a declared signature.
///
/// Function types are not a variant: a curried signature such as
/// `int -> int -> int` is stored as the ordered list `[Int, Int, Int]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A type defined elsewhere (prelude or user-declared), identified by name
    Existing(String),
    /// The no-value type
    Void,
    /// A type variable such as `'a`
    Variant(String),
    /// 64-bit integer
    Int,
    /// 64-bit float
    Float,
}

impl Type {
    /// Build the type an existing-type name denotes.
    ///
    /// `int`, `f64` and `void` map onto their dedicated variants so that no
    /// `Existing` value ever shares a backend representation with them.
    pub fn from_name(name: &str) -> Self {
        match name {
            primitives::INT => Type::Int,
            primitives::F64 => Type::Float,
            primitives::VOID => Type::Void,
            _ => Type::Existing(name.to_string()),
        }
    }

    pub fn variant(name: impl Into<String>) -> Self {
        Type::Variant(name.into())
    }

    /// The backend token for this type, if it has one yet.
    pub fn backend_type(&self) -> Option<BackendType> {
        match self {
            Type::Int => Some(BackendType::I64),
            Type::Float => Some(BackendType::F64),
            Type::Existing(_) | Type::Void | Type::Variant(_) => None,
        }
    }

    /// Name that must resolve in the compilation environment, if any
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            Type::Existing(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Existing(name) => write!(f, "{}", name),
            Type::Void => write!(f, "{}", primitives::VOID),
            Type::Variant(name) => write!(f, "'{}", name),
            Type::Int => write!(f, "{}", primitives::INT),
            Type::Float => write!(f, "{}", primitives::F64),
        }
    }
}

/// Render a curried signature, e.g. `int -> int -> int`
pub fn render_signature(types: &[Type]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Type of a literal expression.
///
/// # Panics
///
/// Panics for anything but integer/float literals and argument wrappers around
/// them. Callers at this layer must already know the expression is a literal.
pub fn type_of(expr: &Expr) -> Type {
    match &expr.kind {
        ExprKind::Arg(arg) => type_of(&arg.expr),
        ExprKind::Int(_) => Type::Int,
        ExprKind::Float(_) => Type::Float,
        other => panic!("you can't use expression `{:?}` to get type directly", other),
    }
}
