//! Elz Prelude
//!
//! The type names every compilation environment knows without declaring them.
//! Anything a signature names that is neither listed here nor declared by the
//! program is reported as an unknown type.

/// Primitive type name constants
pub mod primitives {
    pub const INT: &str = "int";
    pub const F64: &str = "f64";
    pub const VOID: &str = "void";
    pub const BOOL: &str = "bool";
    pub const STRING: &str = "string";

    /// Built-in generic container
    pub const LIST: &str = "List";

    pub const ALL: &[&str] = &[INT, F64, VOID, BOOL, STRING, LIST];
}
