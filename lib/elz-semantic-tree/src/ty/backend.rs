use std::fmt;

/// Token the IR builder uses for a lowered type.
///
/// Sizes are fixed; no target gets a narrower integer or float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// 64-bit integer
    I64,
    /// 64-bit IEEE float
    F64,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendType::I64 => write!(f, "i64"),
            BackendType::F64 => write!(f, "double"),
        }
    }
}
