//! Syntax tree utilities
//!
//! Helper functions for reading declarations out of syntax nodes and
//! computing their spans.

mod helpers;

pub use helpers::*;
