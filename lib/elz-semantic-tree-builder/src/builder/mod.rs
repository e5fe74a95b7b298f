//! Binding table construction
//!
//! `AstBuilder` turns a syntax tree into a `Program`; `BindingTableBuilder`
//! feeds that program to a fresh binding table and reports failures.

mod ast_builder;
mod tree_builder;

pub use ast_builder::AstBuilder;
pub use tree_builder::BindingTableBuilder;
