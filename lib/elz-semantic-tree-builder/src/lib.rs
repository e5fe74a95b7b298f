//! Binding table builder for the Elz language
//!
//! This crate turns a unit's syntax tree into its binding table:
//! - `builder::AstBuilder` walks the tree in post-order and assembles a
//!   `Program` of imports, bindings, signatures and type definitions
//! - `builder::BindingTableBuilder` populates a `BindingTable` from that
//!   program and throws every failure into the diagnostic context
//!
//! # Usage
//!
//! ```ignore
//! use elz_semantic_tree_builder::{BindingTableBuilder, BuildConfig};
//!
//! let builder = BindingTableBuilder::new(BuildConfig::default());
//! let table = builder.build(&syntax, &mut diagnostics, file_id);
//! ```

pub mod builder;
mod config;
mod debug;
pub mod syntax;

pub use builder::{AstBuilder, BindingTableBuilder};
pub use config::BuildConfig;
pub use debug::format_binding_table;
