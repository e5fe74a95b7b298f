//! # Elz Compiler
//!
//! High-level compilation API for the Elz language. A `Compilation` owns one
//! binding table per compilation unit.
//!
//! ## Example
//!
//! ```ignore
//! use elz_compiler::Compilation;
//!
//! let compilation = Compilation::builder()
//!     .add_unit("main.elz", main_source, main_syntax)
//!     .add_unit("math.elz", math_source, math_syntax)
//!     .build();
//!
//! if compilation.has_errors() {
//!     compilation.diagnostics().emit().unwrap();
//!     std::process::exit(1);
//! }
//!
//! if let Some(table) = compilation.binding_table("main.elz") {
//!     let main = table.get_export_binding("main")?;
//! }
//! ```

mod builder;
mod compilation;
mod unit;

pub use builder::CompilationBuilder;
pub use compilation::Compilation;
pub use unit::CompilationUnit;

// Re-export commonly used types from dependencies
pub use elz_reporting::{Diagnostic, DiagnosticContext, IntoDiagnostic, Label, Severity};
pub use elz_semantic_tree::BindingTable;
pub use elz_semantic_tree_builder::BuildConfig;
