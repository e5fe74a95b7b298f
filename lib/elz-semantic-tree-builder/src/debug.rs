//! Debug and printing utilities for binding tables

use std::fmt::Write;

use elz_semantic_tree::{render_signature, Binding, BindingTable, TypeDefine};

/// One binding as a single line, e.g. `pub add x y :: int -> int -> int = x + y`
pub fn format_binding(binding: &Binding) -> String {
    let mut out = String::new();
    if binding.is_export() {
        out.push_str("pub ");
    }
    out.push_str(binding.name());
    for param in binding.params() {
        out.push(' ');
        out.push_str(param);
    }
    if let Some(types) = binding.type_list() {
        let _ = write!(out, " :: {}", render_signature(types));
    }
    let _ = write!(out, " = {}", binding.expr());
    out
}

pub fn format_type_define(type_define: &TypeDefine) -> String {
    let fields: Vec<String> = type_define
        .fields
        .iter()
        .map(|field| format!("{}: {}", field.name.value, field.ty.value))
        .collect();
    let visibility = if type_define.export { "pub " } else { "" };
    format!(
        "{}type {} ({})",
        visibility,
        type_define.name(),
        fields.join(", ")
    )
}

/// The whole table: imports, then type definitions, then bindings
pub fn format_binding_table(table: &BindingTable) -> String {
    let mut out = String::new();
    for import in table.dependencies() {
        let _ = writeln!(out, "import {}", import);
    }
    for type_define in table.type_defines_ordered() {
        let _ = writeln!(out, "{}", format_type_define(type_define));
    }
    for binding in table.bindings() {
        let _ = writeln!(out, "{}", format_binding(binding));
    }
    out
}
