//! Elz Test Suite
//!
//! A fluent test API for the Elz binding core.
//!
//! # Example
//!
//! ```
//! use elz_test_suite::*;
//!
//! Test::new(
//!     Source::new()
//!         .with(bind_type("add", arrow([exist("int"), exist("int"), exist("int")])))
//!         .with(binding("add", &["x", "y"], binary(ident("x"), '+', ident("y")))),
//! )
//! .expect(Compiles)
//! .expect(
//!     Binding::new("add")
//!         .has(Property::Params(&["x", "y"]))
//!         .has(Property::Signature("int -> int -> int")),
//! );
//! ```
//!
//! # Units
//!
//! Tests may hold several compilation units. Expectations about tables look
//! at the first unit unless pointed elsewhere with `in_unit`:
//!
//! ```
//! use elz_test_suite::*;
//!
//! Test::with_units([
//!     ("lib.elz", Source::new().with(binding("x", &[], int(1)).exported())),
//!     ("main.elz", Source::new().with(binding("x", &[], int(2)))),
//! ])
//! .expect(Compiles)
//! .expect(ExportLookup::found("x"))
//! .expect(ExportLookup::missing("x").in_unit("main.elz"));
//! ```

mod source;

pub use source::*;

use elz_compiler::{BuildConfig, Compilation};
use elz_semantic_tree::{render_signature, BindingTable, SemanticError};
use elz_semantic_tree_builder::format_binding_table;

/// Test context containing compilation results
pub struct TestContext {
    pub compilation: Compilation,
}

impl TestContext {
    pub fn has_errors(&self) -> bool {
        self.compilation.has_errors()
    }

    /// The binding table of `unit`, or of the first unit
    pub fn table(&self, unit: Option<&str>) -> Result<&BindingTable, String> {
        let unit = match unit {
            Some(name) => self
                .compilation
                .unit(name)
                .ok_or_else(|| format!("Unit '{}' not found", name))?,
            None => self
                .compilation
                .units()
                .first()
                .ok_or_else(|| "Test has no units".to_string())?,
        };
        unit.binding_table()
            .ok_or_else(|| format!("Unit '{}' has no binding table", unit.name()))
    }

    fn messages(&self) -> Vec<&str> {
        self.compilation.diagnostics().messages().collect()
    }
}

/// A test case that can be run against the binding core
pub struct Test {
    units: Vec<(String, Source)>,
    config: BuildConfig,
    context: Option<TestContext>,
}

impl Test {
    /// Create a new test from a single source
    pub fn new(source: Source) -> Self {
        Self::with_units([("test.elz", source)])
    }

    /// Create a test from multiple units
    pub fn with_units<'a>(units: impl IntoIterator<Item = (&'a str, Source)>) -> Self {
        Test {
            units: units
                .into_iter()
                .map(|(name, source)| (name.to_string(), source))
                .collect(),
            config: BuildConfig::default(),
            context: None,
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self.context = None;
        self
    }

    /// Compile the test units and store the result
    fn compile(&mut self) -> &TestContext {
        let units = &self.units;
        let config = &self.config;
        self.context.get_or_insert_with(|| {
            let mut builder = Compilation::builder().with_config(config.clone());
            for (name, source) in units {
                let (text, syntax) = source.render();
                builder = builder.add_unit(name.clone(), text, syntax);
            }
            TestContext {
                compilation: builder.build(),
            }
        })
    }

    /// Apply an expectation to this test
    pub fn expect<E: Expectable>(mut self, expectation: E) -> Self {
        let ctx = self.compile();
        if let Err(e) = expectation.check(ctx) {
            // Emit diagnostics for context
            if !ctx.compilation.diagnostics().is_empty() {
                eprintln!("\n--- Compiler Diagnostics ---");
                ctx.compilation.diagnostics().emit().ok();
            }
            for unit in ctx.compilation.units() {
                if let Some(table) = unit.binding_table() {
                    eprintln!("\n--- {} ---\n{}", unit.name(), format_binding_table(table));
                }
            }
            panic!("Expectation failed: {}", e);
        }
        self
    }
}

/// Trait for test expectations
pub trait Expectable {
    fn check(&self, ctx: &TestContext) -> Result<(), String>;
}

/// Expects compilation to succeed with no errors
pub struct Compiles;

impl Expectable for Compiles {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.has_errors() {
            Err(format!(
                "Expected compilation to succeed, but got {} error(s): {:?}",
                ctx.compilation.diagnostics().error_count(),
                ctx.messages()
            ))
        } else {
            Ok(())
        }
    }
}

/// Expects compilation to fail with an error containing a specific message
pub struct HasError(pub &'static str);

impl Expectable for HasError {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if !ctx.has_errors() {
            return Err("Expected compilation to fail with an error, but it succeeded".to_string());
        }

        let messages = ctx.messages();
        if messages.iter().any(|message| message.contains(self.0)) {
            Ok(())
        } else {
            Err(format!(
                "Expected an error containing '{}', but got: {:?}",
                self.0, messages
            ))
        }
    }
}

/// Expects compilation to fail with exactly N errors
pub struct HasErrorCount(pub usize);

impl Expectable for HasErrorCount {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let actual = ctx.compilation.diagnostics().error_count();
        if actual == self.0 {
            Ok(())
        } else {
            Err(format!("Expected {} error(s), but got {}", self.0, actual))
        }
    }
}

/// Expects compilation to fail (with any error)
pub struct Fails;

impl Expectable for Fails {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.has_errors() {
            Ok(())
        } else {
            Err("Expected compilation to fail, but it succeeded".to_string())
        }
    }
}

/// Expects one unit to have built (or not built) its binding table
pub struct UnitBuilds {
    unit: &'static str,
    builds: bool,
}

impl UnitBuilds {
    pub fn yes(unit: &'static str) -> Self {
        UnitBuilds { unit, builds: true }
    }

    pub fn no(unit: &'static str) -> Self {
        UnitBuilds {
            unit,
            builds: false,
        }
    }
}

impl Expectable for UnitBuilds {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let unit = ctx
            .compilation
            .unit(self.unit)
            .ok_or_else(|| format!("Unit '{}' not found", self.unit))?;
        let errors_here = ctx.compilation.diagnostics().has_errors_in(unit.file_id());
        match (self.builds, unit.is_valid(), errors_here) {
            (true, true, false) | (false, false, true) => Ok(()),
            (true, _, _) => Err(format!("Expected unit '{}' to build", self.unit)),
            (false, _, _) => Err(format!("Expected unit '{}' to fail", self.unit)),
        }
    }
}

/// Properties of a binding
#[derive(Debug, Clone)]
pub enum Property {
    /// Parameter names in order
    Params(&'static [&'static str]),
    /// Rendered type list, e.g. `"int -> int -> int"`
    Signature(&'static str),
    /// No signature attached
    Unsigned,
    Exported(bool),
    /// Rendered body expression
    Body(&'static str),
    /// Names called in the body, in source order
    Calls(&'static [&'static str]),
}

/// Binding expectation with chainable property checks
pub struct Binding {
    name: String,
    unit: Option<String>,
    properties: Vec<Property>,
}

impl Binding {
    pub fn new(name: &str) -> Self {
        Binding {
            name: name.to_string(),
            unit: None,
            properties: Vec::new(),
        }
    }

    pub fn in_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Assert the binding has a specific property
    pub fn has(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

impl Expectable for Binding {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let table = ctx.table(self.unit.as_deref())?;
        let binding = table
            .get_binding(&self.name)
            .map_err(|e| format!("Binding '{}' not found: {}", self.name, e))?;

        for property in &self.properties {
            match property {
                Property::Params(expected) => {
                    if binding.params() != *expected {
                        return Err(format!(
                            "Binding '{}' has params {:?}, expected {:?}",
                            self.name,
                            binding.params(),
                            expected
                        ));
                    }
                }
                Property::Signature(expected) => {
                    let actual = binding.type_list().map(render_signature);
                    if actual.as_deref() != Some(*expected) {
                        return Err(format!(
                            "Binding '{}' has signature {:?}, expected {:?}",
                            self.name, actual, expected
                        ));
                    }
                }
                Property::Unsigned => {
                    if let Some(types) = binding.type_list() {
                        return Err(format!(
                            "Binding '{}' has signature '{}', expected none",
                            self.name,
                            render_signature(types)
                        ));
                    }
                }
                Property::Exported(expected) => {
                    if binding.is_export() != *expected {
                        return Err(format!(
                            "Binding '{}' has export = {}, expected {}",
                            self.name,
                            binding.is_export(),
                            expected
                        ));
                    }
                }
                Property::Body(expected) => {
                    let actual = binding.expr().to_string();
                    if actual != *expected {
                        return Err(format!(
                            "Binding '{}' has body '{}', expected '{}'",
                            self.name, actual, expected
                        ));
                    }
                }
                Property::Calls(expected) => {
                    let actual = binding.expr().callees();
                    if actual != *expected {
                        return Err(format!(
                            "Binding '{}' calls {:?}, expected {:?}",
                            self.name, actual, expected
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Expects `get_binding` to fail for a name
pub struct NoBinding(pub &'static str);

impl Expectable for NoBinding {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        match ctx.table(None)?.get_binding(self.0) {
            Err(SemanticError::NoSuchBinding { .. }) => Ok(()),
            Err(e) => Err(format!("Expected no such binding '{}', got: {}", self.0, e)),
            Ok(_) => Err(format!("Expected no binding '{}', but found one", self.0)),
        }
    }
}

/// Expects `get_export_binding` to succeed or fail for a name
pub struct ExportLookup {
    name: &'static str,
    found: bool,
    unit: Option<&'static str>,
}

impl ExportLookup {
    pub fn found(name: &'static str) -> Self {
        ExportLookup {
            name,
            found: true,
            unit: None,
        }
    }

    pub fn missing(name: &'static str) -> Self {
        ExportLookup {
            name,
            found: false,
            unit: None,
        }
    }

    pub fn in_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }
}

impl Expectable for ExportLookup {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let result = ctx.table(self.unit)?.get_export_binding(self.name);
        match (self.found, result) {
            (true, Ok(_)) => Ok(()),
            (false, Err(SemanticError::NoExportBinding { .. })) => Ok(()),
            (true, Err(e)) => Err(format!("Expected export '{}': {}", self.name, e)),
            (false, Err(e)) => Err(format!(
                "Expected no export binding '{}', got: {}",
                self.name, e
            )),
            (false, Ok(_)) => Err(format!(
                "Expected '{}' not to be exported, but it was",
                self.name
            )),
        }
    }
}

/// Expects the unit's import list to equal the given paths
pub struct Dependencies(pub &'static [&'static str]);

impl Expectable for Dependencies {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let actual = ctx.table(None)?.dependencies();
        if actual == self.0 {
            Ok(())
        } else {
            Err(format!(
                "Expected dependencies {:?}, got {:?}",
                self.0, actual
            ))
        }
    }
}

/// Type definition expectation with field checks
pub struct TypeDefined {
    name: &'static str,
    fields: Vec<(&'static str, &'static str)>,
    exported: Option<bool>,
}

impl TypeDefined {
    pub fn new(name: &'static str) -> Self {
        TypeDefined {
            name,
            fields: Vec::new(),
            exported: None,
        }
    }

    /// Assert a field exists with the given rendered type
    pub fn with_field(mut self, field: &'static str, ty: &'static str) -> Self {
        self.fields.push((field, ty));
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = Some(exported);
        self
    }
}

impl Expectable for TypeDefined {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let define = ctx
            .table(None)?
            .get_type_define(self.name)
            .map_err(|e| format!("Type '{}' not found: {}", self.name, e))?;

        for (field, expected) in &self.fields {
            let actual = define
                .field(field)
                .map(|f| f.ty.value.to_string())
                .ok_or_else(|| format!("Type '{}' has no field '{}'", self.name, field))?;
            if actual != *expected {
                return Err(format!(
                    "Field '{}.{}' has type '{}', expected '{}'",
                    self.name, field, actual, expected
                ));
            }
        }

        if let Some(expected) = self.exported {
            if define.export != expected {
                return Err(format!(
                    "Type '{}' has export = {}, expected {}",
                    self.name, define.export, expected
                ));
            }
        }

        Ok(())
    }
}
