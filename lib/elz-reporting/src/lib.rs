use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};
use std::collections::HashMap;

pub use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// Types that can be turned into a diagnostic for a given file.
pub trait IntoDiagnostic {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize>;
}

/// Collects diagnostics for one compilation and renders them.
///
/// Every compilation unit registers its source under a file id; errors raised
/// while building a unit's binding table are thrown against that id.
pub struct DiagnosticContext {
    files: SimpleFiles<String, String>,
    diagnostics: Vec<(usize, Diagnostic<usize>)>,
    file_map: HashMap<String, usize>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            diagnostics: Vec::new(),
            file_map: HashMap::new(),
        }
    }

    /// Register a source file, returning its id.
    /// Adding the same name twice returns the existing id.
    pub fn add_file(&mut self, name: String, source: String) -> usize {
        if let Some(&id) = self.file_map.get(&name) {
            return id;
        }
        let id = self.files.add(name.clone(), source);
        self.file_map.insert(name, id);
        id
    }

    /// Convert and record a diagnostic against `file_id`.
    pub fn throw<D: IntoDiagnostic>(&mut self, diagnostic: D, file_id: usize) {
        self.diagnostics
            .push((file_id, diagnostic.into_diagnostic(file_id)));
    }

    /// Record an already built diagnostic.
    pub fn add_diagnostic(&mut self, file_id: usize, diagnostic: Diagnostic<usize>) {
        self.diagnostics.push((file_id, diagnostic));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|(_, d)| is_error(d))
    }

    /// Whether any error was thrown against `file_id`.
    pub fn has_errors_in(&self, file_id: usize) -> bool {
        self.diagnostics
            .iter()
            .any(|(id, d)| *id == file_id && is_error(d))
    }

    /// Number of error and bug diagnostics, warnings excluded.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|(_, d)| is_error(d)).count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emit all diagnostics to stderr with color support.
    pub fn emit(&self) -> Result<(), codespan_reporting::files::Error> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();

        for (_, diagnostic) in &self.diagnostics {
            term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        }

        Ok(())
    }

    /// Emit all diagnostics to a custom writer.
    pub fn emit_to<W: term::termcolor::WriteColor>(
        &self,
        writer: &mut W,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();

        for (_, diagnostic) in &self.diagnostics {
            term::emit(writer, &config, &self.files, diagnostic)?;
        }

        Ok(())
    }

    /// Render every diagnostic without color, e.g. for test failure output.
    pub fn render(&self) -> String {
        let mut writer = NoColor::new(Vec::new());
        if self.emit_to(&mut writer).is_err() {
            return self.messages().collect::<Vec<_>>().join("\n");
        }
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    /// Top-level messages of all diagnostics, in the order they were thrown.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().map(|(_, d)| d.message.as_str())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic<usize>> {
        self.diagnostics.iter().map(|(_, d)| d)
    }

    pub fn get_file_id(&self, name: &str) -> Option<usize> {
        self.file_map.get(name).copied()
    }

    /// Clear all diagnostics (keeps the files).
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

fn is_error(diagnostic: &Diagnostic<usize>) -> bool {
    matches!(diagnostic.severity, Severity::Error | Severity::Bug)
}

impl Default for DiagnosticContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Duplicate {
        name: &'static str,
        span: std::ops::Range<usize>,
    }

    impl IntoDiagnostic for Duplicate {
        fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
            Diagnostic::error()
                .with_message(format!("binding `{}` already exists", self.name))
                .with_labels(vec![Label::primary(file_id, self.span.clone())])
        }
    }

    #[test]
    fn add_file_is_idempotent() {
        let mut ctx = DiagnosticContext::new();
        let a = ctx.add_file("main.elz".into(), "a = 1".into());
        let b = ctx.add_file("main.elz".into(), "a = 1".into());
        assert_eq!(a, b);
        assert_eq!(ctx.get_file_id("main.elz"), Some(a));
    }

    #[test]
    fn errors_are_tracked_per_file() {
        let mut ctx = DiagnosticContext::new();
        let main = ctx.add_file("main.elz".into(), "a = 1\na = 2".into());
        let other = ctx.add_file("other.elz".into(), "b = 1".into());

        ctx.throw(Duplicate { name: "a", span: 6..7 }, main);

        assert!(ctx.has_errors());
        assert!(ctx.has_errors_in(main));
        assert!(!ctx.has_errors_in(other));
        assert_eq!(
            ctx.messages().collect::<Vec<_>>(),
            vec!["binding `a` already exists"]
        );
    }

    #[test]
    fn warnings_are_not_errors() {
        let mut ctx = DiagnosticContext::new();
        let id = ctx.add_file("main.elz".into(), String::new());
        ctx.add_diagnostic(id, Diagnostic::warning().with_message("flattened signature"));

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.error_count(), 0);
        assert!(!ctx.has_errors());

        ctx.throw(Duplicate { name: "a", span: 0..1 }, id);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.error_count(), 1);
    }

    #[test]
    fn render_contains_message() {
        let mut ctx = DiagnosticContext::new();
        let id = ctx.add_file("main.elz".into(), "a = 1\na = 2".into());
        ctx.throw(Duplicate { name: "a", span: 6..7 }, id);

        let rendered = ctx.render();
        assert!(rendered.contains("binding `a` already exists"));
        assert!(rendered.contains("main.elz"));
    }
}
