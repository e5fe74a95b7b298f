//! Errors raised while building and querying a binding table

use elz_reporting::{Diagnostic, IntoDiagnostic, Label};
use elz_span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("binding `{name}` already exists")]
    BindingAlreadyExists {
        name: String,
        span: Span,
        original_span: Span,
    },

    #[error("no such binding `{name}`")]
    NoSuchBinding { name: String, span: Option<Span> },

    /// The binding may exist but is not exported
    #[error("no export binding `{name}`")]
    NoExportBinding { name: String },

    /// `original_span` is `None` when the name belongs to the environment
    #[error("type `{name}` already exists")]
    TypeAlreadyExists {
        name: String,
        span: Span,
        original_span: Option<Span>,
    },

    #[error("no such type `{name}`")]
    NoSuchType { name: String },

    #[error("unknown type `{name}`")]
    UnknownType { name: String, span: Span },

    #[error("binding declaration has no name")]
    MissingBindingName { span: Span },

    #[error("binding `{name}` has no body")]
    MissingBindingBody { name: String, span: Span },

    /// Fields hold a single value type; arrows are only allowed in signatures
    #[error("field `{name}` cannot have a function type")]
    FunctionFieldType { name: String, span: Span },

    #[error("invalid {kind} literal `{text}`")]
    InvalidLiteral {
        kind: &'static str,
        text: String,
        span: Span,
    },
}

impl SemanticError {
    /// Where the error points in source, if it came from a declaration
    pub fn span(&self) -> Option<Span> {
        match self {
            SemanticError::BindingAlreadyExists { span, .. }
            | SemanticError::TypeAlreadyExists { span, .. }
            | SemanticError::UnknownType { span, .. }
            | SemanticError::MissingBindingName { span }
            | SemanticError::MissingBindingBody { span, .. }
            | SemanticError::FunctionFieldType { span, .. }
            | SemanticError::InvalidLiteral { span, .. } => Some(span.clone()),
            SemanticError::NoSuchBinding { span, .. } => span.clone(),
            SemanticError::NoExportBinding { .. } | SemanticError::NoSuchType { .. } => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SemanticError::BindingAlreadyExists { .. } => "redefined here",
            SemanticError::NoSuchBinding { .. } => "signature for an unbound name",
            SemanticError::NoExportBinding { .. } => "not exported",
            SemanticError::TypeAlreadyExists { .. } => "redefined here",
            SemanticError::NoSuchType { .. } => "not defined",
            SemanticError::UnknownType { .. } => "not found in this compilation",
            SemanticError::MissingBindingName { .. } => "expected a name before `=`",
            SemanticError::MissingBindingBody { .. } => "expected an expression after `=`",
            SemanticError::FunctionFieldType { .. } => "expected a single type",
            SemanticError::InvalidLiteral { .. } => "cannot be represented",
        }
    }
}

impl IntoDiagnostic for SemanticError {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let mut labels = Vec::new();
        if let Some(span) = self.span() {
            labels.push(Label::primary(file_id, span).with_message(self.label()));
        }

        match self {
            SemanticError::BindingAlreadyExists { original_span, .. }
            | SemanticError::TypeAlreadyExists {
                original_span: Some(original_span),
                ..
            } => {
                labels.push(
                    Label::secondary(file_id, original_span.clone())
                        .with_message("first defined here"),
                );
            }
            _ => {}
        }

        let diagnostic = Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(labels);

        match self {
            SemanticError::TypeAlreadyExists {
                original_span: None,
                ..
            } => diagnostic.with_notes(vec![
                "this name is provided by the compilation environment".to_string(),
            ]),
            SemanticError::UnknownType { .. } => diagnostic.with_notes(vec![
                "types must be primitives or defined with `type`".to_string(),
            ]),
            _ => diagnostic,
        }
    }
}
