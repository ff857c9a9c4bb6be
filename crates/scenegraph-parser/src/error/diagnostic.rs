//! The core diagnostic type for the scenegraph error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message pointing into the scene document.
///
/// # Example
///
/// ```text
/// warning[E200]: reference cycle through `Panel`
///   --> LobbyScreen.unity:212:1
///     |
/// 212 | --- !u!224 &2001
///     | ^^^^^^^^^^^^^^^^ cycle enters here
///     |
///     = help: the cyclic subtree is left out of the hierarchy
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a diagnostic that is an error when `strict` is set and a
    /// warning otherwise.
    pub fn escalated(strict: bool, message: impl Into<String>) -> Self {
        Self::new(Severity::for_anomaly(strict), message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E200]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_escalated() {
        assert!(Diagnostic::escalated(true, "x").severity().is_error());
        assert!(Diagnostic::escalated(false, "x").severity().is_warning());
    }

    #[test]
    fn test_diagnostic_labels() {
        let diag = Diagnostic::warning("identifier defined twice")
            .with_label(Span::new(40..56), "duplicate definition")
            .with_secondary_label(Span::new(0..16), "first defined here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("reference cycle through `Panel`").with_code(ErrorCode::E200);

        assert_eq!(
            diag.to_string(),
            "warning[E200]: reference cycle through `Panel`"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("container has no link node");

        assert_eq!(diag.to_string(), "error: container has no link node");
    }

    #[test]
    fn test_diagnostic_with_help() {
        let diag = Diagnostic::warning("detached container")
            .with_help("the parent link is not owned by any container");

        assert_eq!(
            diag.help(),
            Some("the parent link is not owned by any container")
        );
    }
}
