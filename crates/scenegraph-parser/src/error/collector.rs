//! Collector for accumulating diagnostics during a parse.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so one parse can report every anomaly instead of
/// stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If any error was emitted, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns the warnings, in emission order.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("reference cycle"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_warnings_returned() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].message(), "warning 2");
    }

    #[test]
    fn test_collector_finish_with_errors_keeps_all() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("detached container")
                .with_code(ErrorCode::E201)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("shared child"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "detached container");
    }
}
