//! How hard a scene diagnostic fails.

use std::fmt;

/// The severity of a diagnostic.
///
/// Every diagnostic the parser produces is recoverable. Whether it is
/// reported as a [`Severity::Warning`] or escalated to a
/// [`Severity::Error`] is decided by the strict-mode setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Fails the parse when the collector finishes.
    Error,

    /// Reported, but the scene is still produced.
    Warning,
}

impl Severity {
    /// Severity of a structural anomaly under the given strict-mode setting.
    pub fn for_anomaly(strict: bool) -> Self {
        if strict { Self::Error } else { Self::Warning }
    }

    /// Returns `true` if a diagnostic of this severity fails the parse.
    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }

    /// Returns `true` if the scene is still produced despite the diagnostic.
    pub fn is_warning(&self) -> bool {
        *self == Self::Warning
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_mode_escalates() {
        assert_eq!(Severity::for_anomaly(true), Severity::Error);
        assert_eq!(Severity::for_anomaly(false), Severity::Warning);
        assert!(Severity::for_anomaly(true).is_error());
        assert!(Severity::for_anomaly(false).is_warning());
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
