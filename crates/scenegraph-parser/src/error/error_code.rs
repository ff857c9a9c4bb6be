//! Error codes for the scenegraph diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Classification errors
//! - `E2xx` - Hierarchy errors

use std::fmt;

use scenegraph_core::scene::AnomalyKind;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Classification Errors (E1xx)
    // =========================================================================
    /// Duplicate identifier.
    ///
    /// Two blocks declare the same identifier. The first block is kept.
    E100,

    // =========================================================================
    // Hierarchy Errors (E2xx)
    // =========================================================================
    /// Reference cycle.
    ///
    /// Following parent links from a container leads back to that container.
    E200,

    /// Detached container.
    ///
    /// The parent link of a container is unknown or owned by no container.
    E201,

    /// Container without a structural link node.
    E202,

    /// Container referencing several structural link nodes.
    E203,

    /// Link node listed as a child by several parents.
    E204,

    /// Parent pointer and child list disagree.
    E205,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "duplicate identifier",
            ErrorCode::E200 => "reference cycle",
            ErrorCode::E201 => "detached container",
            ErrorCode::E202 => "container without link node",
            ErrorCode::E203 => "multiple link nodes",
            ErrorCode::E204 => "shared child link",
            ErrorCode::E205 => "parent mismatch",
        }
    }
}

impl From<AnomalyKind> for ErrorCode {
    fn from(kind: AnomalyKind) -> Self {
        match kind {
            AnomalyKind::DuplicateId => ErrorCode::E100,
            AnomalyKind::Cycle => ErrorCode::E200,
            AnomalyKind::Detached => ErrorCode::E201,
            AnomalyKind::Unlinked => ErrorCode::E202,
            AnomalyKind::MultipleLinks => ErrorCode::E203,
            AnomalyKind::SharedChild => ErrorCode::E204,
            AnomalyKind::ParentMismatch => ErrorCode::E205,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E205.to_string(), "E205");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E200.description(), "reference cycle");
        assert_eq!(ErrorCode::E202.description(), "container without link node");
    }

    #[test]
    fn test_from_anomaly_kind() {
        assert_eq!(ErrorCode::from(AnomalyKind::Cycle), ErrorCode::E200);
        assert_eq!(ErrorCode::from(AnomalyKind::DuplicateId), ErrorCode::E100);
        assert_eq!(ErrorCode::from(AnomalyKind::ParentMismatch), ErrorCode::E205);
    }
}
