//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// Whether a label marks the block a diagnostic is about or another block
/// involved in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// The subject block, e.g. the container whose parent chain loops.
    Subject,
    /// A related block, e.g. the first definition of a duplicated identifier
    /// or the rejected parent of a node.
    Related,
}

/// A labeled span in the scene document.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    role: Role,
}

impl Label {
    fn with_role(role: Role, span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role,
        }
    }

    /// Label the subject block of a diagnostic.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(Role::Subject, span, message)
    }

    /// Label a related block.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(Role::Related, span, message)
    }

    /// The header span of the labeled block.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for the subject block's label.
    pub fn is_primary(&self) -> bool {
        self.role == Role::Subject
    }

    /// Returns `true` for a related block's label.
    pub fn is_secondary(&self) -> bool {
        self.role == Role::Related
    }
}
