//! Error and diagnostic system for the scenegraph parser.
//!
//! Scene documents are parsed tolerantly: malformed headers, missing fields
//! and dangling references never produce diagnostics. What does get reported
//! are structural anomalies in the reconstructed hierarchy and duplicate
//! identifiers. By default these are warnings; in strict mode they are
//! errors and parsing fails with a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use scenegraph_parser::error::{Diagnostic, ErrorCode};
//! # use scenegraph_parser::Span;
//!
//! let diag = Diagnostic::warning("identifier `&1843` is defined multiple times")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(120..138), "duplicate definition")
//!     .with_secondary_label(Span::new(0..18), "first defined here")
//!     .with_help("the first definition is kept");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
