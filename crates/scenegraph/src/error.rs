//! Error types for scenegraph operations.
//!
//! This module provides the main error type [`SceneError`] which wraps
//! the error conditions that can occur while loading, parsing and
//! reporting scene documents.

use std::{fmt, io};

use thiserror::Error;

use scenegraph_parser::error::ParseError;

/// The main error type for scenegraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document text next to the diagnostics so
/// that callers can render them against the offending header lines.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Render(#[from] fmt::Error),

    #[error("{failed} of {total} documents could not be processed")]
    Incomplete { failed: usize, total: usize },
}

impl SceneError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
