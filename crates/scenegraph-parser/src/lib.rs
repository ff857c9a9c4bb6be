//! # Scenegraph Parser
//!
//! Tolerant parser for block-structured scene documents. This crate turns
//! document text into a [`Scene`]: classified objects, attachment labels per
//! container, and the reconstructed container hierarchy.
//!
//! ## Usage
//!
//! ```
//! # use scenegraph_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! --- !u!1 &1
//! GameObject:
//!   m_Name: Canvas
//!   m_Component:
//!   - component: {fileID: 2}
//! --- !u!224 &2
//! RectTransform:
//!   m_Father: {fileID: 0}
//! ";
//!
//!     let scene = parse(source, ParseConfig::default())?;
//!     assert_eq!(scene.roots().len(), 1);
//!     Ok(())
//! }
//! ```

mod assemble;
mod classify;
pub mod error;
mod fields;
mod hierarchy;
mod lexer;
mod resolve;
mod span;
mod splitter;

pub use span::Span;

use scenegraph_core::scene::{HierarchySource, Scene};

use assemble::Assembler;
use error::ParseError;

/// Configuration for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseConfig {
    hierarchy_source: HierarchySource,
    strict: bool,
}

impl ParseConfig {
    /// Create a new ParseConfig with the given parent resolution and strictness
    pub fn new(hierarchy_source: HierarchySource, strict: bool) -> Self {
        Self {
            hierarchy_source,
            strict,
        }
    }

    /// Which declaration decides the parent of a non-root container.
    pub fn hierarchy_source(&self) -> HierarchySource {
        self.hierarchy_source
    }

    /// Whether hierarchy anomalies fail the parse.
    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Parse a scene document.
///
/// The pipeline runs in four steps:
///
/// 1. **Split** - Segment the text into header-delimited blocks
/// 2. **Classify** - Turn blocks into containers, link nodes and attachments
/// 3. **Resolve** - Label every container with its attachments' type names
/// 4. **Link** - Rebuild the container forest from the link nodes
///
/// Malformed blocks and dangling references are skipped silently. Duplicate
/// identifiers and hierarchy anomalies are logged as warnings, or returned
/// as a [`ParseError`] when [`ParseConfig::strict`] is set.
pub fn parse(source: &str, config: ParseConfig) -> Result<Scene, ParseError> {
    Assembler::new(config, source).build()
}
