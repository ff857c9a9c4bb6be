//! Scenegraph Core Types
//!
//! This crate provides the foundational types shared by the scenegraph
//! parser, report renderer and command-line tool:
//!
//! - **Identifiers**: Shared, opaque object identifiers ([`identifier::FileId`])
//! - **Scene**: The reconstructed document model ([`scene`] module): container
//!   nodes, structural link nodes, attachments, and the forest linking them.

pub mod identifier;
pub mod scene;
