//! Object identifiers as shared, immutable string tokens.
//!
//! Scene documents cross-reference their objects through opaque numeric
//! tokens (`&12345`, `{fileID: 12345}`). Those tokens are never interpreted
//! arithmetically, so [`FileId`] keeps the raw text. The text lives in an
//! `Arc<str>`, which makes clones a reference-count bump and frees the
//! token together with the last scene that holds it.

use std::{fmt, sync::Arc};

/// Raw token used by documents to say "no object".
const NONE_TOKEN: &str = "0";

/// Opaque, document-unique object identifier.
///
/// # Examples
///
/// ```
/// use scenegraph_core::identifier::FileId;
///
/// let transform = FileId::new("1843201");
/// assert_eq!(transform, "1843201");
/// assert!(!transform.is_none());
/// assert!(FileId::none().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Creates a `FileId` from its raw token.
    ///
    /// Surrounding whitespace is not part of the identifier.
    pub fn new(raw: &str) -> Self {
        Self(Arc::from(raw.trim()))
    }

    /// The sentinel identifier (`0`) meaning "no object".
    pub fn none() -> Self {
        Self::new(NONE_TOKEN)
    }

    /// Returns `true` if this is the [`FileId::none`] sentinel.
    pub fn is_none(&self) -> bool {
        self.as_str() == NONE_TOKEN
    }

    /// Returns `None` for the sentinel and `Some(self)` otherwise.
    pub fn non_sentinel(&self) -> Option<&Self> {
        if self.is_none() { None } else { Some(self) }
    }

    /// The raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FileId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FileId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
