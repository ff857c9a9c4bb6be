//! The three kinds of objects a scene document is made of.

use std::fmt;

use crate::identifier::FileId;

/// An object that owns a name, flags, and references to its attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNode {
    id: FileId,
    name: String,
    active: bool,
    layer: String,
    attachment_refs: Vec<FileId>,
}

impl ContainerNode {
    /// Creates a container with default fields: empty name and layer, active,
    /// and no attachment references.
    pub fn new(id: FileId) -> Self {
        Self {
            id,
            name: String::new(),
            active: true,
            layer: String::new(),
            attachment_refs: Vec::new(),
        }
    }

    /// Sets the declared name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the layer tag.
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Sets the link and attachment references, in declaration order.
    pub fn with_attachment_refs(mut self, refs: Vec<FileId>) -> Self {
        self.attachment_refs = refs;
        self
    }

    /// The container's identifier.
    pub fn id(&self) -> &FileId {
        &self.id
    }

    /// The declared name. May be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the container is active. Defaults to `true`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The layer tag. May be empty.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Identifiers of the link node and attachments this container owns, in
    /// declaration order. Entries may dangle.
    pub fn attachment_refs(&self) -> &[FileId] {
        &self.attachment_refs
    }
}

/// Variant of a structural link node.
///
/// Both variants behave identically; only the label differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Transform,
    RectTransform,
}

impl LinkKind {
    /// Label emitted when a container's attachment list references this link.
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Transform => "Transform",
            LinkKind::RectTransform => "RectTransform",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The object carrying parent/child relationships for a container.
///
/// A link node does not know which container owns it; ownership is found by
/// resolving container attachment references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    id: FileId,
    kind: LinkKind,
    parent: FileId,
    child_ids: Vec<FileId>,
}

impl LinkNode {
    /// Creates a link node with the sentinel parent and no children.
    pub fn new(id: FileId, kind: LinkKind) -> Self {
        Self {
            id,
            kind,
            parent: FileId::none(),
            child_ids: Vec::new(),
        }
    }

    /// Sets the parent link; the sentinel means "no parent".
    pub fn with_parent(mut self, parent: FileId) -> Self {
        self.parent = parent;
        self
    }

    /// Sets the child link identifiers, in declaration order.
    pub fn with_child_ids(mut self, child_ids: Vec<FileId>) -> Self {
        self.child_ids = child_ids;
        self
    }

    /// The link node's identifier.
    pub fn id(&self) -> &FileId {
        &self.id
    }

    /// Whether this is a plain or a rect transform.
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// The declared parent link, or `None` for the sentinel.
    pub fn parent(&self) -> Option<&FileId> {
        self.parent.non_sentinel()
    }

    /// Child link identifiers in declaration order.
    pub fn child_ids(&self) -> &[FileId] {
        &self.child_ids
    }
}

/// A typed payload with no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    id: FileId,
    type_code: String,
    type_name: String,
    class_identifier: Option<String>,
}

impl Attachment {
    /// Creates an attachment with its raw type code and resolved type name.
    pub fn new(id: FileId, type_code: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_code: type_code.into(),
            type_name: type_name.into(),
            class_identifier: None,
        }
    }

    /// Records the qualified class identifier of a script attachment.
    pub fn with_class_identifier(mut self, class_identifier: impl Into<String>) -> Self {
        self.class_identifier = Some(class_identifier.into());
        self
    }

    /// The attachment's identifier.
    pub fn id(&self) -> &FileId {
        &self.id
    }

    /// The raw type code from the block header.
    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    /// Human-readable type name resolved at classification time.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The raw class identifier of a script attachment, if one was declared.
    pub fn class_identifier(&self) -> Option<&str> {
        self.class_identifier.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_defaults() {
        let node = ContainerNode::new(FileId::new("1"));

        assert_eq!(node.name(), "");
        assert!(node.is_active());
        assert_eq!(node.layer(), "");
        assert!(node.attachment_refs().is_empty());
    }

    #[test]
    fn test_link_default_parent_is_none() {
        let link = LinkNode::new(FileId::new("10"), LinkKind::Transform);

        assert_eq!(link.parent(), None);
        assert!(link.child_ids().is_empty());
    }

    #[test]
    fn test_link_parent() {
        let link = LinkNode::new(FileId::new("20"), LinkKind::RectTransform)
            .with_parent(FileId::new("10"));

        assert_eq!(link.parent(), Some(&FileId::new("10")));
        assert_eq!(link.kind().label(), "RectTransform");
    }
}
