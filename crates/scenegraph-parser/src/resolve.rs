//! Reference Resolver: attachment labels for every container.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;

use scenegraph_core::{
    identifier::FileId,
    scene::{Attachment, ContainerNode, LinkNode},
};

/// Resolve the attachment references of every container to type labels.
///
/// Labels keep the order of the container's references. References to
/// attachments yield the attachment's type name, references to link nodes
/// yield the link kind label, and references that resolve to nothing are
/// dropped.
pub(crate) fn resolve_labels(
    containers: &IndexMap<FileId, ContainerNode>,
    links: &IndexMap<FileId, LinkNode>,
    attachments: &IndexMap<FileId, Attachment>,
) -> HashMap<FileId, Vec<String>> {
    containers
        .values()
        .map(|container| {
            let labels = container
                .attachment_refs()
                .iter()
                .filter_map(|reference| {
                    let label = attachments
                        .get(reference)
                        .map(|attachment| attachment.type_name().to_string())
                        .or_else(|| links.get(reference).map(|link| link.kind().label().to_string()));
                    if label.is_none() {
                        trace!(
                            container:% = container.id(),
                            reference:% = reference;
                            "Dangling attachment reference"
                        );
                    }
                    label
                })
                .collect();
            (container.id().clone(), labels)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use scenegraph_core::scene::LinkKind;

    use super::*;

    fn id(raw: &str) -> FileId {
        FileId::new(raw)
    }

    #[test]
    fn test_labels_in_reference_order() {
        let containers = IndexMap::from([(
            id("1"),
            ContainerNode::new(id("1")).with_attachment_refs(vec![id("3"), id("2"), id("4")]),
        )]);
        let links = IndexMap::from([(id("2"), LinkNode::new(id("2"), LinkKind::RectTransform))]);
        let attachments = IndexMap::from([
            (id("3"), Attachment::new(id("3"), "223", "Canvas")),
            (id("4"), Attachment::new(id("4"), "114", "Button")),
        ]);

        let labels = resolve_labels(&containers, &links, &attachments);

        assert_eq!(labels[&id("1")], vec!["Canvas", "RectTransform", "Button"]);
    }

    #[test]
    fn test_dangling_references_omitted() {
        let containers = IndexMap::from([(
            id("1"),
            ContainerNode::new(id("1")).with_attachment_refs(vec![id("404"), id("3"), id("405")]),
        )]);
        let attachments =
            IndexMap::from([(id("3"), Attachment::new(id("3"), "20", "Camera"))]);

        let labels = resolve_labels(&containers, &IndexMap::new(), &attachments);

        assert_eq!(labels[&id("1")], vec!["Camera"]);
    }

    #[test]
    fn test_container_without_refs_has_empty_labels() {
        let containers = IndexMap::from([(id("1"), ContainerNode::new(id("1")))]);

        let labels = resolve_labels(&containers, &IndexMap::new(), &IndexMap::new());

        assert!(labels[&id("1")].is_empty());
    }
}
