//! Node Classifier: turns one block into a typed scene object.
//!
//! Dispatch is declarative: [`BLOCK_KINDS`] maps type codes to the kind of
//! object they construct and [`ATTACHMENT_NAMES`] names the attachment types
//! that are known up front. Every other type code is an attachment named
//! `Type_<code>`.
//!
//! Blocks marked `stripped` are prefab placeholders. They are classified like
//! any other block of their type code, so their counts and labels still show
//! up in the scene.

use log::trace;

use scenegraph_core::{
    identifier::FileId,
    scene::{Attachment, ContainerNode, LinkKind, LinkNode},
};

use crate::{fields::Fields, splitter::Block};

const NAME: &str = "m_Name";
const ACTIVE: &str = "m_IsActive";
const LAYER: &str = "m_Layer";
const COMPONENTS: &str = "m_Component";
const FATHER: &str = "m_Father";
const CHILDREN: &str = "m_Children";
const CLASS_IDENTIFIER: &str = "m_EditorClassIdentifier";

/// Separator between the namespace and the type in a qualified class name.
const NAMESPACE_SEPARATOR: &str = "::";

/// What a block turns into, decided by its type code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Container,
    Link(LinkKind),
    /// An attachment whose name may come from its class identifier.
    Script,
    Attachment,
}

const BLOCK_KINDS: &[(&str, BlockKind)] = &[
    ("1", BlockKind::Container),
    ("4", BlockKind::Link(LinkKind::Transform)),
    ("224", BlockKind::Link(LinkKind::RectTransform)),
    ("114", BlockKind::Script),
];

const ATTACHMENT_NAMES: &[(&str, &str)] = &[
    ("114", "MonoBehaviour"),
    ("223", "Canvas"),
    ("222", "CanvasRenderer"),
    ("328", "VideoPlayer"),
    ("20", "Camera"),
    ("81", "AudioListener"),
];

/// A classified block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Classified {
    Container(ContainerNode),
    Link(LinkNode),
    Attachment(Attachment),
}

fn block_kind(type_code: &str) -> BlockKind {
    BLOCK_KINDS
        .iter()
        .find(|(code, _)| *code == type_code)
        .map(|&(_, kind)| kind)
        .unwrap_or(BlockKind::Attachment)
}

/// Name of an attachment type code from the fixed table, or `Type_<code>`.
pub(crate) fn attachment_type_name(type_code: &str) -> String {
    ATTACHMENT_NAMES
        .iter()
        .find(|(code, _)| *code == type_code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Type_{type_code}"))
}

/// The last segment of a qualified class name, if it has a namespace.
fn unqualified_class_name(class_identifier: &str) -> Option<&str> {
    class_identifier
        .rsplit_once(NAMESPACE_SEPARATOR)
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
}

/// `1` and case-insensitive `true` are true; anything else is false.
fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Classify a block. Missing fields take their defaults; this never fails.
pub(crate) fn classify(block: &Block<'_>) -> Classified {
    let id = FileId::new(block.id());
    let kind = block_kind(block.type_code());
    if block.is_stripped() {
        trace!(id:% = id, type_code = block.type_code(); "Classifying stripped placeholder");
    }
    let fields = Fields::extract(block.body());

    match kind {
        BlockKind::Container => {
            let node = ContainerNode::new(id)
                .with_name(fields.scalar(NAME).unwrap_or_default())
                .with_active(fields.scalar(ACTIVE).is_none_or(parse_flag))
                .with_layer(fields.scalar(LAYER).unwrap_or_default())
                .with_attachment_refs(fields.references(COMPONENTS));
            Classified::Container(node)
        }
        BlockKind::Link(link_kind) => {
            let node = LinkNode::new(id, link_kind)
                .with_parent(fields.reference(FATHER).unwrap_or_else(FileId::none))
                .with_child_ids(fields.references(CHILDREN));
            Classified::Link(node)
        }
        BlockKind::Script => {
            let class_identifier = fields.scalar(CLASS_IDENTIFIER).filter(|raw| !raw.is_empty());
            let type_name = class_identifier
                .and_then(unqualified_class_name)
                .map(str::to_string)
                .unwrap_or_else(|| attachment_type_name(block.type_code()));

            let mut attachment = Attachment::new(id, block.type_code(), type_name);
            if let Some(class_identifier) = class_identifier {
                attachment = attachment.with_class_identifier(class_identifier);
            }
            Classified::Attachment(attachment)
        }
        BlockKind::Attachment => Classified::Attachment(Attachment::new(
            id,
            block.type_code(),
            attachment_type_name(block.type_code()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter;

    fn classify_source(source: &str) -> Classified {
        let block = splitter::split(source).next().expect("one block");
        classify(&block)
    }

    fn container(source: &str) -> ContainerNode {
        match classify_source(source) {
            Classified::Container(node) => node,
            other => panic!("Expected container, got {other:?}"),
        }
    }

    fn attachment(source: &str) -> Attachment {
        match classify_source(source) {
            Classified::Attachment(attachment) => attachment,
            other => panic!("Expected attachment, got {other:?}"),
        }
    }

    #[test]
    fn test_container_fields() {
        let node = container(
            "\
--- !u!1 &100
GameObject:
  m_ObjectHideFlags: 0
  serializedVersion: 6
  m_Component:
  - component: {fileID: 101}
  - component: {fileID: 102}
  m_Layer: 5
  m_Name: Canvas
  m_TagString: Untagged
  m_IsActive: 0
",
        );

        assert_eq!(node.id(), "100");
        assert_eq!(node.name(), "Canvas");
        assert_eq!(node.layer(), "5");
        assert!(!node.is_active());
        assert_eq!(
            node.attachment_refs(),
            &[FileId::new("101"), FileId::new("102")]
        );
    }

    #[test]
    fn test_container_defaults() {
        let node = container("--- !u!1 &7\n");

        assert_eq!(node.name(), "");
        assert!(node.is_active());
        assert_eq!(node.layer(), "");
        assert!(node.attachment_refs().is_empty());
    }

    #[test]
    fn test_active_flag_values() {
        for (value, expected) in [
            ("1", true),
            ("True", true),
            ("true", true),
            ("0", false),
            ("false", false),
            ("yes", false),
            ("", false),
        ] {
            let node = container(&format!("--- !u!1 &1\n  m_IsActive: {value}\n"));
            assert_eq!(node.is_active(), expected, "m_IsActive: {value}");
        }
    }

    #[test]
    fn test_legacy_component_entries() {
        let node = container("--- !u!1 &1\n  m_Component:\n  - 4: {fileID: 400000}\n");
        assert_eq!(node.attachment_refs(), &[FileId::new("400000")]);
    }

    #[test]
    fn test_link_nodes() {
        let source = "\
--- !u!224 &20
RectTransform:
  m_Children:
  - {fileID: 30}
  - {fileID: 31}
  m_Father: {fileID: 10}
";
        match classify_source(source) {
            Classified::Link(link) => {
                assert_eq!(link.kind(), LinkKind::RectTransform);
                assert_eq!(link.parent(), Some(&FileId::new("10")));
                assert_eq!(link.child_ids(), &[FileId::new("30"), FileId::new("31")]);
            }
            other => panic!("Expected link, got {other:?}"),
        }
    }

    #[test]
    fn test_link_without_father_is_root() {
        match classify_source("--- !u!4 &10\nTransform:\n  m_Children: []\n") {
            Classified::Link(link) => {
                assert_eq!(link.kind(), LinkKind::Transform);
                assert_eq!(link.parent(), None);
            }
            other => panic!("Expected link, got {other:?}"),
        }
    }

    #[test]
    fn test_script_with_qualified_class_identifier() {
        let attachment = attachment(
            "--- !u!114 &21\nMonoBehaviour:\n  m_EditorClassIdentifier: Foo.Bar::Baz\n",
        );

        assert_eq!(attachment.type_name(), "Baz");
        assert_eq!(attachment.type_code(), "114");
        assert_eq!(attachment.class_identifier(), Some("Foo.Bar::Baz"));
    }

    #[test]
    fn test_script_with_namespaced_type() {
        let attachment = attachment(
            "--- !u!114 &21\n  m_EditorClassIdentifier: Unity.TextMeshPro::TMPro.TextMeshProUGUI\n",
        );
        assert_eq!(attachment.type_name(), "TMPro.TextMeshProUGUI");
    }

    #[test]
    fn test_script_without_separator_falls_back() {
        let unqualified = attachment("--- !u!114 &1\n  m_EditorClassIdentifier: Plain\n");
        let empty = attachment("--- !u!114 &2\n  m_EditorClassIdentifier: \n");
        let trailing = attachment("--- !u!114 &3\n  m_EditorClassIdentifier: Foo::\n");

        assert_eq!(unqualified.type_name(), "MonoBehaviour");
        assert_eq!(empty.type_name(), "MonoBehaviour");
        assert_eq!(empty.class_identifier(), None);
        assert_eq!(trailing.type_name(), "MonoBehaviour");
    }

    #[test]
    fn test_class_identifier_ignored_for_non_scripts() {
        let attachment = attachment("--- !u!223 &1\n  m_EditorClassIdentifier: A::B\n");
        assert_eq!(attachment.type_name(), "Canvas");
    }

    #[test]
    fn test_table_and_fallback_names() {
        assert_eq!(attachment("--- !u!20 &1\n").type_name(), "Camera");
        assert_eq!(attachment("--- !u!81 &1\n").type_name(), "AudioListener");
        assert_eq!(attachment("--- !u!328 &1\n").type_name(), "VideoPlayer");
        assert_eq!(attachment("--- !u!104 &1\n").type_name(), "Type_104");
    }

    #[test]
    fn test_stripped_attachments_classified() {
        let script = attachment("--- !u!114 &3 stripped\nMonoBehaviour:\n  m_PrefabInstance: {fileID: 9}\n");
        let named = attachment("--- !u!114 &5 stripped\n  m_EditorClassIdentifier: A::B\n");
        let canvas = attachment("--- !u!223 &6 stripped\n");
        let unknown = attachment("--- !u!82 &7 stripped\n");

        assert_eq!(script.type_name(), "MonoBehaviour");
        assert_eq!(named.type_name(), "B");
        assert_eq!(canvas.type_name(), "Canvas");
        assert_eq!(unknown.type_name(), "Type_82");
    }

    #[test]
    fn test_stripped_link_still_classified() {
        assert!(matches!(
            classify_source("--- !u!224 &5 stripped\n"),
            Classified::Link(_)
        ));
    }
}
