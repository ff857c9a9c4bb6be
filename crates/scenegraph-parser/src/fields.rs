//! Per-block field extraction.
//!
//! One pass over a block body produces a small attribute mapping: scalar
//! `key: value` pairs (first occurrence wins) and list entries grouped under
//! the list header they follow. Typed accessors then read from the mapping
//! instead of rescanning the body for every field.

use indexmap::IndexMap;

use scenegraph_core::identifier::FileId;

use crate::{lexer, splitter::Line};

/// The attributes of one block body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Fields<'src> {
    scalars: IndexMap<&'src str, &'src str>,
    lists: IndexMap<&'src str, Vec<&'src str>>,
}

impl<'src> Fields<'src> {
    /// Extract the fields of a block body.
    ///
    /// A key with an empty value opens a list; `- entry` lines attach to the
    /// most recently opened list until a key at the same or a shallower
    /// indentation closes it.
    pub(crate) fn extract(body: &[Line<'src>]) -> Self {
        let mut fields = Self::default();
        let mut open_list: Option<(usize, &'src str)> = None;

        for line in body {
            let text = line.text();

            if let Some(entry) = lexer::list_entry(text) {
                if let Some((_, key)) = open_list {
                    fields.lists.entry(key).or_default().push(entry);
                }
                continue;
            }

            let Some((key, value)) = lexer::key_value(text) else {
                continue;
            };
            fields.scalars.entry(key).or_insert(value);

            let depth = lexer::indent(text);
            if value.is_empty() {
                open_list = Some((depth, key));
            } else if open_list.is_some_and(|(list_depth, _)| depth <= list_depth) {
                open_list = None;
            }
        }

        fields
    }

    /// The value of a scalar field, if present.
    pub(crate) fn scalar(&self, key: &str) -> Option<&'src str> {
        self.scalars.get(key).copied()
    }

    /// The entries of a list field; empty when absent.
    pub(crate) fn list(&self, key: &str) -> &[&'src str] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The identifier referenced by a scalar field such as
    /// `m_Father: {fileID: 42}`.
    pub(crate) fn reference(&self, key: &str) -> Option<FileId> {
        self.scalar(key)
            .and_then(lexer::file_id_ref)
            .map(FileId::new)
    }

    /// The identifiers referenced by the entries of a list field, in order.
    /// Entries without a `fileID` are skipped.
    pub(crate) fn references(&self, key: &str) -> Vec<FileId> {
        self.list(key)
            .iter()
            .filter_map(|entry| lexer::file_id_ref(entry))
            .map(FileId::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter;

    fn fields_of(source: &str) -> Fields<'_> {
        let block = splitter::split(source).next().expect("one block");
        Fields::extract(block.body())
    }

    #[test]
    fn test_scalars_first_wins() {
        let fields = fields_of("--- !u!1 &1\nGameObject:\n  m_Name: First\n  m_Name: Second\n");

        assert_eq!(fields.scalar("m_Name"), Some("First"));
        assert_eq!(fields.scalar("m_Layer"), None);
    }

    #[test]
    fn test_component_list() {
        let source = "\
--- !u!1 &1
GameObject:
  m_Component:
  - component: {fileID: 10}
  - component: {fileID: 11}
  m_Layer: 5
  - component: {fileID: 99}
";
        let fields = fields_of(source);

        assert_eq!(
            fields.references("m_Component"),
            vec![FileId::new("10"), FileId::new("11")]
        );
        assert_eq!(fields.scalar("m_Layer"), Some("5"));
    }

    #[test]
    fn test_nested_keys_keep_list_open() {
        let source = "\
--- !u!114 &1
MonoBehaviour:
  m_Calls:
  - m_Target: {fileID: 3}
    m_MethodName: Play
  - m_Target: {fileID: 4}
  m_Enabled: 1
";
        let fields = fields_of(source);

        assert_eq!(fields.list("m_Calls").len(), 2);
        assert_eq!(fields.scalar("m_MethodName"), Some("Play"));
    }

    #[test]
    fn test_inline_empty_list() {
        let fields = fields_of("--- !u!4 &1\nTransform:\n  m_Children: []\n  m_Father: {fileID: 0}\n");

        assert!(fields.references("m_Children").is_empty());
        assert_eq!(fields.reference("m_Father"), Some(FileId::none()));
    }

    #[test]
    fn test_missing_fields() {
        let fields = fields_of("--- !u!4 &1\n");

        assert_eq!(fields.reference("m_Father"), None);
        assert!(fields.list("m_Children").is_empty());
    }

    #[test]
    fn test_entries_without_file_id_skipped() {
        let source = "--- !u!4 &1\n  m_Children:\n  - {fileID: 2}\n  - garbage\n  - {fileID: 3}\n";
        let fields = fields_of(source);

        assert_eq!(
            fields.references("m_Children"),
            vec![FileId::new("2"), FileId::new("3")]
        );
    }
}
