//! The reconstructed parent/child forest and the anomalies found on the way.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::FileId;

/// Which declaration decides the parent of a non-root node when a
/// document's parent pointers and child lists disagree.
///
/// Root status is always decided by the parent pointer.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchySource {
    /// The link node's own parent pointer wins (default).
    #[default]
    ParentPointer,
    /// The first child list, in document order, naming the node wins.
    ChildList,
}

/// Error returned when parsing an unknown [`HierarchySource`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported hierarchy source `{0}` (expected `parent_pointer` or `child_list`)")]
pub struct UnknownHierarchySource(String);

impl FromStr for HierarchySource {
    type Err = UnknownHierarchySource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent_pointer" => Ok(Self::ParentPointer),
            "child_list" => Ok(Self::ChildList),
            _ => Err(UnknownHierarchySource(s.to_string())),
        }
    }
}

impl From<HierarchySource> for &'static str {
    fn from(val: HierarchySource) -> Self {
        match val {
            HierarchySource::ParentPointer => "parent_pointer",
            HierarchySource::ChildList => "child_list",
        }
    }
}

impl fmt::Display for HierarchySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Structural problems found while rebuilding the hierarchy.
///
/// None of these stop parsing; the affected branch is pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnomalyKind {
    /// The parent chain of the subject loops back on itself.
    Cycle,
    /// The subject's parent link is unknown or owned by no container.
    Detached,
    /// The subject container owns no link node.
    Unlinked,
    /// The subject container references more than one link node; the first wins.
    MultipleLinks,
    /// The subject link is listed by more than one child list; the first wins.
    SharedChild,
    /// Parent pointer and child list name different parents for the subject.
    ParentMismatch,
    /// Two blocks share the subject identifier; the first wins.
    DuplicateId,
}

impl AnomalyKind {
    /// Short human-readable description used in reports and diagnostics.
    pub fn description(&self) -> &'static str {
        match self {
            AnomalyKind::Cycle => "reference cycle",
            AnomalyKind::Detached => "detached from hierarchy",
            AnomalyKind::Unlinked => "no structural link node",
            AnomalyKind::MultipleLinks => "multiple structural link nodes",
            AnomalyKind::SharedChild => "listed as child by multiple parents",
            AnomalyKind::ParentMismatch => "parent declarations disagree",
            AnomalyKind::DuplicateId => "duplicate identifier",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A single recoverable structural anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anomaly {
    kind: AnomalyKind,
    subject: FileId,
    related: Option<FileId>,
}

impl Anomaly {
    /// Creates an anomaly about `subject` with no related object.
    pub fn new(kind: AnomalyKind, subject: FileId) -> Self {
        Self {
            kind,
            subject,
            related: None,
        }
    }

    /// Attach the other object involved, e.g. the rejected parent.
    pub fn with_related(mut self, related: FileId) -> Self {
        self.related = Some(related);
        self
    }

    /// What went wrong.
    pub fn kind(&self) -> AnomalyKind {
        self.kind
    }

    /// The container (or, for link-level anomalies, the object) affected.
    pub fn subject(&self) -> &FileId {
        &self.subject
    }

    /// The other object involved, if any.
    pub fn related(&self) -> Option<&FileId> {
        self.related.as_ref()
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at &{}", self.kind, self.subject)?;
        if let Some(related) = &self.related {
            write!(f, " (involving &{related})")?;
        }
        Ok(())
    }
}

/// Forest of container identifiers.
///
/// Every container appears as the child of at most one parent, and child
/// lists keep document declaration order.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    roots: Vec<FileId>,
    children: HashMap<FileId, Vec<FileId>>,
    owned_links: HashMap<FileId, FileId>,
    anomalies: Vec<Anomaly>,
}

impl Forest {
    /// Creates a forest from its roots, ordered child lists, container to
    /// link ownership, and the anomalies found while building it.
    pub fn new(
        roots: Vec<FileId>,
        children: HashMap<FileId, Vec<FileId>>,
        owned_links: HashMap<FileId, FileId>,
        anomalies: Vec<Anomaly>,
    ) -> Self {
        Self {
            roots,
            children,
            owned_links,
            anomalies,
        }
    }

    /// Root containers in document order.
    pub fn roots(&self) -> &[FileId] {
        &self.roots
    }

    /// Direct children of a container; empty when it has none or is unknown.
    pub fn children(&self, container: &FileId) -> &[FileId] {
        self.children
            .get(container)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The link node owned by a container.
    pub fn link_of(&self, container: &FileId) -> Option<&FileId> {
        self.owned_links.get(container)
    }

    /// Anomalies in the order they were found.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_source_round_trip() {
        for source in [HierarchySource::ParentPointer, HierarchySource::ChildList] {
            assert_eq!(source.to_string().parse::<HierarchySource>(), Ok(source));
        }
    }

    #[test]
    fn test_hierarchy_source_unknown() {
        let err = "sideways".parse::<HierarchySource>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_anomaly_display() {
        let anomaly = Anomaly::new(AnomalyKind::Cycle, FileId::new("5"))
            .with_related(FileId::new("6"));

        assert_eq!(anomaly.to_string(), "reference cycle at &5 (involving &6)");
    }

    #[test]
    fn test_children_of_unknown_is_empty() {
        let forest = Forest::default();
        assert!(forest.children(&FileId::new("404")).is_empty());
    }
}
