//! The reconstructed scene model.
//!
//! A [`Scene`] is produced once per document by the parser and never
//! mutated afterwards. It bundles the classified objects, the resolved
//! attachment labels of every container, and the [`Forest`] that links
//! containers into a hierarchy.
//!
//! - [`node`] - [`ContainerNode`], [`LinkNode`], [`Attachment`]
//! - [`forest`] - [`Forest`], [`Anomaly`], [`HierarchySource`]

pub mod forest;
pub mod node;

pub use forest::*;
pub use node::*;

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::identifier::FileId;

/// A fully reconstructed scene document.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    containers: IndexMap<FileId, ContainerNode>,
    links: IndexMap<FileId, LinkNode>,
    attachments: IndexMap<FileId, Attachment>,
    labels: HashMap<FileId, Vec<String>>,
    forest: Forest,
}

impl Scene {
    /// Assemble a scene. Maps are expected in document order.
    pub fn new(
        containers: IndexMap<FileId, ContainerNode>,
        links: IndexMap<FileId, LinkNode>,
        attachments: IndexMap<FileId, Attachment>,
        labels: HashMap<FileId, Vec<String>>,
        forest: Forest,
    ) -> Self {
        debug!(
            containers = containers.len(),
            links = links.len(),
            attachments = attachments.len(),
            roots = forest.roots().len(),
            anomalies = forest.anomalies().len();
            "Scene assembled"
        );
        Self {
            containers,
            links,
            attachments,
            labels,
            forest,
        }
    }

    /// Root containers in document order.
    pub fn roots(&self) -> &[FileId] {
        self.forest.roots()
    }

    /// Direct children of a container in declaration order.
    pub fn children(&self, container: &FileId) -> &[FileId] {
        self.forest.children(container)
    }

    /// Resolved attachment labels of a container, in reference order.
    pub fn labels(&self, container: &FileId) -> &[String] {
        self.labels
            .get(container)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks up a container by identifier.
    pub fn container(&self, id: &FileId) -> Option<&ContainerNode> {
        self.containers.get(id)
    }

    /// Containers in document order.
    pub fn containers(&self) -> impl Iterator<Item = &ContainerNode> {
        self.containers.values()
    }

    /// Looks up a link node by identifier.
    pub fn link(&self, id: &FileId) -> Option<&LinkNode> {
        self.links.get(id)
    }

    /// The link node owned by a container.
    pub fn link_for(&self, container: &FileId) -> Option<&LinkNode> {
        self.forest
            .link_of(container)
            .and_then(|link| self.links.get(link))
    }

    /// Looks up an attachment by identifier.
    pub fn attachment(&self, id: &FileId) -> Option<&Attachment> {
        self.attachments.get(id)
    }

    /// Attachments in document order.
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.values()
    }

    /// Number of containers, including ones outside the forest.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of link nodes.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of attachments.
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Occurrences of each resolved attachment type name, sorted by name.
    pub fn type_histogram(&self) -> BTreeMap<&str, usize> {
        let mut histogram = BTreeMap::new();
        for attachment in self.attachments.values() {
            *histogram.entry(attachment.type_name()).or_default() += 1;
        }
        histogram
    }

    /// Structural anomalies found while rebuilding the hierarchy.
    pub fn anomalies(&self) -> &[Anomaly] {
        self.forest.anomalies()
    }

    /// Depth-first, pre-order walk over the forest.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }
}

/// Depth-first iterator over a [`Scene`] forest, yielding `(depth, node)`.
///
/// Each container is yielded at most once, so a malformed forest cannot
/// make the walk loop.
#[derive(Debug)]
pub struct Walk<'a> {
    scene: &'a Scene,
    stack: Vec<(usize, &'a FileId)>,
    visited: HashSet<&'a FileId>,
}

impl<'a> Walk<'a> {
    fn new(scene: &'a Scene) -> Self {
        let stack = scene.roots().iter().rev().map(|id| (0, id)).collect();
        Self {
            scene,
            stack,
            visited: HashSet::new(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ContainerNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, id)) = self.stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let Some(node) = self.scene.container(id) else {
                continue;
            };
            self.stack.extend(
                self.scene
                    .children(id)
                    .iter()
                    .rev()
                    .map(|child| (depth + 1, child)),
            );
            return Some((depth, node));
        }
        None
    }
}
