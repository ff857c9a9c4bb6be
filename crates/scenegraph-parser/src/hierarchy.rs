//! Hierarchy Builder: links containers into a forest.
//!
//! Containers never point at each other directly. Each one owns a link node
//! through its attachment references, and link nodes point at other link
//! nodes through parent pointers and child lists. Building the forest takes
//! four passes:
//!
//! 1. **Ownership** - map every link node to the first container that
//!    references it, and every container to the first link node it references.
//! 2. **Parentage** - a container whose link has no parent pointer is a root.
//!    Any other container gets exactly one parent: the parent pointer, or the
//!    first child list naming it, depending on [`HierarchySource`].
//! 3. **Ordering** - children follow their parent's child list, then the
//!    remaining claimants in document order.
//! 4. **Reachability** - containers not reached from a root are walked up
//!    their parent chain with a visited set; a chain that revisits a node is
//!    reported as one [`AnomalyKind::Cycle`].
//!
//! The passes borrow identifiers from the classified maps and only clone
//! them into the finished [`Forest`].

use std::collections::{HashMap, HashSet, hash_map::Entry};

use indexmap::IndexMap;
use log::{debug, trace};

use scenegraph_core::{
    identifier::FileId,
    scene::{Anomaly, AnomalyKind, ContainerNode, Forest, HierarchySource, LinkNode},
};

/// Builds a [`Forest`] from classified containers and link nodes.
#[derive(Debug)]
pub(crate) struct HierarchyBuilder<'a> {
    containers: &'a IndexMap<FileId, ContainerNode>,
    links: &'a IndexMap<FileId, LinkNode>,
    source: HierarchySource,
    anomalies: Vec<Anomaly>,
}

/// Ownership relation between containers and link nodes.
#[derive(Debug, Default)]
struct Ownership<'a> {
    /// link id -> owning container id
    owner_of: HashMap<&'a FileId, &'a FileId>,
    /// container id -> owned link id
    link_of: HashMap<&'a FileId, &'a FileId>,
}

impl<'a> Ownership<'a> {
    /// Prefer reporting a link-level problem against its owning container.
    fn subject(&self, link: &'a FileId) -> FileId {
        self.owner_of.get(link).copied().unwrap_or(link).clone()
    }
}

/// Outcome of the parentage pass.
#[derive(Debug, Default)]
struct Parentage<'a> {
    /// Root containers in document order.
    roots: Vec<&'a FileId>,
    /// container id -> parent container id
    parent_of: HashMap<&'a FileId, &'a FileId>,
    /// parent container id -> containers claiming it, in document order
    claimants: HashMap<&'a FileId, Vec<&'a FileId>>,
}

type Children<'a> = HashMap<&'a FileId, Vec<&'a FileId>>;

impl<'a> HierarchyBuilder<'a> {
    pub(crate) fn new(
        containers: &'a IndexMap<FileId, ContainerNode>,
        links: &'a IndexMap<FileId, LinkNode>,
        source: HierarchySource,
    ) -> Self {
        Self {
            containers,
            links,
            source,
            anomalies: Vec::new(),
        }
    }

    /// Seed the builder with anomalies found before hierarchy construction.
    pub(crate) fn with_anomalies(mut self, anomalies: Vec<Anomaly>) -> Self {
        self.anomalies = anomalies;
        self
    }

    pub(crate) fn build(mut self) -> Forest {
        let ownership = self.index_ownership();
        let listed_by = self.index_child_lists(&ownership);
        let Parentage {
            roots,
            parent_of,
            claimants,
        } = self.assign_parents(&ownership, &listed_by);
        let children = self.order_children(&ownership, &parent_of, claimants);
        self.detect_unreachable(&roots, &parent_of, &children);

        debug!(
            roots = roots.len(),
            anomalies = self.anomalies.len(),
            source:% = self.source;
            "Hierarchy built"
        );

        Forest::new(
            roots.into_iter().cloned().collect(),
            children
                .into_iter()
                .map(|(parent, ordered)| (parent.clone(), ordered.into_iter().cloned().collect()))
                .collect(),
            ownership
                .link_of
                .into_iter()
                .map(|(container, link)| (container.clone(), link.clone()))
                .collect(),
            self.anomalies,
        )
    }

    fn index_ownership(&mut self) -> Ownership<'a> {
        let mut ownership = Ownership::default();
        let (containers, links) = (self.containers, self.links);

        for container in containers.values() {
            let container_id = container.id();
            for reference in container.attachment_refs() {
                let Some((reference, _)) = links.get_key_value(reference) else {
                    continue;
                };
                match ownership.link_of.get(container_id) {
                    Some(&owned) if owned != reference => {
                        self.anomalies.push(
                            Anomaly::new(AnomalyKind::MultipleLinks, container_id.clone())
                                .with_related(reference.clone()),
                        );
                        continue;
                    }
                    Some(_) => continue,
                    None => {}
                }
                if let Entry::Vacant(entry) = ownership.owner_of.entry(reference) {
                    entry.insert(container_id);
                    ownership.link_of.insert(container_id, reference);
                }
            }

            if !ownership.link_of.contains_key(container_id) {
                self.anomalies
                    .push(Anomaly::new(AnomalyKind::Unlinked, container_id.clone()));
            }
        }

        ownership
    }

    /// Map every listed link to the first link (in document order) listing it.
    fn index_child_lists(&mut self, ownership: &Ownership<'a>) -> HashMap<&'a FileId, &'a FileId> {
        let mut listed_by = HashMap::new();
        let links = self.links;

        for link in links.values() {
            for child in link.child_ids() {
                match listed_by.entry(child) {
                    Entry::Vacant(entry) => {
                        entry.insert(link.id());
                    }
                    Entry::Occupied(entry) if *entry.get() != link.id() => {
                        self.anomalies.push(
                            Anomaly::new(AnomalyKind::SharedChild, ownership.subject(child))
                                .with_related(ownership.subject(link.id())),
                        );
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        listed_by
    }

    fn assign_parents(
        &mut self,
        ownership: &Ownership<'a>,
        listed_by: &HashMap<&'a FileId, &'a FileId>,
    ) -> Parentage<'a> {
        let mut parentage = Parentage::default();
        let (containers, links) = (self.containers, self.links);

        for container in containers.values() {
            let container_id = container.id();
            let Some(&link_id) = ownership.link_of.get(container_id) else {
                continue;
            };
            let link = &links[link_id];
            let lister = listed_by.get(link_id).copied();

            let Some(declared) = link.parent() else {
                parentage.roots.push(container_id);
                if let Some(lister) = lister {
                    self.anomalies.push(
                        Anomaly::new(AnomalyKind::ParentMismatch, container_id.clone())
                            .with_related(ownership.subject(lister)),
                    );
                }
                continue;
            };

            let parent_link = match lister {
                Some(lister) if lister != declared => {
                    let (kept, rejected) = match self.source {
                        HierarchySource::ParentPointer => (declared, lister),
                        HierarchySource::ChildList => (lister, declared),
                    };
                    self.anomalies.push(
                        Anomaly::new(AnomalyKind::ParentMismatch, container_id.clone())
                            .with_related(ownership.subject(rejected)),
                    );
                    kept
                }
                _ => declared,
            };

            match ownership.owner_of.get(parent_link) {
                Some(&parent) => {
                    parentage.parent_of.insert(container_id, parent);
                    parentage
                        .claimants
                        .entry(parent)
                        .or_default()
                        .push(container_id);
                }
                None => self.anomalies.push(
                    Anomaly::new(AnomalyKind::Detached, container_id.clone())
                        .with_related(parent_link.clone()),
                ),
            }
        }

        parentage
    }

    fn order_children(
        &self,
        ownership: &Ownership<'a>,
        parent_of: &HashMap<&'a FileId, &'a FileId>,
        claimants: HashMap<&'a FileId, Vec<&'a FileId>>,
    ) -> Children<'a> {
        claimants
            .into_iter()
            .map(|(parent, claimed)| {
                let mut placed = HashSet::new();
                let mut ordered = Vec::with_capacity(claimed.len());

                let declared = ownership
                    .link_of
                    .get(parent)
                    .and_then(|link| self.links.get(*link))
                    .map(LinkNode::child_ids)
                    .unwrap_or_default();
                for child_link in declared {
                    match ownership.owner_of.get(child_link) {
                        Some(&child) if parent_of.get(child) == Some(&parent) => {
                            if placed.insert(child) {
                                ordered.push(child);
                            }
                        }
                        Some(_) => {}
                        None => trace!(
                            parent:% = parent,
                            child_link:% = child_link;
                            "Pruning child link with no owner"
                        ),
                    }
                }
                for child in claimed {
                    if placed.insert(child) {
                        ordered.push(child);
                    }
                }

                (parent, ordered)
            })
            .collect()
    }

    fn detect_unreachable(
        &mut self,
        roots: &[&'a FileId],
        parent_of: &HashMap<&'a FileId, &'a FileId>,
        children: &Children<'a>,
    ) {
        let mut settled = HashSet::new();
        let mut stack = roots.to_vec();
        while let Some(id) = stack.pop() {
            if settled.insert(id) {
                stack.extend(children.get(id).into_iter().flatten().copied());
            }
        }

        let containers = self.containers;
        for container in containers.values() {
            let start = container.id();
            if settled.contains(start) || !parent_of.contains_key(start) {
                continue;
            }

            let mut path = Vec::new();
            let mut visited = HashSet::new();
            let mut current = start;
            loop {
                if settled.contains(current) {
                    break;
                }
                if !visited.insert(current) {
                    let anomaly = Anomaly::new(AnomalyKind::Cycle, current.clone());
                    let anomaly = match parent_of.get(current) {
                        Some(&parent) => anomaly.with_related(parent.clone()),
                        None => anomaly,
                    };
                    self.anomalies.push(anomaly);
                    break;
                }
                path.push(current);
                match parent_of.get(current) {
                    Some(&parent) => current = parent,
                    // Chain ends at a detached container, reported already.
                    None => break,
                }
            }
            settled.extend(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use scenegraph_core::scene::LinkKind;

    use super::*;

    fn id(raw: &str) -> FileId {
        FileId::new(raw)
    }

    fn ids(raws: &[&str]) -> Vec<FileId> {
        raws.iter().map(|raw| id(raw)).collect()
    }

    /// Scene fixture: containers `C<n>` own link `L<n>` and optional extra refs.
    #[derive(Default)]
    struct Fixture {
        containers: IndexMap<FileId, ContainerNode>,
        links: IndexMap<FileId, LinkNode>,
    }

    impl Fixture {
        fn node(mut self, name: &str, parent: &str, children: &[&str]) -> Self {
            let container_id = id(&format!("C{name}"));
            let link_id = id(&format!("L{name}"));
            let parent = if parent == "0" {
                FileId::none()
            } else {
                id(&format!("L{parent}"))
            };
            let child_ids = children.iter().map(|child| id(&format!("L{child}"))).collect();

            self.containers.insert(
                container_id.clone(),
                ContainerNode::new(container_id).with_attachment_refs(vec![link_id.clone()]),
            );
            self.links.insert(
                link_id.clone(),
                LinkNode::new(link_id, LinkKind::Transform)
                    .with_parent(parent)
                    .with_child_ids(child_ids),
            );
            self
        }

        fn build(&self, source: HierarchySource) -> Forest {
            HierarchyBuilder::new(&self.containers, &self.links, source).build()
        }
    }

    fn kinds(forest: &Forest) -> Vec<AnomalyKind> {
        forest.anomalies().iter().map(Anomaly::kind).collect()
    }

    #[test]
    fn test_roots_and_children() {
        let forest = Fixture::default()
            .node("1", "0", &["2"])
            .node("2", "1", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.roots(), ids(&["C1"]).as_slice());
        assert_eq!(forest.children(&id("C1")), ids(&["C2"]).as_slice());
        assert_eq!(forest.link_of(&id("C2")), Some(&id("L2")));
        assert!(forest.anomalies().is_empty());
    }

    #[test]
    fn test_child_order_follows_declaration() {
        let forest = Fixture::default()
            .node("1", "0", &["z", "x", "y"])
            .node("x", "1", &[])
            .node("y", "1", &[])
            .node("z", "1", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.children(&id("C1")), ids(&["Cz", "Cx", "Cy"]).as_slice());
    }

    #[test]
    fn test_parent_pointer_only_children_appended() {
        let forest = Fixture::default()
            .node("1", "0", &["b"])
            .node("a", "1", &[])
            .node("b", "1", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.children(&id("C1")), ids(&["Cb", "Ca"]).as_slice());
    }

    #[test]
    fn test_child_list_without_parent_pointer_stays_root() {
        let forest = Fixture::default()
            .node("1", "0", &["2"])
            .node("2", "0", &[])
            .build(HierarchySource::ChildList);

        assert_eq!(forest.roots(), ids(&["C1", "C2"]).as_slice());
        assert!(forest.children(&id("C1")).is_empty());
        assert_eq!(kinds(&forest), vec![AnomalyKind::ParentMismatch]);
    }

    #[test]
    fn test_mismatch_resolution_per_source() {
        let fixture = Fixture::default()
            .node("a", "0", &["c"])
            .node("b", "0", &[])
            .node("c", "b", &[]);

        let by_pointer = fixture.build(HierarchySource::ParentPointer);
        assert_eq!(by_pointer.children(&id("Cb")), ids(&["Cc"]).as_slice());
        assert!(by_pointer.children(&id("Ca")).is_empty());

        let by_list = fixture.build(HierarchySource::ChildList);
        assert_eq!(by_list.children(&id("Ca")), ids(&["Cc"]).as_slice());
        assert!(by_list.children(&id("Cb")).is_empty());

        for forest in [by_pointer, by_list] {
            assert_eq!(kinds(&forest), vec![AnomalyKind::ParentMismatch]);
        }
    }

    #[test]
    fn test_dangling_child_link_pruned() {
        let forest = Fixture::default()
            .node("1", "0", &["missing", "2"])
            .node("2", "1", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.children(&id("C1")), ids(&["C2"]).as_slice());
        assert!(forest.anomalies().is_empty());
    }

    #[test]
    fn test_detached_parent() {
        let forest = Fixture::default()
            .node("1", "0", &[])
            .node("2", "ghost", &[])
            .node("3", "2", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.roots(), ids(&["C1"]).as_slice());
        assert_eq!(forest.children(&id("C2")), ids(&["C3"]).as_slice());
        assert_eq!(kinds(&forest), vec![AnomalyKind::Detached]);
        assert_eq!(forest.anomalies()[0].subject(), &id("C2"));
        assert_eq!(forest.anomalies()[0].related(), Some(&id("Lghost")));
    }

    #[test]
    fn test_parent_pointer_cycle_reported_once() {
        let forest = Fixture::default()
            .node("root", "0", &[])
            .node("a", "b", &["b"])
            .node("b", "a", &["a"])
            .node("tail", "a", &[])
            .build(HierarchySource::ParentPointer);

        assert_eq!(forest.roots(), ids(&["Croot"]).as_slice());
        assert_eq!(kinds(&forest), vec![AnomalyKind::Cycle]);
        assert_eq!(forest.anomalies()[0].subject(), &id("Ca"));
    }

    #[test]
    fn test_child_list_cycle_reported_once() {
        // Lists say a -> b -> a while pointers say both hang off the root.
        let forest = Fixture::default()
            .node("b", "r", &["a"])
            .node("a", "r", &["b"])
            .node("r", "0", &[])
            .build(HierarchySource::ChildList);

        let cycles = forest
            .anomalies()
            .iter()
            .filter(|anomaly| anomaly.kind() == AnomalyKind::Cycle)
            .count();
        assert_eq!(cycles, 1);
        assert!(forest.children(&id("Cr")).is_empty());
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let forest = Fixture::default()
            .node("1", "1", &[])
            .build(HierarchySource::ParentPointer);

        assert!(forest.roots().is_empty());
        assert_eq!(kinds(&forest), vec![AnomalyKind::Cycle]);
    }

    #[test]
    fn test_shared_child_first_list_wins() {
        let forest = Fixture::default()
            .node("1", "0", &["3"])
            .node("2", "0", &["3"])
            .node("3", "1", &[])
            .build(HierarchySource::ChildList);

        assert_eq!(forest.children(&id("C1")), ids(&["C3"]).as_slice());
        assert!(forest.children(&id("C2")).is_empty());
        assert_eq!(kinds(&forest), vec![AnomalyKind::SharedChild]);
    }

    #[test]
    fn test_ownership_first_link_wins() {
        let mut fixture = Fixture::default().node("1", "0", &[]).node("2", "0", &[]);
        // C1 also references L2, which C2 already claims later in the document.
        fixture.containers.insert(
            id("C1"),
            ContainerNode::new(id("C1")).with_attachment_refs(ids(&["L1", "L2"])),
        );

        let forest = fixture.build(HierarchySource::ParentPointer);

        assert_eq!(forest.link_of(&id("C1")), Some(&id("L1")));
        assert_eq!(forest.link_of(&id("C2")), Some(&id("L2")));
        assert_eq!(kinds(&forest), vec![AnomalyKind::MultipleLinks]);
    }

    #[test]
    fn test_unlinked_container() {
        let mut fixture = Fixture::default().node("1", "0", &[]);
        fixture
            .containers
            .insert(id("C9"), ContainerNode::new(id("C9")));

        let forest = fixture.build(HierarchySource::ParentPointer);

        assert_eq!(forest.roots(), ids(&["C1"]).as_slice());
        assert_eq!(kinds(&forest), vec![AnomalyKind::Unlinked]);
    }

    #[test]
    fn test_seeded_anomalies_kept() {
        let fixture = Fixture::default().node("1", "0", &[]);
        let forest = HierarchyBuilder::new(&fixture.containers, &fixture.links, HierarchySource::default())
            .with_anomalies(vec![Anomaly::new(AnomalyKind::DuplicateId, id("C1"))])
            .build();

        assert_eq!(kinds(&forest), vec![AnomalyKind::DuplicateId]);
    }
}
