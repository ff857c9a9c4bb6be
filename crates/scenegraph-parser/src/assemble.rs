//! Drives one document through classification, resolution and hierarchy
//! construction, and turns anomalies into diagnostics.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{info, warn};

use scenegraph_core::{
    identifier::FileId,
    scene::{
        Anomaly, AnomalyKind, Attachment, ContainerNode, HierarchySource, LinkNode, Scene,
    },
};

use crate::{
    ParseConfig,
    classify::{Classified, classify},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    hierarchy::HierarchyBuilder,
    resolve::resolve_labels,
    span::Span,
    splitter::split,
};

pub(crate) struct Assembler<'src> {
    config: ParseConfig,
    source: &'src str,
    header_spans: HashMap<FileId, Span>,
    containers: IndexMap<FileId, ContainerNode>,
    links: IndexMap<FileId, LinkNode>,
    attachments: IndexMap<FileId, Attachment>,
    duplicates: Vec<Anomaly>,
    collector: DiagnosticCollector,
}

impl<'src> Assembler<'src> {
    pub(crate) fn new(config: ParseConfig, source: &'src str) -> Self {
        Self {
            config,
            source,
            header_spans: HashMap::new(),
            containers: IndexMap::new(),
            links: IndexMap::new(),
            attachments: IndexMap::new(),
            duplicates: Vec::new(),
            collector: DiagnosticCollector::new(),
        }
    }

    pub(crate) fn build(mut self) -> Result<Scene, ParseError> {
        info!(bytes = self.source.len(), strict = self.config.strict(); "Parsing scene document");

        self.classify_blocks();
        let labels = resolve_labels(&self.containers, &self.links, &self.attachments);

        let forest = HierarchyBuilder::new(
            &self.containers,
            &self.links,
            self.config.hierarchy_source(),
        )
        .with_anomalies(std::mem::take(&mut self.duplicates))
        .build();

        for anomaly in forest.anomalies() {
            if anomaly.kind() != AnomalyKind::DuplicateId {
                let diagnostic = self.anomaly_diagnostic(anomaly);
                self.collector.emit(diagnostic);
            }
        }

        let warnings = self.collector.finish()?;
        for warning in &warnings {
            warn!(code:? = warning.code(); "{}", warning.message());
        }

        Ok(Scene::new(
            self.containers,
            self.links,
            self.attachments,
            labels,
            forest,
        ))
    }

    fn classify_blocks(&mut self) {
        for block in split(self.source) {
            let id = FileId::new(block.id());

            if let Some(&first) = self.header_spans.get(&id) {
                let diagnostic = Diagnostic::escalated(
                    self.config.strict(),
                    format!("identifier `&{id}` is defined multiple times"),
                )
                .with_code(ErrorCode::E100)
                .with_label(block.header_span(), "duplicate definition")
                .with_secondary_label(first, "first defined here")
                .with_help("the first definition is kept");
                self.collector.emit(diagnostic);
                self.duplicates
                    .push(Anomaly::new(AnomalyKind::DuplicateId, id));
                continue;
            }
            self.header_spans.insert(id.clone(), block.header_span());

            match classify(&block) {
                Classified::Container(container) => {
                    self.containers.insert(id, container);
                }
                Classified::Link(link) => {
                    self.links.insert(id, link);
                }
                Classified::Attachment(attachment) => {
                    self.attachments.insert(id, attachment);
                }
            }
        }
    }

    fn anomaly_diagnostic(&self, anomaly: &Anomaly) -> Diagnostic {
        let kind = anomaly.kind();
        let subject = self.display_name(anomaly.subject());
        let message = match kind {
            AnomalyKind::Cycle => format!("reference cycle through {subject}"),
            AnomalyKind::Detached => format!("{subject} has a parent outside the hierarchy"),
            AnomalyKind::Unlinked => format!("{subject} has no structural link node"),
            AnomalyKind::MultipleLinks => {
                format!("{subject} references more than one structural link node")
            }
            AnomalyKind::SharedChild => format!("{subject} is listed as a child more than once"),
            AnomalyKind::ParentMismatch => {
                format!("parent pointer and child list disagree for {subject}")
            }
            AnomalyKind::DuplicateId => format!("{subject} is defined multiple times"),
        };

        let mut diagnostic =
            Diagnostic::escalated(self.config.strict(), message).with_code(kind.into());

        if let Some(&span) = self.header_spans.get(anomaly.subject()) {
            diagnostic = diagnostic.with_label(span, kind.description());
        }
        if let Some(span) = anomaly
            .related()
            .and_then(|related| self.header_spans.get(related))
        {
            diagnostic = diagnostic.with_secondary_label(*span, "related object");
        }

        let help = match kind {
            AnomalyKind::Cycle => "the cyclic subtree is left out of the hierarchy",
            AnomalyKind::Detached => "the container and its subtree are left out of the hierarchy",
            AnomalyKind::Unlinked => "the container is left out of the hierarchy",
            AnomalyKind::MultipleLinks => "the first referenced link node is used",
            AnomalyKind::SharedChild => "the first listing parent is used",
            AnomalyKind::ParentMismatch => match self.config.hierarchy_source() {
                HierarchySource::ParentPointer => {
                    "the parent pointer is used; a missing parent pointer makes a root"
                }
                HierarchySource::ChildList => {
                    "the first listing parent is used; a missing parent pointer makes a root"
                }
            },
            AnomalyKind::DuplicateId => "the first definition is kept",
        };

        diagnostic.with_help(help)
    }

    /// Name a container for messages: `` `Name` (&id) `` or just `` `&id` ``.
    fn display_name(&self, id: &FileId) -> String {
        match self.containers.get(id).map(ContainerNode::name) {
            Some(name) if !name.is_empty() => format!("`{name}` (&{id})"),
            _ => format!("`&{id}`"),
        }
    }
}
