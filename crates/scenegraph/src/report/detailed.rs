//! Detailed report style.

use std::fmt;

use scenegraph_core::{
    identifier::FileId,
    scene::{Anomaly, Scene},
};

use crate::{
    config::ReportConfig,
    report::{SceneRenderer, display_name},
};

const RULE_WIDTH: usize = 120;

/// Renders the hierarchy with tree glyphs followed by statistics, component
/// type counts, configured type groups and structural anomalies.
///
/// ```text
/// HIERARCHY:
/// ------------------------
/// • Canvas
///   └─ RectTransform
///   └─ Canvas
///   • Title [INACTIVE]
///     └─ RectTransform
/// ```
pub struct DetailedRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> DetailedRenderer<'a> {
    /// Creates a renderer reading labels and groups from `config`.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    fn write_hierarchy(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "HIERARCHY:")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for (depth, container) in scene.walk() {
            let prefix = "  ".repeat(depth);
            let inactive = if container.is_active() { "" } else { " [INACTIVE]" };
            writeln!(
                out,
                "{prefix}• {}{inactive}",
                display_name(container, self.config)
            )?;
            for label in scene.labels(container.id()) {
                writeln!(out, "{prefix}  └─ {label}")?;
            }
        }
        writeln!(out)
    }

    fn write_statistics(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "STATISTICS:")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "Total GameObjects: {}", scene.container_count())?;
        writeln!(out, "Total Transforms/RectTransforms: {}", scene.link_count())?;
        writeln!(out, "Total Components: {}", scene.attachment_count())?;
        writeln!(out)?;

        writeln!(out, "COMPONENT TYPES:")?;
        for (type_name, count) in scene.type_histogram() {
            writeln!(out, "  • {type_name}: {count}")?;
        }
        writeln!(out)
    }

    fn write_groups(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        if self.config.groups().is_empty() {
            return Ok(());
        }

        let histogram = scene.type_histogram();
        for group in self.config.groups() {
            let counts: Vec<_> = group
                .types()
                .iter()
                .map(|type_name| {
                    let count = histogram.get(type_name.as_str()).copied().unwrap_or(0);
                    (type_name, count)
                })
                .collect();
            let total: usize = counts.iter().map(|(_, count)| count).sum();
            let breakdown = counts
                .iter()
                .map(|(type_name, count)| format!("{type_name}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "{}: {total} ({breakdown})", group.label())?;
        }
        writeln!(out)
    }

    fn write_anomalies(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        if scene.anomalies().is_empty() {
            return Ok(());
        }

        writeln!(out, "ANOMALIES:")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for anomaly in scene.anomalies() {
            self.write_anomaly(scene, anomaly, out)?;
        }
        writeln!(out)
    }

    fn write_anomaly(
        &self,
        scene: &Scene,
        anomaly: &Anomaly,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "  • {}: {}",
            anomaly.kind(),
            self.describe(scene, anomaly.subject())
        )?;
        if let Some(related) = anomaly.related() {
            write!(out, " -> {}", self.describe(scene, related))?;
        }
        writeln!(out)
    }

    fn describe(&self, scene: &Scene, id: &FileId) -> String {
        match scene.container(id) {
            Some(container) => format!("{} (&{id})", display_name(container, self.config)),
            None => format!("&{id}"),
        }
    }
}

impl SceneRenderer for DetailedRenderer<'_> {
    fn title(&self) -> &'static str {
        "UNITY SCENE STRUCTURE - COMPLETE COMPONENT & HIERARCHY ANALYSIS"
    }

    fn rule_width(&self) -> usize {
        RULE_WIDTH
    }

    fn render_scene(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        self.write_hierarchy(scene, out)?;
        self.write_statistics(scene, out)?;
        self.write_groups(scene, out)?;
        self.write_anomalies(scene, out)
    }
}
