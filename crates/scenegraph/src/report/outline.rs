//! Outline report style.

use std::fmt;

use scenegraph_core::scene::Scene;

use crate::{
    config::ReportConfig,
    report::{SceneRenderer, display_name},
};

/// Renders every container as a `GameObject:` line followed by its
/// component labels, then the document statistics.
pub struct OutlineRenderer<'a> {
    config: &'a ReportConfig,
}

impl<'a> OutlineRenderer<'a> {
    /// Creates a renderer reading the unnamed label from `config`.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }
}

impl SceneRenderer for OutlineRenderer<'_> {
    fn title(&self) -> &'static str {
        "UNITY SCENE COMPONENT ANALYSIS - COMPLETE REPORT"
    }

    fn rule_width(&self) -> usize {
        100
    }

    fn render_scene(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result {
        for (depth, container) in scene.walk() {
            let prefix = "  ".repeat(depth);
            let inactive = if container.is_active() { "" } else { " (INACTIVE)" };
            writeln!(
                out,
                "{prefix}GameObject: {}{inactive}",
                display_name(container, self.config)
            )?;

            let labels = scene.labels(container.id());
            if !labels.is_empty() {
                writeln!(out, "{prefix}  Components:")?;
                for label in labels {
                    writeln!(out, "{prefix}    - {label}")?;
                }
            }
        }
        writeln!(out)?;

        writeln!(out, "Statistics:")?;
        writeln!(out, "  Total GameObjects: {}", scene.container_count())?;
        writeln!(out, "  Total Components: {}", scene.attachment_count())?;
        writeln!(out)?;

        writeln!(out, "Component Types:")?;
        for (type_name, count) in scene.type_histogram() {
            writeln!(out, "  {type_name}: {count}")?;
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ReportStyle, report::tests::panel_scene};

    #[test]
    fn test_outline() {
        let config = ReportConfig::new(ReportStyle::Outline, "(unnamed)", Vec::new());
        let mut out = String::new();
        OutlineRenderer::new(&config)
            .render_scene(&panel_scene(), &mut out)
            .unwrap();

        let expected = "\
GameObject: Canvas
  Components:
    - RectTransform
    - Canvas
  GameObject: (unnamed) (INACTIVE)
    Components:
      - RectTransform
      - TMPro.TextMeshProUGUI
      - UnityEngine.UI.Image

Statistics:
  Total GameObjects: 2
  Total Components: 3

Component Types:
  Canvas: 1
  TMPro.TextMeshProUGUI: 1
  UnityEngine.UI.Image: 1

";
        assert_eq!(out, expected);
    }
}
