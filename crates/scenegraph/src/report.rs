//! Report Renderer: turns parsed scenes into a plain-text report.
//!
//! A [`Report`] frames one section per document under a banner. The body
//! of each section comes from a [`SceneRenderer`]; two are provided:
//!
//! - [`OutlineRenderer`] - `GameObject:` lines with a components sub-list
//! - [`DetailedRenderer`] - tree glyphs, statistics, type groups and anomalies

mod detailed;
mod outline;

pub use detailed::DetailedRenderer;
pub use outline::OutlineRenderer;

use std::fmt::{self, Write as _};

use log::debug;

use scenegraph_core::scene::{ContainerNode, Scene};

use crate::config::{ReportConfig, ReportStyle};

/// Abstraction for report styles.
pub trait SceneRenderer {
    /// Title printed in the report banner.
    fn title(&self) -> &'static str;

    /// Width of the `=` rules framing the banner and scene headings.
    fn rule_width(&self) -> usize;

    /// Writes the body of one scene section.
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if writing to `out` fails.
    fn render_scene(&self, scene: &Scene, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// A multi-document report under construction.
pub struct Report<'a> {
    renderer: Box<dyn SceneRenderer + 'a>,
    output: String,
    sections: usize,
}

impl<'a> Report<'a> {
    /// Create a report using the renderer selected by `config`.
    pub fn new(config: &'a ReportConfig) -> Self {
        let renderer: Box<dyn SceneRenderer + 'a> = match config.style() {
            ReportStyle::Outline => Box::new(OutlineRenderer::new(config)),
            ReportStyle::Detailed => Box::new(DetailedRenderer::new(config)),
        };
        Self::with_renderer(renderer)
    }

    /// Create a report with a custom renderer. The banner is written immediately.
    pub fn with_renderer(renderer: Box<dyn SceneRenderer + 'a>) -> Self {
        let rule = "=".repeat(renderer.rule_width());
        let output = format!("{rule}\n{}\n{rule}\n\n", renderer.title());
        Self {
            renderer,
            output,
            sections: 0,
        }
    }

    /// Append the section for a parsed scene.
    pub fn push_scene(&mut self, name: &str, scene: &Scene) -> fmt::Result {
        let rule = "=".repeat(self.renderer.rule_width());
        write!(self.output, "\n{rule}\nSCENE: {name}\n{rule}\n\n")?;
        self.renderer.render_scene(scene, &mut self.output)?;
        self.sections += 1;
        debug!(name, sections = self.sections; "Scene section rendered");
        Ok(())
    }

    /// Note an input that does not exist.
    pub fn push_missing(&mut self, name: &str) -> fmt::Result {
        write!(self.output, "\nWARNING: {name} not found\n\n")
    }

    /// Note an input that exists but could not be read or parsed.
    pub fn push_failure(&mut self, name: &str, reason: &dyn fmt::Display) -> fmt::Result {
        write!(self.output, "\nERROR: {name} could not be processed: {reason}\n\n")
    }

    /// Number of scene sections written so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Consumes the report and returns the rendered text.
    pub fn finish(self) -> String {
        self.output
    }
}

/// Name shown for a container, substituting the placeholder for empty names.
fn display_name<'c>(container: &'c ContainerNode, config: &'c ReportConfig) -> &'c str {
    match container.name() {
        "" => config.unnamed_label(),
        name => name,
    }
}
