//! Scenegraph - hierarchy and component reports for scene documents.
//!
//! Parses block-structured scene documents, rebuilds their object hierarchy
//! and renders plain-text reports of containers, attachments and structural
//! anomalies.

pub mod config;
pub mod report;

mod error;

pub use scenegraph_core::{identifier, scene};
pub use scenegraph_parser::ParseConfig;

pub use error::SceneError;

use std::{fs, path::Path};

use log::{debug, info};

use config::AppConfig;
use report::Report;
use scene::Scene;

/// Builder for parsing scene documents and rendering reports.
///
/// # Examples
///
/// ```rust
/// use scenegraph::{SceneBuilder, config::AppConfig};
///
/// let source = "--- !u!1 &1\n  m_Name: Main Camera\n";
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let scene = builder.parse(source).expect("Failed to parse");
/// assert_eq!(scene.container_count(), 1);
///
/// let text = builder.render("Main.unity", &scene).expect("Failed to render");
/// assert!(text.contains("SCENE: Main.unity"));
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse document text into a scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Parse`] when strict parsing is configured and the
    /// document has duplicate identifiers or hierarchy anomalies.
    pub fn parse(&self, source: &str) -> Result<Scene, SceneError> {
        info!(bytes = source.len(); "Parsing scene");

        let scene = scenegraph_parser::parse(source, (*self.config.parse()).into())
            .map_err(|err| SceneError::new_parse_error(err, source))?;

        debug!(
            containers = scene.container_count(),
            roots = scene.roots().len();
            "Scene parsed successfully"
        );
        Ok(scene)
    }

    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read, otherwise as
    /// [`SceneBuilder::parse`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        info!(path:% = path.display(); "Reading scene document");
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Start a multi-document report using the configured style.
    pub fn report(&self) -> Report<'_> {
        Report::new(self.config.report())
    }

    /// Render a single-document report.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Render`] if formatting the report fails.
    pub fn render(&self, name: &str, scene: &Scene) -> Result<String, SceneError> {
        let mut report = self.report();
        report.push_scene(name, scene)?;
        Ok(report.finish())
    }
}
