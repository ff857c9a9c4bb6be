//! Configuration types for scene parsing and reporting.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parse and report settings.
//! - [`ParseSettings`] - Parent resolution and strictness for the parser.
//! - [`ReportConfig`] - Report style, placeholder names and type groups.
//!
//! # Example
//!
//! ```
//! # use scenegraph::config::{AppConfig, ReportStyle};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [parse]
//!     hierarchy_source = "child_list"
//!
//!     [report]
//!     style = "outline"
//!     "#,
//! )
//! .expect("valid config");
//! assert_eq!(config.report().style(), ReportStyle::Outline);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use scenegraph_core::scene::HierarchySource;
use scenegraph_parser::ParseConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parse: ParseSettings,

    /// Report configuration section.
    #[serde(default)]
    report: ReportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parse: ParseSettings, report: ReportConfig) -> Self {
        Self { parse, report }
    }

    /// Returns the parser configuration.
    pub fn parse(&self) -> &ParseSettings {
        &self.parse
    }

    /// Returns the report configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Replaces the configured report style.
    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.report.style = style;
        self
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ParseSettings {
    /// Which declaration decides the parent of a non-root container.
    #[serde(default)]
    hierarchy_source: HierarchySource,

    /// Fail on hierarchy anomalies instead of logging them.
    #[serde(default)]
    strict: bool,
}

impl ParseSettings {
    /// Creates parser settings.
    pub fn new(hierarchy_source: HierarchySource, strict: bool) -> Self {
        Self {
            hierarchy_source,
            strict,
        }
    }

    /// Returns the configured [`HierarchySource`].
    pub fn hierarchy_source(&self) -> HierarchySource {
        self.hierarchy_source
    }

    /// Returns `true` if anomalies fail the parse.
    pub fn strict(&self) -> bool {
        self.strict
    }
}

impl From<ParseSettings> for ParseConfig {
    fn from(settings: ParseSettings) -> Self {
        ParseConfig::new(settings.hierarchy_source, settings.strict)
    }
}

/// Layout of the rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStyle {
    /// `GameObject:` lines with a components sub-list per container.
    Outline,
    /// Tree glyphs, statistics, type groups and anomalies.
    #[default]
    Detailed,
}

/// Error returned when a report style name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report style `{0}` (expected `outline` or `detailed`)")]
pub struct UnknownReportStyle(String);

impl FromStr for ReportStyle {
    type Err = UnknownReportStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outline" => Ok(Self::Outline),
            "detailed" => Ok(Self::Detailed),
            _ => Err(UnknownReportStyle(s.to_string())),
        }
    }
}

impl From<ReportStyle> for &'static str {
    fn from(style: ReportStyle) -> Self {
        match style {
            ReportStyle::Outline => "outline",
            ReportStyle::Detailed => "detailed",
        }
    }
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Report settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    style: ReportStyle,

    /// Printed in place of an empty container name.
    #[serde(default = "default_unnamed_label")]
    unnamed_label: String,

    /// Summary lines counting selected attachment types.
    #[serde(default = "default_groups")]
    groups: Vec<TypeGroup>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            style: ReportStyle::default(),
            unnamed_label: default_unnamed_label(),
            groups: default_groups(),
        }
    }
}

impl ReportConfig {
    /// Creates report settings.
    pub fn new(style: ReportStyle, unnamed_label: impl Into<String>, groups: Vec<TypeGroup>) -> Self {
        Self {
            style,
            unnamed_label: unnamed_label.into(),
            groups,
        }
    }

    /// Returns the report style.
    pub fn style(&self) -> ReportStyle {
        self.style
    }

    /// Returns the placeholder for unnamed containers.
    pub fn unnamed_label(&self) -> &str {
        &self.unnamed_label
    }

    /// Returns the configured type groups, in order.
    pub fn groups(&self) -> &[TypeGroup] {
        &self.groups
    }
}

/// A labelled set of attachment type names counted together in reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeGroup {
    label: String,
    types: Vec<String>,
}

impl TypeGroup {
    /// Creates a type group from its label and member type names.
    pub fn new(label: impl Into<String>, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the group label printed in reports.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the attachment type names counted by this group.
    pub fn types(&self) -> &[String] {
        &self.types
    }
}

fn default_unnamed_label() -> String {
    "(unnamed)".to_string()
}

fn default_groups() -> Vec<TypeGroup> {
    vec![
        TypeGroup::new("TEXT ELEMENTS", ["TMPro.TextMeshProUGUI"]),
        TypeGroup::new(
            "IMAGE ELEMENTS",
            ["UnityEngine.UI.Image", "UnityEngine.UI.RawImage"],
        ),
        TypeGroup::new(
            "INTERACTIVE ELEMENTS",
            ["UnityEngine.UI.Button", "TMPro.TMP_InputField"],
        ),
    ]
}
