//! Command-line argument definitions for the scenegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input documents, the report
//! destination and style, configuration file, and logging verbosity.

use clap::Parser;

use scenegraph::config::ReportStyle;

/// Command-line arguments for the scenegraph report tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Scene files, or directories whose `.unity` files are read in name order
    #[arg(required = true, help = "Scene files or directories")]
    pub inputs: Vec<String>,

    /// Path to the report file; the report goes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report style (outline, detailed), overriding the configuration
    #[arg(long)]
    pub style: Option<ReportStyle>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
