//! CLI logic for the scenegraph report tool.
//!
//! Reads every input document, renders one report for all of them, and keeps
//! going when a single document cannot be read or parsed.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use scenegraph::{SceneBuilder, SceneError};

/// Extension of scene documents picked up from input directories.
const SCENE_EXTENSION: &str = "unity";

/// Run the scenegraph CLI application
///
/// Every input is parsed and appended to a single report, which is written
/// to the output file or stdout. Missing, unreadable and (in strict mode)
/// anomalous documents are noted in the report and skipped.
///
/// # Errors
///
/// Returns `SceneError` for:
/// - Configuration loading errors
/// - Failure to read an input directory or write the report
/// - [`SceneError::Incomplete`] when any document was skipped
pub fn run(args: &Args) -> Result<(), SceneError> {
    info!(
        inputs = args.inputs.len(),
        output_path:? = args.output;
        "Processing scenes"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(style) = args.style {
        app_config = app_config.with_style(style);
    }

    let documents = collect_documents(&args.inputs)?;
    let builder = SceneBuilder::new(app_config);
    let mut report = builder.report();
    let mut failed = 0;

    for path in &documents {
        let name = document_name(path);

        if !path.exists() {
            warn!(path:% = path.display(); "Scene document not found");
            report.push_missing(&name)?;
            failed += 1;
            continue;
        }

        match builder.load(path) {
            Ok(scene) => report.push_scene(&name, &scene)?,
            Err(err) => {
                for rendered in error_adapter::render_reports(&err) {
                    error!("{rendered}");
                }
                report.push_failure(&name, &err)?;
                failed += 1;
            }
        }
    }

    let text = report.finish();
    match &args.output {
        Some(output) => {
            fs::write(output, &text)?;
            info!(output_file = output; "Report written");
        }
        None => io::stdout().write_all(text.as_bytes())?,
    }

    if failed > 0 {
        return Err(SceneError::Incomplete {
            failed,
            total: documents.len(),
        });
    }

    info!(documents = documents.len(); "All scenes processed");
    Ok(())
}

/// Expand the inputs into document paths.
///
/// Directories contribute their scene files sorted by name; other inputs
/// are kept as given, so missing files still get a report entry.
fn collect_documents(inputs: &[String]) -> Result<Vec<PathBuf>, SceneError> {
    let mut documents = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if !path.is_dir() {
            documents.push(path.to_path_buf());
            continue;
        }

        let mut scenes: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|entry| {
                entry.is_file()
                    && entry
                        .extension()
                        .is_some_and(|extension| extension == SCENE_EXTENSION)
            })
            .collect();
        scenes.sort();
        info!(directory = input, scenes = scenes.len(); "Expanded input directory");
        documents.extend(scenes);
    }

    Ok(documents)
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
