//! Batch normalization over a directory of raw episode files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::normalize_episode;
use super::schema::{OUTPUT_EXTENSION, OUTPUT_PREFIX};
use crate::config::NormalizeConfig;
use crate::error::{Error, Result};

/// Progress notification emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started { name: &'a str },
    Finished { name: &'a str, output: &'a Path },
    Failed { name: &'a str, error: &'a Error },
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(input, output)` for every episode written.
    pub processed: Vec<(PathBuf, PathBuf)>,
    /// `(input, error message)` for every episode that failed.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Raw episode files in `dir`, sorted by file name.
///
/// A file qualifies when its name ends with the configured suffix and does
/// not start with the normalized-output prefix.
pub fn discover_episodes(dir: &Path, config: &NormalizeConfig) -> Result<Vec<PathBuf>> {
    let mut episodes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if name.ends_with(&config.input_suffix) && !name.starts_with(OUTPUT_PREFIX) {
            episodes.push(entry.path());
        }
    }
    episodes.sort();
    Ok(episodes)
}

/// `processed_<stem>.hdf5`, where `<stem>` is the name up to its first dot.
pub fn output_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    format!("{}{}.{}", OUTPUT_PREFIX, stem, OUTPUT_EXTENSION)
}

/// Normalize every episode found in `input_dir` into `output_dir`.
///
/// Each episode is processed independently. Failures are reported to
/// `observer` and collected in the report; with `continue_on_error` off the
/// first failure is returned as an error instead.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    config: &NormalizeConfig,
    mut observer: impl FnMut(BatchEvent<'_>),
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;
    let episodes = discover_episodes(input_dir, config)?;
    info!(count = episodes.len(), dir = %input_dir.display(), "discovered episodes");

    let mut report = BatchReport::default();
    for input in episodes {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let output = output_dir.join(output_file_name(&name));

        observer(BatchEvent::Started { name: &name });
        match normalize_episode(&input, &output) {
            Ok(()) => {
                observer(BatchEvent::Finished {
                    name: &name,
                    output: &output,
                });
                report.processed.push((input, output));
            }
            Err(error) => {
                observer(BatchEvent::Failed {
                    name: &name,
                    error: &error,
                });
                if !config.continue_on_error {
                    return Err(error);
                }
                report.failed.push((input, error.to_string()));
            }
        }
    }
    Ok(report)
}
