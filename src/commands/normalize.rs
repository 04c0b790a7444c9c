//! Normalize subcommand handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use h5ep::config::NormalizeConfig;
use h5ep::normalize::{run_batch, BatchEvent};

/// Normalize every raw episode in `input_dir`.
///
/// Exits with failure when any episode failed, after listing each one.
#[cfg(not(tarpaulin_include))]
pub fn handle(input_dir: &Path, output_dir: &Path, config: &NormalizeConfig) -> Result<ExitCode> {
    let report = run_batch(input_dir, output_dir, config, |event| match event {
        BatchEvent::Started { name } => println!("Processing {}...", name),
        BatchEvent::Finished { name, output } => {
            println!("Processed {} -> {}", name, output.display())
        }
        BatchEvent::Failed { name, error } => eprintln!("Failed {}: {}", name, error),
    })
    .with_context(|| format!("Failed to normalize episodes in {}", input_dir.display()))?;

    if report.is_success() {
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "{} of {} episode(s) failed:",
        report.failed.len(),
        report.failed.len() + report.processed.len()
    );
    for (input, message) in &report.failed {
        eprintln!("  {}: {}", input.display(), message);
    }
    Ok(ExitCode::FAILURE)
}
