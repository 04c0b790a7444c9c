//! Slice subcommand handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use h5ep::slice::extract_range;

#[cfg(not(tarpaulin_include))]
pub fn handle(aggregate: &Path, output_dir: &Path, start: i64, end: i64) -> Result<ExitCode> {
    let written = extract_range(aggregate, output_dir, start, end)
        .with_context(|| format!("Failed to slice {}", aggregate.display()))?;

    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!(
        "Extracted {} episode(s) in [{}, {}] to {}",
        written.len(),
        start,
        end,
        output_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}
