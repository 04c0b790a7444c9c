//! View subcommand handler

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};
use humansize::{format_size, BINARY};

use h5ep::config::DumpConfig;
use h5ep::view::view_file;

#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path, config: &DumpConfig) -> Result<ExitCode> {
    if !path.exists() {
        bail!("File {} does not exist", path.display());
    }

    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    println!("HDF5 File Contents: {} ({})\n", path.display(), format_size(size, BINARY));

    match view_file(path, config, |prefix| println!("Processing group: {}", prefix)) {
        Ok(outcome) => {
            if outcome.stats.pending > 0 {
                println!(
                    "Stopped after {} groups ({} not expanded)",
                    outcome.stats.groups_visited, outcome.stats.pending
                );
            }
            println!("Contents have been written to: {}", outcome.report.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error processing HDF5 file: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
