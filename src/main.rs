//! h5ep - normalize, slice and inspect HDF5 robot-episode recordings
//!
//! - `normalize`   -- raw episode directory -> processed_<episode>.hdf5 files
//! - `slice`       -- aggregate file -> episode_<index>.hdf5 files
//! - `view`        -- any file -> ./log/<name>_<timestamp>.txt report
//! - `config`      -- configuration helpers
//! - `completions` -- shell completion scripts

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use h5ep::cli::{Cli, Commands, ConfigCommands};
use h5ep::Config;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,h5ep={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize {
            input_dir,
            output_dir,
        } => commands::normalize::handle(&input_dir, &output_dir, &config.normalize),
        Commands::Slice {
            aggregate_path,
            output_dir,
            start_index,
            end_index,
        } => commands::slice::handle(&aggregate_path, &output_dir, start_index, end_index),
        Commands::View {
            hdf5_path,
            max_groups,
            max_rows,
            log_dir,
        } => {
            let mut dump = config.view;
            if let Some(max_groups) = max_groups {
                dump.max_groups = max_groups;
            }
            if let Some(max_rows) = max_rows {
                dump.max_rows = max_rows;
            }
            if let Some(log_dir) = log_dir {
                dump.log_dir = log_dir;
            }
            commands::view::handle(&hdf5_path, &dump)
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&config, cli.config.as_deref())
        }
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
