//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git SHA and build date.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("H5EP_BUILD_DATE"),
    ")"
);

/// h5ep - normalize, slice and inspect HDF5 robot-episode recordings
#[derive(Parser, Debug)]
#[command(name = "h5ep", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert raw episode files into the normalized training layout
    Normalize {
        /// Directory containing raw episode files
        #[arg(long = "input_dir", value_name = "DIR")]
        input_dir: PathBuf,

        /// Directory for processed_<episode>.hdf5 files
        #[arg(long = "output_dir", value_name = "DIR")]
        output_dir: PathBuf,
    },

    /// Extract episodes <start_index>..=<end_index> of an aggregate file
    Slice {
        /// Aggregate file with one group per episode under `data`
        aggregate_path: PathBuf,

        /// Directory for episode_<index>.hdf5 files
        output_dir: PathBuf,

        /// First episode index to extract (inclusive)
        #[arg(allow_negative_numbers = true)]
        start_index: i64,

        /// Last episode index to extract (inclusive)
        #[arg(allow_negative_numbers = true)]
        end_index: i64,
    },

    /// Write the structure and values of an HDF5 file to a text report
    View {
        /// File to inspect
        hdf5_path: PathBuf,

        /// Stop after expanding this many groups
        #[arg(long, value_name = "N")]
        max_groups: Option<usize>,

        /// Rows rendered per dataset before truncating
        #[arg(long, value_name = "N")]
        max_rows: Option<usize>,

        /// Directory for the report (default: ./log)
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
}
