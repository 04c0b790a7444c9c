//! Subcommand handlers.
//!
//! Handlers print operator-facing progress to stdout and return the process
//! exit code. Library errors bubble up as `anyhow` errors.

pub mod completions;
pub mod config;
pub mod normalize;
pub mod slice;
pub mod view;
