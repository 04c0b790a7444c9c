//! Config subcommands handler

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use h5ep::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config, explicit: Option<&Path>) -> Result<ExitCode> {
    match explicit.map(Path::to_path_buf).or_else(Config::config_path) {
        Some(path) if path.exists() => println!("# loaded from {}", path.display()),
        Some(path) => println!("# defaults ({} does not exist)", path.display()),
        None => println!("# defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(ExitCode::SUCCESS)
}
