//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::load_config;
use crate::error::Result;
use std::path::Path;

/// Print the effective configuration
pub fn execute_config(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.overrides)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
