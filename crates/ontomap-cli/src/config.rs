//! Configuration loading for the CLI.

use crate::cli::OverrideArgs;
use crate::error::{CliError, Result};
use ontomap_resolver::ResolverConfig;
use std::path::Path;

/// Load the configuration file (or defaults), apply overrides and validate
pub fn load_config(path: Option<&Path>, overrides: &OverrideArgs) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => ResolverConfig::from_toml(&std::fs::read_to_string(path)?)?,
        None => ResolverConfig::default(),
    };

    overrides.apply(&mut config);
    config.validate().map_err(CliError::Config)?;
    Ok(config)
}
