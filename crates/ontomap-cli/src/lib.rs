//! Ontomap CLI library
//!
//! Argument parsing, configuration loading, trait list input and TSV output
//! for the `ontomap` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod progress;

pub use cli::{Cli, Command, ConfigArgs, OverrideArgs, ResolveArgs};
pub use config::load_config;
pub use error::{CliError, Result};
pub use input::{parse_traits, read_traits};
pub use output::{write_output_files, write_outputs, OutputSummary};
