//! Command implementations.

mod config;
mod resolve;

pub use config::execute_config;
pub use resolve::{build_pipeline, execute_resolve};
