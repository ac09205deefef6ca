//! Ontomap CLI - Map clinical trait names to ontology terms.

use anyhow::Context;
use clap::Parser;
use ontomap_cli::commands;
use ontomap_cli::logging::init_logging;
use ontomap_cli::{Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Resolve(args) => {
            let input = args.input.clone();
            commands::execute_resolve(args, config_path)
                .await
                .with_context(|| format!("failed to resolve traits from {}", input.display()))?;
        }
        Command::Config(args) => {
            commands::execute_config(args, config_path)?;
        }
    }

    Ok(())
}
