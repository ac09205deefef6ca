//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use ontomap_resolver::ResolverConfig;
use std::path::PathBuf;

/// Ontomap - Map clinical trait names to ontology terms.
#[derive(Debug, Parser)]
#[command(name = "ontomap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "ONTOMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `ontomap_resolver=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a trait list into finished mappings and curation rows
    Resolve(ResolveArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

/// Source and policy overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    /// Primary annotation API base URL
    #[arg(long, env = "ONTOMAP_ZOOMA_URL")]
    pub zooma_url: Option<String>,

    /// Cross-reference API base URL
    #[arg(long, env = "ONTOMAP_OXO_URL")]
    pub oxo_url: Option<String>,

    /// Term metadata API base URL
    #[arg(long, env = "ONTOMAP_OLS_URL")]
    pub ols_url: Option<String>,

    /// Sources that must have asserted an annotation (comma-separated)
    #[arg(short = 'r', long, value_delimiter = ',')]
    pub required: Option<Vec<String>>,

    /// Ontologies primary terms may come from (comma-separated)
    #[arg(short = 'n', long, value_delimiter = ',')]
    pub ontologies: Option<Vec<String>>,

    /// Source precedence (comma-separated)
    #[arg(short = 'p', long, value_delimiter = ',')]
    pub preferred: Option<Vec<String>>,

    /// Cross-reference target ontologies (comma-separated)
    #[arg(short = 't', long, value_delimiter = ',')]
    pub targets: Option<Vec<String>>,

    /// Maximum cross-reference distance
    #[arg(short = 'd', long)]
    pub distance: Option<u32>,

    /// Reference ontology terms must belong to
    #[arg(long)]
    pub target_ontology: Option<String>,

    /// Attempts per remote call
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// Entries kept per lookup cache
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Traits resolved concurrently
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report high-priority traits without primary results as unseeded
    /// cross-reference candidates instead of skipped ones (no request is sent)
    #[arg(long)]
    pub high_priority_without_primary: bool,
}

impl OverrideArgs {
    /// Overwrite every configuration value given on the command line
    pub fn apply(&self, config: &mut ResolverConfig) {
        if let Some(url) = &self.zooma_url {
            config.annotation.url = url.clone();
        }
        if let Some(url) = &self.oxo_url {
            config.cross_reference.url = url.clone();
        }
        if let Some(url) = &self.ols_url {
            config.metadata.url = url.clone();
        }
        if let Some(required) = &self.required {
            config.annotation.required = required.clone();
        }
        if let Some(ontologies) = &self.ontologies {
            config.annotation.ontologies = ontologies.clone();
        }
        if let Some(preferred) = &self.preferred {
            config.annotation.preferred = preferred.clone();
        }
        if let Some(targets) = &self.targets {
            config.cross_reference.targets = targets.clone();
        }
        if let Some(distance) = self.distance {
            config.cross_reference.distance = distance;
        }
        if let Some(ontology) = &self.target_ontology {
            config.metadata.target_ontology = ontology.clone();
        }
        if let Some(attempts) = self.retry_attempts {
            config.retry_attempts = attempts;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.high_priority_without_primary {
            config.cross_reference_high_priority_without_primary = true;
        }
    }
}

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Trait list (TSV: name, optional frequency, optional high-priority flag; `.gz` accepted)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Finished mappings output file
    #[arg(short = 'o', long)]
    pub output_mappings: PathBuf,

    /// Manual curation output file
    #[arg(short = 'u', long)]
    pub output_curation: PathBuf,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "ontomap",
            "resolve",
            "-i",
            "traits.tsv.gz",
            "-o",
            "mappings.tsv",
            "-u",
            "curation.tsv",
            "-t",
            "Orphanet,efo",
            "-d",
            "1",
            "--no-progress",
        ])
        .unwrap();

        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.input, PathBuf::from("traits.tsv.gz"));
                assert!(args.no_progress);
                assert_eq!(
                    args.overrides.targets,
                    Some(vec!["Orphanet".to_string(), "efo".to_string()])
                );
                assert_eq!(args.overrides.distance, Some(1));
            }
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_requires_outputs() {
        assert!(Cli::try_parse_from(["ontomap", "resolve", "-i", "traits.tsv"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ontomap",
            "config",
            "--config",
            "ontomap.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ontomap.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = OverrideArgs {
            zooma_url: Some("http://localhost:1/zooma".to_string()),
            required: Some(vec!["gwas".to_string()]),
            distance: Some(2),
            concurrency: Some(8),
            high_priority_without_primary: true,
            ..OverrideArgs::default()
        };

        let mut config = ResolverConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.annotation.url, "http://localhost:1/zooma");
        assert_eq!(config.annotation.required, vec!["gwas".to_string()]);
        assert_eq!(config.cross_reference.distance, 2);
        assert_eq!(config.concurrency, 8);
        assert!(config.cross_reference_high_priority_without_primary);
        assert_eq!(config.metadata, ResolverConfig::default().metadata);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = ResolverConfig::default();
        OverrideArgs::default().apply(&mut config);
        assert_eq!(config, ResolverConfig::default());
    }
}
