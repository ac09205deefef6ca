//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::input::read_traits;
use crate::output::{write_output_files, OutputSummary};
use crate::progress::trait_progress;
use ontomap_client::{build_http_client, OlsClient, OxoClient, ZoomaClient};
use ontomap_resolver::{Pipeline, Resolver, ResolverConfig};
use std::path::Path;
use tracing::info;

/// Execute the resolve command.
pub async fn execute_resolve(
    args: ResolveArgs,
    config_path: Option<&Path>,
) -> Result<OutputSummary> {
    let config = load_config(config_path, &args.overrides)?;
    let traits = read_traits(&args.input)?;
    info!("Loaded {} distinct traits from {}", traits.len(), args.input.display());

    let pipeline = build_pipeline(&config)?;
    let progress = trait_progress(traits.len(), !args.no_progress);
    let report = pipeline
        .run(traits, |t| {
            progress.set_message(t.name.clone());
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    let summary = write_output_files(&report.traits, &args.output_mappings, &args.output_curation)?;
    info!(
        "Wrote {} mapping rows to {} and {} curation rows to {}",
        summary.mapping_rows,
        args.output_mappings.display(),
        summary.curation_rows,
        args.output_curation.display()
    );
    info!("\n{}", report.metrics.summary());

    Ok(summary)
}

/// Build the HTTP clients and the pipeline from configuration
pub fn build_pipeline(
    config: &ResolverConfig,
) -> Result<Pipeline<ZoomaClient, OxoClient, OlsClient>> {
    let http = build_http_client(config.request_timeout())?;

    let annotation = ZoomaClient::with_client(&config.annotation.url, http.clone());
    let cross_reference = OxoClient::with_client(&config.cross_reference.url, http.clone())
        .with_page_size(config.cross_reference.page_size);
    let metadata = OlsClient::with_client(&config.metadata.url, http)
        .with_target_ontology(&config.metadata.target_ontology);

    let resolver = Resolver::new(config, annotation, cross_reference, metadata)?;
    Ok(Pipeline::new(resolver, config.concurrency))
}
