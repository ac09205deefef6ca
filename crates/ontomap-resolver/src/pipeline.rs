//! Bounded concurrent resolution of a trait list
//!
//! Traits are independent, so up to `concurrency` of them are in flight at
//! once against one shared [`Resolver`]. Results are sorted by name before
//! they are returned.

use crate::metrics::ResolutionMetrics;
use crate::resolver::Resolver;
use futures::stream::{self, StreamExt};
use ontomap_domain::traits::{AnnotationService, CrossReferenceService, TermMetadataService};
use ontomap_domain::ClinicalTrait;
use tracing::{debug, error, info};

/// Outcome of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Resolved traits in name order
    pub traits: Vec<ClinicalTrait>,
    /// Run counters
    pub metrics: ResolutionMetrics,
}

/// Runs the resolver over many traits with bounded concurrency
pub struct Pipeline<A, X, M> {
    resolver: Resolver<A, X, M>,
    concurrency: usize,
}

impl<A, X, M> Pipeline<A, X, M>
where
    A: AnnotationService,
    X: CrossReferenceService,
    M: TermMetadataService,
{
    /// Create a pipeline; a concurrency of zero is treated as one
    pub fn new(resolver: Resolver<A, X, M>, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    /// The shared resolver
    pub fn resolver(&self) -> &Resolver<A, X, M> {
        &self.resolver
    }

    /// Resolve every trait, calling `on_progress` as each one completes
    pub async fn run<F>(&self, traits: Vec<ClinicalTrait>, mut on_progress: F) -> PipelineReport
    where
        F: FnMut(&ClinicalTrait),
    {
        info!("Resolving {} traits with concurrency {}", traits.len(), self.concurrency);
        let resolver = &self.resolver;

        let mut outcomes = stream::iter(traits.into_iter().map(|mut t| async move {
            let outcome = resolver.resolve(&mut t).await;
            (t, outcome)
        }))
        .buffer_unordered(self.concurrency);

        let mut metrics = ResolutionMetrics::new();
        let mut resolved = Vec::new();

        while let Some((t, outcome)) = outcomes.next().await {
            match outcome {
                Ok(path) => {
                    debug!("Trait '{}': {}", t.name, path);
                    metrics.record(&t, path);
                }
                Err(e) => {
                    error!("Trait '{}' could not be fully resolved: {}", t.name, e);
                    metrics.record_error(&e);
                }
            }
            on_progress(&t);
            resolved.push(t);
        }

        resolved.sort_by(|a, b| a.name.cmp(&b.name));
        metrics.label_fallbacks = self.resolver.label_fallbacks();
        metrics.cache = self.resolver.cache_stats();
        info!(
            "Resolved {} traits: {} finished, {} need curation",
            metrics.traits_total,
            metrics.total_finished(),
            metrics.needs_curation
        );

        PipelineReport {
            traits: resolved,
            metrics,
        }
    }
}
