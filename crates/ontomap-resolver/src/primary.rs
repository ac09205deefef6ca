//! Primary annotation stage
//!
//! One filtered query per trait name, memoized by the fully rendered query
//! string. Each hit becomes a [`MappingGroup`] whose entries are enriched
//! through the term metadata lookup.

use crate::cache::{CacheStats, ResultCache};
use crate::metadata::TermMetadataLookup;
use crate::retry::with_retries;
use ontomap_domain::traits::{
    AnnotationFilters, AnnotationHit, AnnotationQuery, AnnotationService, TermMetadataService,
};
use ontomap_domain::MappingGroup;
use std::num::NonZeroUsize;
use tracing::debug;

/// Queries the primary source and builds enriched mapping groups
pub struct PrimaryAnnotationStage<A> {
    service: A,
    filters: AnnotationFilters,
    retry_attempts: u32,
    queries: ResultCache<Vec<AnnotationHit>>,
}

impl<A: AnnotationService> PrimaryAnnotationStage<A> {
    /// Create a stage with an empty query cache
    pub fn new(
        service: A,
        filters: AnnotationFilters,
        retry_attempts: u32,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            service,
            filters,
            retry_attempts,
            queries: ResultCache::new("annotation queries", capacity),
        }
    }

    /// Filter policy sent with every query
    pub fn filters(&self) -> &AnnotationFilters {
        &self.filters
    }

    /// Raw hits for a trait name; `None` when the service stayed unavailable
    pub async fn query(&self, name: &str) -> Option<Vec<AnnotationHit>> {
        let query = AnnotationQuery::new(name, self.filters.clone());
        let key = query.cache_key();

        self.queries
            .get_or_fetch(&key, || {
                with_retries(self.retry_attempts, &key, || self.service.annotate(&query))
            })
            .await
    }

    /// Enriched mapping groups for a trait name, in service order
    ///
    /// Returns `None` when the query failed after retries and an empty list
    /// when it succeeded with nothing.
    pub async fn resolve<M>(
        &self,
        name: &str,
        metadata: &TermMetadataLookup<M>,
    ) -> Option<Vec<MappingGroup>>
    where
        M: TermMetadataService,
    {
        let hits = self.query(name).await?;
        debug!("Primary source returned {} results for '{}'", hits.len(), name);

        let mut groups: Vec<MappingGroup> = hits.iter().map(MappingGroup::from_hit).collect();
        for group in &mut groups {
            for entry in &mut group.entries {
                let enrichment = metadata.enrich(&entry.uri, name).await;
                entry.apply(&enrichment);
            }
        }
        Some(groups)
    }

    /// Counters for the query cache
    pub fn cache_stats(&self) -> CacheStats {
        self.queries.stats()
    }
}
