//! Cross-reference stage
//!
//! Converts HIGH-confidence URIs to compact identifiers, runs one bulk search
//! and enriches every bridged term. A bridged CURIE naming a database without
//! a URI template is an error, never a silent default.

use crate::metadata::TermMetadataLookup;
use crate::retry::with_retries;
use ontomap_domain::traits::{CrossReferenceQuery, CrossReferenceService, TermMetadataService};
use ontomap_domain::{cross_reference_id, CrossReferenceResult, DomainError};
use std::collections::BTreeSet;
use tracing::debug;

/// Queries the cross-reference source and builds enriched results
pub struct CrossReferenceStage<X> {
    service: X,
    targets: Vec<String>,
    distance: u32,
    retry_attempts: u32,
}

/// Compact identifiers for a set of URIs, sorted and deduplicated
///
/// URIs from sources outside the prefix table are dropped.
pub fn seed_ids<'a, I>(uris: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    uris.into_iter()
        .filter_map(|uri| cross_reference_id(uri))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl<X: CrossReferenceService> CrossReferenceStage<X> {
    /// Create a stage searching `targets` up to `distance`
    pub fn new(service: X, targets: Vec<String>, distance: u32, retry_attempts: u32) -> Self {
        Self {
            service,
            targets,
            distance,
            retry_attempts,
        }
    }

    /// Build the bulk query for a list of identifiers
    pub fn query_for(&self, ids: Vec<String>) -> CrossReferenceQuery {
        CrossReferenceQuery {
            ids,
            targets: self.targets.clone(),
            distance: self.distance,
        }
    }

    /// Enriched results for `ids`
    ///
    /// `Ok(None)` when the service stayed unavailable.
    ///
    /// # Errors
    ///
    /// Fails when a returned CURIE is malformed or names an unknown database.
    /// The error discards every result of the search, including valid
    /// distance 1 entries that would have finished the trait.
    pub async fn resolve<M>(
        &self,
        name: &str,
        ids: Vec<String>,
        metadata: &TermMetadataLookup<M>,
    ) -> Result<Option<Vec<CrossReferenceResult>>, DomainError>
    where
        M: TermMetadataService,
    {
        let query = self.query_for(ids);
        let target = format!("cross-reference search for '{}'", name);
        let searched =
            with_retries(self.retry_attempts, &target, || self.service.search(&query)).await;
        let hits = match searched {
            Some(hits) => hits,
            None => return Ok(None),
        };
        debug!("Cross-reference source returned {} results for '{}'", hits.len(), name);

        let mut results = hits
            .iter()
            .map(CrossReferenceResult::from_hit)
            .collect::<Result<Vec<_>, _>>()?;

        for result in &mut results {
            for entry in &mut result.entries {
                let enrichment = metadata.enrich(&entry.uri, name).await;
                entry.apply(&enrichment);
            }
        }
        Ok(Some(results))
    }
}
