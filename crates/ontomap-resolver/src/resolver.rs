//! Per-trait resolution cascade
//!
//! ```text
//! primary query ─┬─ absent ─────────────────────────────── curation (no candidates)
//!                ├─ HIGH entry current & in scope ──────── finished
//!                ├─ no groups, or any entry current ────── curation
//!                └─ HIGH URIs ─┬─ none ─────────────────── curation
//!                              └─ cross-reference ─┬─ absent ────────── curation (primary only)
//!                                                  ├─ distance 1 hit ── finished
//!                                                  └─ otherwise ─────── curation
//! ```

use crate::cache::CacheStats;
use crate::cross_reference::{seed_ids, CrossReferenceStage};
use crate::metadata::TermMetadataLookup;
use crate::primary::PrimaryAnnotationStage;
use crate::{ResolverConfig, ResolverError};
use ontomap_domain::traits::{AnnotationService, CrossReferenceService, TermMetadataService};
use ontomap_domain::{ClinicalTrait, TraitState};
use std::fmt;
use std::num::NonZeroUsize;
use tracing::debug;

/// Which branch of the cascade a trait ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionPath {
    /// Primary source unavailable after retries
    PrimaryUnavailable,
    /// A HIGH primary entry was current and in scope
    FinishedByPrimary,
    /// No groups, or a current primary entry already exists
    CrossReferenceSkipped,
    /// No HIGH URI converted to a cross-reference identifier
    NoCrossReferenceSeeds,
    /// Cross-reference source unavailable after retries
    CrossReferenceUnavailable,
    /// A direct cross-reference was current and in scope
    FinishedByCrossReference,
    /// Cross-references searched without a finishing hit
    NeedsCurationAfterCrossReference,
}

impl ResolutionPath {
    /// Terminal state implied by the path
    pub fn state(&self) -> TraitState {
        match self {
            ResolutionPath::FinishedByPrimary | ResolutionPath::FinishedByCrossReference => {
                TraitState::Finished
            }
            _ => TraitState::NeedsCuration,
        }
    }

    /// Whether the cross-reference source was called
    pub fn queried_cross_reference(&self) -> bool {
        matches!(
            self,
            ResolutionPath::CrossReferenceUnavailable
                | ResolutionPath::FinishedByCrossReference
                | ResolutionPath::NeedsCurationAfterCrossReference
        )
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionPath::PrimaryUnavailable => "primary unavailable",
            ResolutionPath::FinishedByPrimary => "finished by primary",
            ResolutionPath::CrossReferenceSkipped => "cross-reference skipped",
            ResolutionPath::NoCrossReferenceSeeds => "no cross-reference seeds",
            ResolutionPath::CrossReferenceUnavailable => "cross-reference unavailable",
            ResolutionPath::FinishedByCrossReference => "finished by cross-reference",
            ResolutionPath::NeedsCurationAfterCrossReference => {
                "needs curation after cross-reference"
            }
        };
        f.write_str(name)
    }
}

/// Drives the cascade for one trait at a time; shared by all workers
pub struct Resolver<A, X, M> {
    primary: PrimaryAnnotationStage<A>,
    cross_reference: CrossReferenceStage<X>,
    metadata: TermMetadataLookup<M>,
    cross_reference_high_priority_without_primary: bool,
}

impl<A, X, M> Resolver<A, X, M>
where
    A: AnnotationService,
    X: CrossReferenceService,
    M: TermMetadataService,
{
    /// Build a resolver with fresh caches
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(
        config: &ResolverConfig,
        annotation: A,
        cross_reference: X,
        metadata: M,
    ) -> Result<Self, ResolverError> {
        config.validate().map_err(ResolverError::Config)?;
        let capacity = NonZeroUsize::new(config.cache_capacity)
            .ok_or_else(|| {
                ResolverError::Config("cache_capacity must be greater than 0".to_string())
            })?;

        Ok(Self {
            primary: PrimaryAnnotationStage::new(
                annotation,
                config.annotation.filters(),
                config.retry_attempts,
                capacity,
            ),
            cross_reference: CrossReferenceStage::new(
                cross_reference,
                config.cross_reference.targets.clone(),
                config.cross_reference.distance,
                config.retry_attempts,
            ),
            metadata: TermMetadataLookup::new(metadata, config.retry_attempts, capacity),
            cross_reference_high_priority_without_primary: config
                .cross_reference_high_priority_without_primary,
        })
    }

    /// Resolve one trait in place
    ///
    /// On error the trait keeps whatever evidence was gathered before it, so
    /// it can still be written as a curation row.
    ///
    /// # Errors
    ///
    /// Fails when a cross-reference CURIE names an unknown database.
    pub async fn resolve(&self, t: &mut ClinicalTrait) -> Result<ResolutionPath, ResolverError> {
        let groups = match self.primary.resolve(&t.name, &self.metadata).await {
            Some(groups) => groups,
            None => return Ok(ResolutionPath::PrimaryUnavailable),
        };
        t.mapping_groups = groups;
        t.process_mapping_groups();
        if t.is_finished() {
            return Ok(ResolutionPath::FinishedByPrimary);
        }

        let bypass_empty = t.high_priority && self.cross_reference_high_priority_without_primary;
        if (t.mapping_groups.is_empty() && !bypass_empty) || t.has_current_entry() {
            debug!("Skipping cross-reference stage for '{}'", t.name);
            return Ok(ResolutionPath::CrossReferenceSkipped);
        }

        let ids = seed_ids(&t.cross_reference_seed_uris());
        if ids.is_empty() {
            return Ok(ResolutionPath::NoCrossReferenceSeeds);
        }

        let results = match self.cross_reference.resolve(&t.name, ids, &self.metadata).await? {
            Some(results) => results,
            None => return Ok(ResolutionPath::CrossReferenceUnavailable),
        };
        t.cross_references = results;
        t.process_cross_references();

        if t.is_finished() {
            Ok(ResolutionPath::FinishedByCrossReference)
        } else {
            Ok(ResolutionPath::NeedsCurationAfterCrossReference)
        }
    }

    /// Entries that kept their source label
    pub fn label_fallbacks(&self) -> u64 {
        self.metadata.label_fallbacks()
    }

    /// Counters for every cache the resolver owns
    pub fn cache_stats(&self) -> Vec<CacheStats> {
        let mut stats = vec![self.primary.cache_stats()];
        stats.extend(self.metadata.cache_stats());
        stats
    }
}
