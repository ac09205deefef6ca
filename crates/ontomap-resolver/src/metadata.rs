//! Term metadata lookup and entry enrichment
//!
//! Three cached questions are asked about a URI: its preferred label,
//! whether it is current and in scope, and whether it is in scope at all.
//! The in-scope question is only asked when the stronger one answered no.

use crate::cache::{CacheStats, ResultCache};
use crate::retry::with_retries;
use ontomap_domain::traits::TermMetadataService;
use ontomap_domain::Enrichment;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Cached access to the term metadata service
pub struct TermMetadataLookup<M> {
    service: M,
    retry_attempts: u32,
    labels: ResultCache<Option<String>>,
    current_in_scope: ResultCache<bool>,
    in_scope: ResultCache<bool>,
    label_fallbacks: AtomicU64,
}

impl<M: TermMetadataService> TermMetadataLookup<M> {
    /// Create a lookup with empty caches of `capacity` entries each
    pub fn new(service: M, retry_attempts: u32, capacity: NonZeroUsize) -> Self {
        Self {
            service,
            retry_attempts,
            labels: ResultCache::new("term labels", capacity),
            current_in_scope: ResultCache::new("current and in scope", capacity),
            in_scope: ResultCache::new("in scope", capacity),
            label_fallbacks: AtomicU64::new(0),
        }
    }

    /// Preferred label; `None` when no ontology defines the term or the
    /// lookup failed
    pub async fn label(&self, uri: &str) -> Option<String> {
        self.labels
            .get_or_fetch(uri, || {
                with_retries(self.retry_attempts, uri, || self.service.preferred_label(uri))
            })
            .await
            .flatten()
    }

    /// Term exists in the target ontology and is not obsolete
    pub async fn is_current_and_in_scope(&self, uri: &str) -> bool {
        self.current_in_scope
            .get_or_fetch(uri, || async {
                with_retries(self.retry_attempts, uri, || self.service.target_term(uri))
                    .await
                    .map(|record| record.is_some_and(|term| !term.is_obsolete))
            })
            .await
            .unwrap_or(false)
    }

    /// Term exists in the target ontology
    pub async fn is_in_scope(&self, uri: &str) -> bool {
        self.in_scope
            .get_or_fetch(uri, || async {
                with_retries(self.retry_attempts, uri, || self.service.target_term(uri))
                    .await
                    .map(|record| record.is_some())
            })
            .await
            .unwrap_or(false)
    }

    /// Look up everything an entry needs
    ///
    /// `context` names the trait being resolved, for the label warning.
    pub async fn enrich(&self, uri: &str, context: &str) -> Enrichment {
        let label = self.label(uri).await;
        if label.is_none() {
            self.label_fallbacks.fetch_add(1, Ordering::Relaxed);
            warn!("Couldn't retrieve ontology label for {} (trait '{}')", uri, context);
        }

        let is_current = self.is_current_and_in_scope(uri).await;
        let in_scope = is_current || self.is_in_scope(uri).await;
        debug!("Enriched {}: in_scope={} is_current={}", uri, in_scope, is_current);

        Enrichment {
            label,
            in_scope,
            is_current,
        }
    }

    /// Entries that kept their source label
    pub fn label_fallbacks(&self) -> u64 {
        self.label_fallbacks.load(Ordering::Relaxed)
    }

    /// Counters for the three caches
    pub fn cache_stats(&self) -> Vec<CacheStats> {
        vec![
            self.labels.stats(),
            self.current_in_scope.stats(),
            self.in_scope.stats(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontomap_client::mock::MockTermMetadataService;

    const EFO_URI: &str = "http://www.ebi.ac.uk/efo/EFO_0003847";

    fn lookup(service: MockTermMetadataService) -> TermMetadataLookup<MockTermMetadataService> {
        TermMetadataLookup::new(service, 4, NonZeroUsize::new(16).unwrap())
    }

    #[tokio::test]
    async fn test_current_term_sets_both_flags() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "intellectual disability", false);
        let lookup = lookup(service.clone());

        let enrichment = lookup.enrich(EFO_URI, "trait").await;
        assert_eq!(enrichment.label.as_deref(), Some("intellectual disability"));
        assert!(enrichment.in_scope);
        assert!(enrichment.is_current);
        // In-scope question skipped once the stronger one answered yes
        assert_eq!(service.target_term_calls(), 1);
    }

    #[tokio::test]
    async fn test_obsolete_term_is_in_scope_only() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "old", true);
        let lookup = lookup(service);

        let enrichment = lookup.enrich(EFO_URI, "trait").await;
        assert!(enrichment.in_scope);
        assert!(!enrichment.is_current);
    }

    #[tokio::test]
    async fn test_missing_label_keeps_source_label() {
        let service = MockTermMetadataService::new();
        let lookup = lookup(service);

        let enrichment = lookup.enrich("http://identifiers.org/omim/1", "trait").await;
        assert_eq!(enrichment.label, None);
        assert!(!enrichment.in_scope);
        assert!(!enrichment.is_current);
        assert_eq!(lookup.label_fallbacks(), 1);
    }

    #[tokio::test]
    async fn test_failed_label_keeps_membership_flags() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "term label", false);
        service.add_label(EFO_URI, "Intellectual disability");
        service.add_label_failures(EFO_URI, 4);
        let lookup = lookup(service.clone());

        let enrichment = lookup.enrich(EFO_URI, "intellectual disability").await;
        assert_eq!(enrichment.label, None);
        assert!(enrichment.in_scope);
        assert!(enrichment.is_current);
        assert_eq!(lookup.label_fallbacks(), 1);
        assert_eq!(service.label_calls(), 4);

        // Exhausted lookups are retried on the next entry
        let enrichment = lookup.enrich(EFO_URI, "intellectual disability").await;
        assert_eq!(enrichment.label.as_deref(), Some("Intellectual disability"));
        assert_eq!(lookup.label_fallbacks(), 1);
        assert_eq!(service.label_calls(), 5);
    }

    #[tokio::test]
    async fn test_lookups_are_cached() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "label", true);
        let lookup = lookup(service.clone());

        let first = lookup.enrich(EFO_URI, "a").await;
        let calls = service.call_count();
        let second = lookup.enrich(EFO_URI, "b").await;

        assert_eq!(first, second);
        assert_eq!(service.call_count(), calls);
        assert!(lookup.cache_stats().iter().all(|s| s.hits >= 1));
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "label", false);
        service.add_target_term_failures(EFO_URI, 3);
        let lookup = lookup(service.clone());

        assert!(lookup.is_current_and_in_scope(EFO_URI).await);
        assert_eq!(service.target_term_calls(), 4);
    }

    #[tokio::test]
    async fn test_exhausted_lookup_is_not_cached() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term(EFO_URI, "label", false);
        service.add_target_term_failures(EFO_URI, 4);
        let lookup = lookup(service.clone());

        assert!(!lookup.is_current_and_in_scope(EFO_URI).await);
        assert!(lookup.is_current_and_in_scope(EFO_URI).await);
        assert_eq!(service.target_term_calls(), 5);
    }
}
