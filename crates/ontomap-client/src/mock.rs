//! In-memory service doubles for deterministic testing
//!
//! The mocks return pre-configured answers without making network calls and
//! count how often they are called. Clones share state through `Arc`, so a
//! test can keep one handle while the resolver owns another.
//!
//! # Examples
//!
//! ```
//! use ontomap_client::mock::MockTermMetadataService;
//!
//! let mut metadata = MockTermMetadataService::new();
//! metadata.add_target_term("http://www.ebi.ac.uk/efo/EFO_0003847", "intellectual disability", false);
//! assert_eq!(metadata.target_term_calls(), 0);
//! ```

use crate::ClientError;
use async_trait::async_trait;
use ontomap_domain::traits::{
    AnnotationHit, AnnotationQuery, AnnotationService, CrossReferenceHit, CrossReferenceQuery,
    CrossReferenceService, TermMetadataService, TermRecord,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Consume one pending failure for `key`, if any remain
fn take_failure(failures: &Mutex<HashMap<String, usize>>, key: &str) -> bool {
    let mut failures = lock(failures);
    match failures.get_mut(key) {
        Some(remaining) if *remaining > 0 => {
            *remaining -= 1;
            true
        }
        _ => false,
    }
}

/// Mock primary annotation source keyed by property value
///
/// Unknown property values answer with an empty list.
#[derive(Debug, Clone, Default)]
pub struct MockAnnotationService {
    responses: Arc<Mutex<HashMap<String, Vec<AnnotationHit>>>>,
    failures: Arc<Mutex<HashMap<String, usize>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockAnnotationService {
    /// Create a mock with no configured answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `property_value` with `hits`
    pub fn add_response(&mut self, property_value: impl Into<String>, hits: Vec<AnnotationHit>) {
        lock(&self.responses).insert(property_value.into(), hits);
    }

    /// Fail the next `times` queries for `property_value`
    pub fn add_failures(&mut self, property_value: impl Into<String>, times: usize) {
        lock(&self.failures).insert(property_value.into(), times);
    }

    /// Number of times annotate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnnotationService for MockAnnotationService {
    type Error = ClientError;

    async fn annotate(&self, query: &AnnotationQuery) -> Result<Vec<AnnotationHit>, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if take_failure(&self.failures, &query.property_value) {
            return Err(ClientError::Mock(format!("annotate '{}'", query.property_value)));
        }

        Ok(lock(&self.responses)
            .get(&query.property_value)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock cross-reference source keyed by queried identifier
///
/// A search answers with the configured hit of every queried identifier, in
/// query order. Every received query is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockCrossReferenceService {
    responses: Arc<Mutex<HashMap<String, CrossReferenceHit>>>,
    pending_failures: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<CrossReferenceQuery>>>,
}

impl MockCrossReferenceService {
    /// Create a mock with no configured answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `hit.query_id` with `hit`
    pub fn add_response(&mut self, hit: CrossReferenceHit) {
        lock(&self.responses).insert(hit.query_id.clone(), hit);
    }

    /// Fail the next `times` searches
    pub fn add_failures(&mut self, times: usize) {
        self.pending_failures.store(times, Ordering::SeqCst);
    }

    /// Number of times search was called
    pub fn call_count(&self) -> usize {
        lock(&self.queries).len()
    }

    /// Queries received so far, oldest first
    pub fn queries(&self) -> Vec<CrossReferenceQuery> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl CrossReferenceService for MockCrossReferenceService {
    type Error = ClientError;

    async fn search(
        &self,
        query: &CrossReferenceQuery,
    ) -> Result<Vec<CrossReferenceHit>, Self::Error> {
        lock(&self.queries).push(query.clone());

        let failed = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(ClientError::Mock(format!("search {:?}", query.ids)));
        }

        let responses = lock(&self.responses);
        Ok(query
            .ids
            .iter()
            .filter_map(|id| responses.get(id).cloned())
            .collect())
    }
}

/// Mock term metadata source keyed by URI
///
/// URIs without a configured label have none; URIs without a configured
/// target term are absent from the target ontology.
#[derive(Debug, Clone, Default)]
pub struct MockTermMetadataService {
    labels: Arc<Mutex<HashMap<String, String>>>,
    terms: Arc<Mutex<HashMap<String, TermRecord>>>,
    label_failures: Arc<Mutex<HashMap<String, usize>>>,
    term_failures: Arc<Mutex<HashMap<String, usize>>>,
    label_calls: Arc<AtomicUsize>,
    term_calls: Arc<AtomicUsize>,
}

impl MockTermMetadataService {
    /// Create a mock with no configured terms
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred label of `uri`
    pub fn add_label(&mut self, uri: impl Into<String>, label: impl Into<String>) {
        lock(&self.labels).insert(uri.into(), label.into());
    }

    /// Record `uri` in the target ontology; also sets its preferred label
    pub fn add_target_term(
        &mut self,
        uri: impl Into<String>,
        label: impl Into<String>,
        is_obsolete: bool,
    ) {
        let uri = uri.into();
        let label = label.into();
        lock(&self.labels).insert(uri.clone(), label.clone());
        lock(&self.terms).insert(uri, TermRecord { label, is_obsolete });
    }

    /// Fail the next `times` label lookups for `uri`
    pub fn add_label_failures(&mut self, uri: impl Into<String>, times: usize) {
        lock(&self.label_failures).insert(uri.into(), times);
    }

    /// Fail the next `times` target term lookups for `uri`
    pub fn add_target_term_failures(&mut self, uri: impl Into<String>, times: usize) {
        lock(&self.term_failures).insert(uri.into(), times);
    }

    /// Number of label lookups made
    pub fn label_calls(&self) -> usize {
        self.label_calls.load(Ordering::SeqCst)
    }

    /// Number of target term lookups made
    pub fn target_term_calls(&self) -> usize {
        self.term_calls.load(Ordering::SeqCst)
    }

    /// Total lookups of either kind
    pub fn call_count(&self) -> usize {
        self.label_calls() + self.target_term_calls()
    }
}

#[async_trait]
impl TermMetadataService for MockTermMetadataService {
    type Error = ClientError;

    async fn preferred_label(&self, uri: &str) -> Result<Option<String>, Self::Error> {
        self.label_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.label_failures, uri) {
            return Err(ClientError::Mock(format!("label {}", uri)));
        }
        Ok(lock(&self.labels).get(uri).cloned())
    }

    async fn target_term(&self, uri: &str) -> Result<Option<TermRecord>, Self::Error> {
        self.term_calls.fetch_add(1, Ordering::SeqCst);
        if take_failure(&self.term_failures, uri) {
            return Err(ClientError::Mock(format!("target term {}", uri)));
        }
        Ok(lock(&self.terms).get(uri).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontomap_domain::traits::{AnnotationFilters, BridgedTerm};
    use ontomap_domain::ConfidenceClass;

    fn query(value: &str) -> AnnotationQuery {
        AnnotationQuery::new(
            value,
            AnnotationFilters {
                required: vec![],
                ontologies: vec![],
                preferred: vec![],
            },
        )
    }

    #[tokio::test]
    async fn test_annotation_mock_responses_and_count() {
        let mut service = MockAnnotationService::new();
        service.add_response(
            "marfan syndrome",
            vec![AnnotationHit {
                label: "Marfan syndrome".to_string(),
                uris: vec!["http://www.orpha.net/ORDO/Orphanet_558".to_string()],
                confidence: ConfidenceClass::High,
                source: "eva-clinvar".to_string(),
            }],
        );

        assert_eq!(service.annotate(&query("marfan syndrome")).await.unwrap().len(), 1);
        assert!(service.annotate(&query("unknown")).await.unwrap().is_empty());
        assert_eq!(service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_annotation_mock_failures_are_consumed() {
        let mut service = MockAnnotationService::new();
        service.add_failures("flaky", 2);

        assert!(service.annotate(&query("flaky")).await.is_err());
        assert!(service.annotate(&query("flaky")).await.is_err());
        assert!(service.annotate(&query("flaky")).await.is_ok());
    }

    #[tokio::test]
    async fn test_cross_reference_mock_records_queries() {
        let mut service = MockCrossReferenceService::new();
        service.add_response(CrossReferenceHit {
            query_id: "HP:0001249".to_string(),
            label: "Intellectual disability".to_string(),
            curie: "HP:0001249".to_string(),
            mappings: vec![BridgedTerm {
                label: "intellectual disability".to_string(),
                curie: "EFO:0003847".to_string(),
                distance: 1,
            }],
        });
        service.add_failures(1);

        let query = CrossReferenceQuery {
            ids: vec!["HP:0001249".to_string(), "OMIM:1".to_string()],
            targets: vec!["efo".to_string()],
            distance: 3,
        };
        assert!(service.search(&query).await.is_err());
        let hits = service.search(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(service.call_count(), 2);
        assert_eq!(service.queries()[1], query);
    }

    #[tokio::test]
    async fn test_metadata_mock_shared_between_clones() {
        let mut service = MockTermMetadataService::new();
        service.add_target_term("u:1", "term", true);
        let handle = service.clone();

        let record = service.target_term("u:1").await.unwrap().unwrap();
        assert!(record.is_obsolete);
        assert_eq!(service.preferred_label("u:1").await.unwrap().as_deref(), Some("term"));
        assert_eq!(service.target_term("u:2").await.unwrap(), None);

        assert_eq!(handle.target_term_calls(), 2);
        assert_eq!(handle.label_calls(), 1);
        assert_eq!(handle.call_count(), 3);
    }
}
