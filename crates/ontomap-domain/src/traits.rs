//! Trait definitions for the remote knowledge services
//!
//! These traits define the boundaries between the resolver and the network.
//! HTTP implementations and in-memory mocks live in `ontomap-client`.

use crate::ConfidenceClass;
use async_trait::async_trait;
use std::fmt;

/// Filter policy applied to every primary-source query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFilters {
    /// Curated sources that must have asserted the annotation
    pub required: Vec<String>,

    /// Ontologies the returned terms may come from
    pub ontologies: Vec<String>,

    /// Source precedence used by the service to order results
    pub preferred: Vec<String>,
}

impl AnnotationFilters {
    /// Render the `filter` query parameter value
    ///
    /// # Examples
    ///
    /// ```
    /// use ontomap_domain::traits::AnnotationFilters;
    ///
    /// let filters = AnnotationFilters {
    ///     required: vec!["cttv".into(), "gwas".into()],
    ///     ontologies: vec!["efo".into()],
    ///     preferred: vec!["gwas".into()],
    /// };
    /// assert_eq!(
    ///     filters.filter_expression(),
    ///     "required:[cttv,gwas],ontologies:[efo],preferred:[gwas]"
    /// );
    /// ```
    pub fn filter_expression(&self) -> String {
        format!(
            "required:[{}],ontologies:[{}],preferred:[{}]",
            self.required.join(","),
            self.ontologies.join(","),
            self.preferred.join(",")
        )
    }
}

/// One primary-source query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationQuery {
    /// Trait name sent as the property value
    pub property_value: String,

    /// Filter policy
    pub filters: AnnotationFilters,
}

impl AnnotationQuery {
    /// Create a query for a trait name
    pub fn new(property_value: impl Into<String>, filters: AnnotationFilters) -> Self {
        Self {
            property_value: property_value.into(),
            filters,
        }
    }

    /// Fully rendered query string, used as the memoization key
    pub fn cache_key(&self) -> String {
        format!(
            "propertyValue={}&filter={}",
            self.property_value,
            self.filters.filter_expression()
        )
    }
}

/// One annotation returned by the primary source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationHit {
    /// Annotated property value that matched
    pub label: String,

    /// Semantic tags (term URIs)
    pub uris: Vec<String>,

    /// Confidence class assigned by the service
    pub confidence: ConfidenceClass,

    /// Provenance source name
    pub source: String,
}

/// One bulk cross-reference query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReferenceQuery {
    /// Compact identifiers (`Orphanet:199318`)
    pub ids: Vec<String>,

    /// Target ontology allow-list
    pub targets: Vec<String>,

    /// Maximum graph distance
    pub distance: u32,
}

/// A term reached from a queried identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgedTerm {
    /// Term label as reported by the service
    pub label: String,

    /// Compact identifier of the bridged term
    pub curie: String,

    /// Graph distance from the queried identifier
    pub distance: u32,
}

/// Answer for one queried identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReferenceHit {
    /// Identifier as it was queried
    pub query_id: String,

    /// Label of the queried term
    pub label: String,

    /// Compact identifier of the queried term as the service resolved it
    pub curie: String,

    /// Bridged terms
    pub mappings: Vec<BridgedTerm>,
}

/// A term as recorded in the target reference ontology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    /// Preferred label
    pub label: String,

    /// Whether the term has been retired
    pub is_obsolete: bool,
}

/// Primary annotation source (Zooma)
///
/// Implemented by the infrastructure layer (ontomap-client)
#[async_trait]
pub trait AnnotationService: Send + Sync {
    /// Error type for service calls
    type Error: fmt::Display + Send + Sync;

    /// Annotate a property value under the query's filter policy
    async fn annotate(&self, query: &AnnotationQuery) -> Result<Vec<AnnotationHit>, Self::Error>;
}

/// Cross-reference source (OxO)
///
/// Implemented by the infrastructure layer (ontomap-client)
#[async_trait]
pub trait CrossReferenceService: Send + Sync {
    /// Error type for service calls
    type Error: fmt::Display + Send + Sync;

    /// Find bridged identifiers for each queried identifier
    async fn search(
        &self,
        query: &CrossReferenceQuery,
    ) -> Result<Vec<CrossReferenceHit>, Self::Error>;
}

/// Term metadata source (OLS)
///
/// Implemented by the infrastructure layer (ontomap-client)
#[async_trait]
pub trait TermMetadataService: Send + Sync {
    /// Error type for service calls
    type Error: fmt::Display + Send + Sync;

    /// Preferred label from the term's defining ontology; `None` when no
    /// ontology defines it
    async fn preferred_label(&self, uri: &str) -> Result<Option<String>, Self::Error>;

    /// Look the term up in the target ontology; `None` when absent
    async fn target_term(&self, uri: &str) -> Result<Option<TermRecord>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> AnnotationFilters {
        AnnotationFilters {
            required: vec!["cttv".to_string(), "eva-clinvar".to_string(), "gwas".to_string()],
            ontologies: vec!["efo".to_string(), "ordo".to_string(), "hp".to_string()],
            preferred: vec!["eva-clinvar".to_string(), "cttv".to_string(), "gwas".to_string()],
        }
    }

    #[test]
    fn test_filter_expression() {
        assert_eq!(
            filters().filter_expression(),
            "required:[cttv,eva-clinvar,gwas],ontologies:[efo,ordo,hp],preferred:[eva-clinvar,cttv,gwas]"
        );
    }

    #[test]
    fn test_cache_key_distinguishes_filters() {
        let a = AnnotationQuery::new("marfan syndrome", filters());
        let mut other = filters();
        other.ontologies = vec!["efo".to_string()];
        let b = AnnotationQuery::new("marfan syndrome", other);

        assert!(a.cache_key().starts_with("propertyValue=marfan syndrome&filter=required:["));
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), AnnotationQuery::new("marfan syndrome", filters()).cache_key());
    }
}
