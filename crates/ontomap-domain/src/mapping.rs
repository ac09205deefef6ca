//! Mapping candidates produced by the primary and cross-reference sources

use crate::traits::{AnnotationHit, BridgedTerm, CrossReferenceHit};
use crate::uri::OntologyUri;
use crate::{ConfidenceClass, DomainError};

/// Result of looking a term up in the target reference ontology
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Enrichment {
    /// Preferred display label, if the metadata service supplied one
    pub label: Option<String>,

    /// Term exists in the target ontology
    pub in_scope: bool,

    /// Term exists in the target ontology and is not obsolete
    pub is_current: bool,
}

impl Enrichment {
    /// Whether the term may be accepted without review
    pub fn is_current_and_in_scope(&self) -> bool {
        self.in_scope && self.is_current
    }
}

/// One ontology term proposed by the primary annotation source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Term URI
    pub uri: String,

    /// Display label; starts as the source label, replaced on enrichment
    pub label: String,

    /// Confidence of the group this entry belongs to
    pub confidence: ConfidenceClass,

    /// Provenance source name (e.g. "eva-clinvar")
    pub source: String,

    /// Term exists in the target ontology
    pub in_scope: bool,

    /// Term is in the target ontology and not obsolete
    pub is_current: bool,
}

impl MappingEntry {
    /// Create an unenriched entry
    pub fn new(
        uri: impl Into<String>,
        label: impl Into<String>,
        confidence: ConfidenceClass,
        source: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            confidence,
            source: source.into(),
            in_scope: false,
            is_current: false,
        }
    }

    /// Apply a metadata lookup; a missing label keeps the source label
    pub fn apply(&mut self, enrichment: &Enrichment) {
        if let Some(label) = &enrichment.label {
            self.label = label.clone();
        }
        self.in_scope = enrichment.in_scope;
        self.is_current = enrichment.is_current;
    }

    /// Whether the entry is in scope and current
    pub fn is_current_and_in_scope(&self) -> bool {
        self.in_scope && self.is_current
    }
}

/// One matched annotation from the primary source with all URIs it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingGroup {
    /// The annotated property value that matched the trait name
    pub label: String,

    /// Confidence class of the match
    pub confidence: ConfidenceClass,

    /// Provenance source name
    pub source: String,

    /// One entry per associated URI
    pub entries: Vec<MappingEntry>,
}

impl MappingGroup {
    /// Build a group from a service hit; entries inherit the hit's label
    pub fn from_hit(hit: &AnnotationHit) -> Self {
        let entries = hit
            .uris
            .iter()
            .map(|uri| {
                MappingEntry::new(
                    uri.clone(),
                    hit.label.clone(),
                    hit.confidence,
                    hit.source.clone(),
                )
            })
            .collect();

        Self {
            label: hit.label.clone(),
            confidence: hit.confidence,
            source: hit.source.clone(),
            entries,
        }
    }
}

/// One bridged term returned by the cross-reference source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReferenceEntry {
    /// Term URI derived from the returned CURIE
    pub uri: String,

    /// Compact identifier as returned
    pub curie: String,

    /// Display label; starts as the service label, replaced on enrichment
    pub label: String,

    /// Graph distance from the queried identifier (1 = direct)
    pub distance: u32,

    /// Identifier that was queried to reach this term
    pub query_id: String,

    /// Term exists in the target ontology
    pub in_scope: bool,

    /// Term is in the target ontology and not obsolete
    pub is_current: bool,
}

impl CrossReferenceEntry {
    /// Build an unenriched entry from a bridged term
    ///
    /// # Errors
    ///
    /// Fails when the CURIE is malformed or names a database without a URI template.
    pub fn from_bridged(term: &BridgedTerm, query_id: &str) -> Result<Self, DomainError> {
        let uri = OntologyUri::from_curie(&term.curie)?;
        Ok(Self {
            uri: uri.into(),
            curie: term.curie.clone(),
            label: term.label.clone(),
            distance: term.distance,
            query_id: query_id.to_string(),
            in_scope: false,
            is_current: false,
        })
    }

    /// Apply a metadata lookup; a missing label keeps the service label
    pub fn apply(&mut self, enrichment: &Enrichment) {
        if let Some(label) = &enrichment.label {
            self.label = label.clone();
        }
        self.in_scope = enrichment.in_scope;
        self.is_current = enrichment.is_current;
    }

    /// Whether the entry is in scope and current
    pub fn is_current_and_in_scope(&self) -> bool {
        self.in_scope && self.is_current
    }

    /// Direct cross-reference that may finish a trait
    pub fn is_finishing(&self) -> bool {
        self.is_current_and_in_scope() && self.distance == 1
    }
}

/// Full answer for one queried identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReferenceResult {
    /// Identifier that was queried
    pub query_id: String,

    /// Label of the queried term as reported by the service
    pub label: String,

    /// URI of the queried term
    pub uri: String,

    /// Bridged terms
    pub entries: Vec<CrossReferenceEntry>,
}

impl CrossReferenceResult {
    /// Build an unenriched result from a service hit
    pub fn from_hit(hit: &CrossReferenceHit) -> Result<Self, DomainError> {
        let uri = OntologyUri::from_curie(&hit.curie)?;
        let entries = hit
            .mappings
            .iter()
            .map(|term| CrossReferenceEntry::from_bridged(term, &hit.query_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            query_id: hit.query_id.clone(),
            label: hit.label.clone(),
            uri: uri.into(),
            entries,
        })
    }
}

/// An accepted (URI, label) pair; identity is by value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FinishedMapping {
    /// Term URI
    pub uri: String,
    /// Term label
    pub label: String,
}

impl FinishedMapping {
    /// Create a finished mapping
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
        }
    }
}
