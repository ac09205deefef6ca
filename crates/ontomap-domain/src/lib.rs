//! Ontomap Domain Layer
//!
//! This crate contains the data model and resolution policy for mapping
//! free-text clinical trait names to ontology terms. It performs no I/O; the
//! remote knowledge services are reached through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **ClinicalTrait**: a distinct trait name, its evidence and its accepted mappings
//! - **MappingGroup / MappingEntry**: primary-source annotations, one entry per URI
//! - **CrossReferenceResult / CrossReferenceEntry**: identifiers bridged from HIGH-confidence URIs
//! - **ConfidenceClass**: fixed total order `Low < Medium < Good < High`
//! - **Ranking**: deterministic precedence used for acceptance and curation output
//!
//! ## Architecture
//!
//! - Pure data and policy only
//! - Service traits for the annotation, cross-reference and term metadata sources
//! - Infrastructure implementations live in `ontomap-client`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clinical_trait;
pub mod confidence;
pub mod error;
pub mod mapping;
pub mod ranking;
pub mod traits;
pub mod uri;

// Re-exports for convenience
pub use clinical_trait::{ClinicalTrait, TraitState};
pub use confidence::ConfidenceClass;
pub use error::DomainError;
pub use mapping::{
    CrossReferenceEntry, CrossReferenceResult, Enrichment, FinishedMapping, MappingEntry,
    MappingGroup,
};
pub use traits::{
    AnnotationFilters, AnnotationHit, AnnotationQuery, AnnotationService, BridgedTerm,
    CrossReferenceHit, CrossReferenceQuery, CrossReferenceService, TermMetadataService,
    TermRecord,
};
pub use uri::{cross_reference_id, format_uri, OntologyDatabase, OntologyUri};
