//! Output records for resolved traits
//!
//! A finished trait yields one row per accepted (URI, label) pair; any other
//! trait yields exactly one curation row:
//!
//! ```text
//! name \t frequency \t uri|label|CONFIDENCE|source ... \t uri|label|distance|query_id ...
//! ```
//!
//! Primary candidates come first, then cross-reference candidates, each
//! group in ranking order.

use ontomap_domain::{ClinicalTrait, CrossReferenceEntry, MappingEntry};

/// Header line of the finished mappings file
pub const MAPPINGS_HEADER: &str = "#clinvar_trait_name\turi\tlabel";

/// Replace characters that would break a TSV row
pub fn sanitize(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

/// One accepted mapping of a finished trait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRow {
    /// Trait name
    pub trait_name: String,
    /// Term URI
    pub uri: String,
    /// Term label
    pub label: String,
}

impl FinishedRow {
    /// Render as a TSV line without the trailing newline
    pub fn to_tsv(&self) -> String {
        [&self.trait_name, &self.uri, &self.label]
            .iter()
            .map(|field| sanitize(field))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A trait routed to manual curation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationRow {
    /// Trait name
    pub trait_name: String,
    /// Corpus frequency
    pub frequency: u64,
    /// Ranked candidate cells
    pub candidates: Vec<String>,
}

impl CurationRow {
    /// Render as a TSV line without the trailing newline
    pub fn to_tsv(&self) -> String {
        let mut fields = vec![sanitize(&self.trait_name), self.frequency.to_string()];
        fields.extend(self.candidates.iter().map(|cell| sanitize(cell)));
        fields.join("\t")
    }
}

/// Cell for a primary-source candidate
pub fn primary_cell(entry: &MappingEntry) -> String {
    format!("{}|{}|{}|{}", entry.uri, entry.label, entry.confidence, entry.source)
}

/// Cell for a cross-reference candidate
pub fn cross_reference_cell(entry: &CrossReferenceEntry) -> String {
    format!("{}|{}|{}|{}", entry.uri, entry.label, entry.distance, entry.query_id)
}

/// Everything written for one trait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraitOutput {
    /// Rows for the finished mappings file
    Finished(Vec<FinishedRow>),
    /// Row for the curation file
    Curation(CurationRow),
}

impl From<&ClinicalTrait> for TraitOutput {
    fn from(t: &ClinicalTrait) -> Self {
        if t.is_finished() {
            let rows = t
                .finished_mappings()
                .iter()
                .map(|mapping| FinishedRow {
                    trait_name: t.name.clone(),
                    uri: mapping.uri.clone(),
                    label: mapping.label.clone(),
                })
                .collect();
            return TraitOutput::Finished(rows);
        }

        let mut candidates: Vec<String> =
            t.primary_candidates().into_iter().map(primary_cell).collect();
        candidates.extend(
            t.cross_reference_candidates()
                .into_iter()
                .map(cross_reference_cell),
        );

        TraitOutput::Curation(CurationRow {
            trait_name: t.name.clone(),
            frequency: t.frequency,
            candidates,
        })
    }
}
