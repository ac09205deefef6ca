//! Clinical trait: the unit of resolution
//!
//! A trait is created once per distinct normalized name, mutated by the
//! resolver during a single pass, and read by the output writers afterwards.
//! It is finished iff its finished-mapping set is non-empty; the set only
//! grows.

use crate::mapping::{
    CrossReferenceEntry, CrossReferenceResult, FinishedMapping, MappingEntry, MappingGroup,
};
use crate::ranking::{rank_cross_reference_entries, rank_mapping_entries};
use std::collections::BTreeSet;

/// Terminal state of a resolved trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitState {
    /// At least one accepted (URI, label) pair
    Finished,
    /// Routed to manual curation
    NeedsCuration,
}

/// A distinct clinical trait name with its gathered evidence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalTrait {
    /// Normalized trait name
    pub name: String,

    /// Number of records the name occurred in
    pub frequency: u64,

    /// Linked to a repeat-expansion variant
    pub high_priority: bool,

    /// Primary-source groups, in service order
    pub mapping_groups: Vec<MappingGroup>,

    /// Cross-reference answers, in service order
    pub cross_references: Vec<CrossReferenceResult>,

    finished_mappings: BTreeSet<FinishedMapping>,
}

impl ClinicalTrait {
    /// Create an unresolved trait
    pub fn new(name: impl Into<String>, frequency: u64) -> Self {
        Self {
            name: name.into(),
            frequency,
            high_priority: false,
            mapping_groups: Vec::new(),
            cross_references: Vec::new(),
            finished_mappings: BTreeSet::new(),
        }
    }

    /// Builder: mark as high priority
    pub fn with_high_priority(mut self, high_priority: bool) -> Self {
        self.high_priority = high_priority;
        self
    }

    /// Whether any mapping has been accepted
    pub fn is_finished(&self) -> bool {
        !self.finished_mappings.is_empty()
    }

    /// Accepted mappings in (URI, label) order
    pub fn finished_mappings(&self) -> &BTreeSet<FinishedMapping> {
        &self.finished_mappings
    }

    /// Terminal state after resolution
    pub fn state(&self) -> TraitState {
        if self.is_finished() {
            TraitState::Finished
        } else {
            TraitState::NeedsCuration
        }
    }

    /// Accept every current, in-scope entry of a HIGH group
    pub fn process_mapping_groups(&mut self) {
        let accepted: Vec<FinishedMapping> = self
            .mapping_groups
            .iter()
            .filter(|group| group.confidence.is_high())
            .flat_map(|group| group.entries.iter())
            .filter(|entry| entry.is_current_and_in_scope())
            .map(|entry| FinishedMapping::new(entry.uri.clone(), entry.label.clone()))
            .collect();
        self.finished_mappings.extend(accepted);
    }

    /// Accept every current, in-scope, direct cross-reference
    pub fn process_cross_references(&mut self) {
        let accepted: Vec<FinishedMapping> = self
            .cross_reference_entries()
            .filter(|entry| entry.is_finishing())
            .map(|entry| FinishedMapping::new(entry.uri.clone(), entry.label.clone()))
            .collect();
        self.finished_mappings.extend(accepted);
    }

    /// Whether any primary entry, of any confidence, is current
    pub fn has_current_entry(&self) -> bool {
        self.mapping_entries().any(|entry| entry.is_current)
    }

    /// URIs of HIGH groups, the only ones allowed to seed cross-references
    pub fn cross_reference_seed_uris(&self) -> BTreeSet<String> {
        self.mapping_groups
            .iter()
            .filter(|group| group.confidence.is_high())
            .flat_map(|group| group.entries.iter())
            .map(|entry| entry.uri.clone())
            .collect()
    }

    /// Current, in-scope primary entries, best first
    pub fn primary_candidates(&self) -> Vec<&MappingEntry> {
        rank_mapping_entries(self.mapping_entries().filter(|entry| entry.is_current_and_in_scope()))
    }

    /// Current, in-scope cross-reference entries of any distance, closest first
    pub fn cross_reference_candidates(&self) -> Vec<&CrossReferenceEntry> {
        rank_cross_reference_entries(
            self.cross_reference_entries()
                .filter(|entry| entry.is_current_and_in_scope()),
        )
    }

    fn mapping_entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.mapping_groups.iter().flat_map(|group| group.entries.iter())
    }

    fn cross_reference_entries(&self) -> impl Iterator<Item = &CrossReferenceEntry> {
        self.cross_references.iter().flat_map(|result| result.entries.iter())
    }
}
