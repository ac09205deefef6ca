//! Precedence model for mapping candidates
//!
//! Both comparators return `Ordering::Less` when the first argument should be
//! presented first, so `sort_by(compare_*)` yields best-first lists.
//!
//! Primary entries: higher confidence class, then in scope, then current.
//! Cross-reference entries: smaller distance, then in scope, then current.
//! Remaining ties fall back to URI, label and source/query identifier so the
//! order is total and independent of input order.

use crate::mapping::{CrossReferenceEntry, MappingEntry};
use std::cmp::Ordering;

/// Compare two primary-source entries, best first
pub fn compare_mapping_entries(a: &MappingEntry, b: &MappingEntry) -> Ordering {
    b.confidence
        .cmp(&a.confidence)
        .then_with(|| b.in_scope.cmp(&a.in_scope))
        .then_with(|| b.is_current.cmp(&a.is_current))
        .then_with(|| a.uri.cmp(&b.uri))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.source.cmp(&b.source))
}

/// Compare two cross-reference entries, best (closest) first
pub fn compare_cross_reference_entries(
    a: &CrossReferenceEntry,
    b: &CrossReferenceEntry,
) -> Ordering {
    a.distance
        .cmp(&b.distance)
        .then_with(|| b.in_scope.cmp(&a.in_scope))
        .then_with(|| b.is_current.cmp(&a.is_current))
        .then_with(|| a.uri.cmp(&b.uri))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.query_id.cmp(&b.query_id))
}

/// Collect and rank primary entries, best first
pub fn rank_mapping_entries<'a, I>(entries: I) -> Vec<&'a MappingEntry>
where
    I: IntoIterator<Item = &'a MappingEntry>,
{
    let mut ranked: Vec<_> = entries.into_iter().collect();
    ranked.sort_by(|a, b| compare_mapping_entries(a, b));
    ranked
}

/// Collect and rank cross-reference entries, closest first
pub fn rank_cross_reference_entries<'a, I>(entries: I) -> Vec<&'a CrossReferenceEntry>
where
    I: IntoIterator<Item = &'a CrossReferenceEntry>,
{
    let mut ranked: Vec<_> = entries.into_iter().collect();
    ranked.sort_by(|a, b| compare_cross_reference_entries(a, b));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfidenceClass;

    fn entry(
        uri: &str,
        confidence: ConfidenceClass,
        in_scope: bool,
        is_current: bool,
    ) -> MappingEntry {
        MappingEntry {
            uri: uri.to_string(),
            label: "label".to_string(),
            confidence,
            source: "eva-clinvar".to_string(),
            in_scope,
            is_current,
        }
    }

    fn xref(uri: &str, distance: u32, in_scope: bool, is_current: bool) -> CrossReferenceEntry {
        CrossReferenceEntry {
            uri: uri.to_string(),
            curie: "EFO:1".to_string(),
            label: "label".to_string(),
            distance,
            query_id: "HP:1".to_string(),
            in_scope,
            is_current,
        }
    }

    #[test]
    fn test_higher_confidence_first() {
        let low = entry("u:1", ConfidenceClass::Low, true, true);
        let high = entry("u:2", ConfidenceClass::High, true, true);
        let ranked = rank_mapping_entries([&low, &high]);
        assert_eq!(ranked[0].uri, "u:2");
        assert_eq!(ranked[1].uri, "u:1");
    }

    #[test]
    fn test_confidence_outranks_flags() {
        // HIGH but stale still ranks above GOOD but current
        let good_current = entry("u:1", ConfidenceClass::Good, true, true);
        let high_stale = entry("u:2", ConfidenceClass::High, true, false);
        assert_eq!(compare_mapping_entries(&high_stale, &good_current), Ordering::Less);
    }

    #[test]
    fn test_in_scope_then_current() {
        let a = entry("u:1", ConfidenceClass::Good, false, false);
        let b = entry("u:2", ConfidenceClass::Good, true, false);
        let c = entry("u:3", ConfidenceClass::Good, true, true);
        let ranked = rank_mapping_entries([&a, &b, &c]);
        let uris: Vec<_> = ranked.iter().map(|e| e.uri.as_str()).collect();
        assert_eq!(uris, vec!["u:3", "u:2", "u:1"]);
    }

    #[test]
    fn test_ties_broken_by_uri() {
        let a = entry("u:b", ConfidenceClass::High, true, true);
        let b = entry("u:a", ConfidenceClass::High, true, true);
        let ranked = rank_mapping_entries([&a, &b]);
        assert_eq!(ranked[0].uri, "u:a");
    }

    #[test]
    fn test_closer_cross_reference_first() {
        let far = xref("u:1", 3, true, true);
        let near = xref("u:2", 1, true, true);
        let mid = xref("u:3", 2, true, true);
        let ranked = rank_cross_reference_entries([&far, &near, &mid]);
        let distances: Vec<_> = ranked.iter().map(|e| e.distance).collect();
        assert_eq!(distances, vec![1, 2, 3]);
    }

    #[test]
    fn test_cross_reference_flags_break_distance_ties() {
        let stale = xref("u:1", 1, true, false);
        let current = xref("u:2", 1, true, true);
        assert_eq!(compare_cross_reference_entries(&current, &stale), Ordering::Less);
    }
}
