//! Metrics collected during a resolution run

use crate::cache::CacheStats;
use crate::resolver::ResolutionPath;
use crate::ResolverError;
use ontomap_domain::ClinicalTrait;

/// Run-level counters, one increment per resolved trait
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionMetrics {
    /// Traits resolved
    pub traits_total: usize,

    /// Finished from a HIGH primary entry
    pub finished_by_primary: usize,

    /// Finished from a direct cross-reference
    pub finished_by_cross_reference: usize,

    /// Routed to manual curation
    pub needs_curation: usize,

    /// Primary source unavailable after retries
    pub primary_unavailable: usize,

    /// Cross-reference stage not entered
    pub cross_reference_skipped: usize,

    /// Cross-reference stage entered without usable identifiers
    pub cross_reference_unseeded: usize,

    /// Cross-reference source called
    pub cross_reference_queried: usize,

    /// Cross-reference source unavailable after retries
    pub cross_reference_unavailable: usize,

    /// Traits whose cross-references named a database without a URI template
    pub unknown_database_errors: usize,

    /// Other resolution errors
    pub other_errors: usize,

    /// High-priority traits with no primary results and nothing to search
    pub high_priority_unseeded: usize,

    /// Entries that kept their source label
    pub label_fallbacks: u64,

    /// Cache counters at the end of the run
    pub cache: Vec<CacheStats>,
}

impl ResolutionMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trait that completed the cascade
    pub fn record(&mut self, t: &ClinicalTrait, path: ResolutionPath) {
        self.traits_total += 1;

        match path {
            ResolutionPath::FinishedByPrimary => self.finished_by_primary += 1,
            ResolutionPath::FinishedByCrossReference => self.finished_by_cross_reference += 1,
            ResolutionPath::PrimaryUnavailable => self.primary_unavailable += 1,
            ResolutionPath::CrossReferenceSkipped => self.cross_reference_skipped += 1,
            ResolutionPath::NoCrossReferenceSeeds => {
                self.cross_reference_unseeded += 1;
                if t.high_priority && t.mapping_groups.is_empty() {
                    self.high_priority_unseeded += 1;
                }
            }
            ResolutionPath::CrossReferenceUnavailable => self.cross_reference_unavailable += 1,
            ResolutionPath::NeedsCurationAfterCrossReference => {}
        }

        if path.queried_cross_reference() {
            self.cross_reference_queried += 1;
        }
        if !t.is_finished() {
            self.needs_curation += 1;
        }
    }

    /// Record a trait whose resolution raised an error
    ///
    /// The trait is still written as a curation row.
    pub fn record_error(&mut self, error: &ResolverError) {
        self.traits_total += 1;
        self.needs_curation += 1;

        if error.is_unknown_database() {
            self.unknown_database_errors += 1;
            self.cross_reference_queried += 1;
        } else {
            self.other_errors += 1;
        }
    }

    /// Get total finished traits
    pub fn total_finished(&self) -> usize {
        self.finished_by_primary + self.finished_by_cross_reference
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Resolution Metrics Summary".to_string(),
            "==========================".to_string(),
            format!("Traits: {}", self.traits_total),
            format!(
                "Finished: {} (primary: {}, cross-reference: {})",
                self.total_finished(),
                self.finished_by_primary,
                self.finished_by_cross_reference
            ),
            format!("Needs curation: {}", self.needs_curation),
            String::new(),
            format!("Primary unavailable: {}", self.primary_unavailable),
            format!("Cross-reference skipped: {}", self.cross_reference_skipped),
            format!("Cross-reference unseeded: {}", self.cross_reference_unseeded),
            format!("Cross-reference queried: {}", self.cross_reference_queried),
            format!("Cross-reference unavailable: {}", self.cross_reference_unavailable),
            format!("Unknown database errors: {}", self.unknown_database_errors),
            format!("High-priority unseeded: {}", self.high_priority_unseeded),
            format!("Label fallbacks: {}", self.label_fallbacks),
        ];

        if self.other_errors > 0 {
            lines.push(format!("Other errors: {}", self.other_errors));
        }

        if !self.cache.is_empty() {
            lines.push(String::new());
            lines.push("Caches:".to_string());
            for stats in &self.cache {
                lines.push(format!(
                    "  {}: {} hits, {} misses ({:.1}% hit rate)",
                    stats.name,
                    stats.hits,
                    stats.misses,
                    stats.hit_rate() * 100.0
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontomap_domain::DomainError;

    fn unknown_database(name: &str) -> ResolverError {
        ResolverError::from(DomainError::UnknownDatabase(name.to_string()))
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = ResolutionMetrics::new();
        assert_eq!(metrics.traits_total, 0);
        assert_eq!(metrics.total_finished(), 0);
    }

    #[test]
    fn test_record_paths() {
        let mut metrics = ResolutionMetrics::new();
        let unresolved = ClinicalTrait::new("a", 1);

        metrics.record(&unresolved, ResolutionPath::CrossReferenceSkipped);
        metrics.record(&unresolved, ResolutionPath::NeedsCurationAfterCrossReference);
        metrics.record(&unresolved, ResolutionPath::PrimaryUnavailable);

        assert_eq!(metrics.traits_total, 3);
        assert_eq!(metrics.needs_curation, 3);
        assert_eq!(metrics.cross_reference_skipped, 1);
        assert_eq!(metrics.cross_reference_queried, 1);
        assert_eq!(metrics.primary_unavailable, 1);
    }

    #[test]
    fn test_high_priority_unseeded() {
        let mut metrics = ResolutionMetrics::new();
        let t = ClinicalTrait::new("repeat disorder", 1).with_high_priority(true);
        metrics.record(&t, ResolutionPath::NoCrossReferenceSeeds);
        metrics.record(&ClinicalTrait::new("other", 1), ResolutionPath::NoCrossReferenceSeeds);

        assert_eq!(metrics.cross_reference_unseeded, 2);
        assert_eq!(metrics.high_priority_unseeded, 1);
    }

    #[test]
    fn test_record_error() {
        let mut metrics = ResolutionMetrics::new();
        metrics.record_error(&unknown_database("DOID"));
        metrics.record_error(&ResolverError::from(DomainError::MalformedCurie("x".to_string())));

        assert_eq!(metrics.traits_total, 2);
        assert_eq!(metrics.needs_curation, 2);
        assert_eq!(metrics.unknown_database_errors, 1);
        assert_eq!(metrics.other_errors, 1);
    }

    #[test]
    fn test_summary() {
        let mut metrics = ResolutionMetrics::new();
        metrics.record_error(&unknown_database("DOID"));
        metrics.cache.push(CacheStats {
            name: "term labels",
            hits: 3,
            misses: 1,
        });

        let summary = metrics.summary();
        assert!(summary.contains("Traits: 1"));
        assert!(summary.contains("Unknown database errors: 1"));
        assert!(summary.contains("term labels: 3 hits, 1 misses (75.0% hit rate)"));
    }
}
