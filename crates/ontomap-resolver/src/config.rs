//! Configuration for the Resolver
//!
//! Every section has a `Default` carrying the production endpoints and the
//! filter policy used for ClinVar trait mapping, so a TOML file only needs to
//! name the values it changes.

use crate::ConfigError;
use ontomap_domain::traits::AnnotationFilters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Primary annotation source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Zooma API base URL
    pub url: String,

    /// Sources that must have asserted an annotation
    pub required: Vec<String>,

    /// Ontologies returned terms may come from
    pub ontologies: Vec<String>,

    /// Source precedence
    pub preferred: Vec<String>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ebi.ac.uk/spot/zooma/v2/api".to_string(),
            required: strings(&["cttv", "eva-clinvar", "gwas"]),
            ontologies: strings(&["efo", "ordo", "hp"]),
            preferred: strings(&["eva-clinvar", "cttv", "gwas"]),
        }
    }
}

impl AnnotationConfig {
    /// Filter policy sent with every query
    pub fn filters(&self) -> AnnotationFilters {
        AnnotationFilters {
            required: self.required.clone(),
            ontologies: self.ontologies.clone(),
            preferred: self.preferred.clone(),
        }
    }
}

/// Cross-reference source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossReferenceConfig {
    /// OxO API base URL
    pub url: String,

    /// Target ontology allow-list
    pub targets: Vec<String>,

    /// Maximum graph distance searched
    pub distance: u32,

    /// Search results requested per call
    pub page_size: usize,
}

impl Default for CrossReferenceConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ebi.ac.uk/spot/oxo/api".to_string(),
            targets: strings(&["Orphanet", "efo", "hp"]),
            distance: 3,
            page_size: 5000,
        }
    }
}

/// Term metadata source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// OLS API base URL
    pub url: String,

    /// Reference ontology terms must belong to
    pub target_ontology: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ebi.ac.uk/ols/api".to_string(),
            target_ontology: "efo".to_string(),
        }
    }
}

/// Configuration for the Resolver
///
/// # Examples
///
/// ```
/// use ontomap_resolver::ResolverConfig;
///
/// let config = ResolverConfig::from_toml("retry_attempts = 2\n[cross_reference]\ndistance = 1\n").unwrap();
/// assert_eq!(config.retry_attempts, 2);
/// assert_eq!(config.cross_reference.distance, 1);
/// assert_eq!(config.cache_capacity, 16_384);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Attempts per remote call before giving up
    pub retry_attempts: u32,

    /// Entries kept per lookup cache
    pub cache_capacity: usize,

    /// Traits resolved concurrently
    pub concurrency: usize,

    /// Per-request HTTP timeout (seconds)
    pub request_timeout_secs: u64,

    /// Let high-priority traits without primary results reach the
    /// cross-reference stage
    ///
    /// Such a trait has no HIGH groups to seed a search, so no request is
    /// sent. The trait is reported as unseeded (and counted in
    /// `high_priority_unseeded`) rather than skipped.
    pub cross_reference_high_priority_without_primary: bool,

    /// Primary annotation source
    pub annotation: AnnotationConfig,

    /// Cross-reference source
    pub cross_reference: CrossReferenceConfig,

    /// Term metadata source
    pub metadata: MetadataConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 4,
            cache_capacity: 16_384,
            concurrency: 4,
            request_timeout_secs: 30,
            cross_reference_high_priority_without_primary: false,
            annotation: AnnotationConfig::default(),
            cross_reference: CrossReferenceConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.retry_attempts == 0 {
            return Err("retry_attempts must be greater than 0".to_string());
        }
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.cross_reference.distance == 0 {
            return Err("cross_reference.distance must be greater than 0".to_string());
        }
        if self.cross_reference.page_size == 0 {
            return Err("cross_reference.page_size must be greater than 0".to_string());
        }
        if self.cross_reference.targets.is_empty() {
            return Err("cross_reference.targets must not be empty".to_string());
        }
        if self.metadata.target_ontology.trim().is_empty() {
            return Err("metadata.target_ontology must not be empty".to_string());
        }
        for (name, url) in [
            ("annotation.url", &self.annotation.url),
            ("cross_reference.url", &self.cross_reference.url),
            ("metadata.url", &self.metadata.url),
        ] {
            if url.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
