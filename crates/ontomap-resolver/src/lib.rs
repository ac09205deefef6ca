//! Ontomap Resolver
//!
//! Resolves clinical trait names to ontology terms through a cascade of
//! remote lookups.
//!
//! # Overview
//!
//! Each trait is first sent to the primary annotation source. A HIGH
//! confidence term that is current in the target ontology finishes it.
//! Otherwise, when no usable primary term exists, HIGH confidence URIs are
//! bridged through the cross-reference source, and a direct (distance 1)
//! current term finishes it. Everything else goes to manual curation with
//! ranked candidates.
//!
//! # Architecture
//!
//! ```text
//! ClinicalTrait → PrimaryAnnotationStage ─┐
//!                 CrossReferenceStage ────┼→ TermMetadataLookup (cached) → Resolver → TraitOutput
//! ```
//!
//! # Key Features
//!
//! - **Bounded retry**: every remote call gets a fixed attempt budget; exhaustion is an absent
//!   result
//! - **Memoization**: LRU caches for primary queries, labels and ontology membership
//! - **Deterministic output**: finished mappings and curation candidates in a total order
//! - **Bounded concurrency**: independent traits resolved in parallel against shared caches
//!
//! # Example Usage
//!
//! ```no_run
//! use ontomap_client::{OlsClient, OxoClient, ZoomaClient};
//! use ontomap_domain::ClinicalTrait;
//! use ontomap_resolver::{Pipeline, Resolver, ResolverConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ResolverConfig::default();
//! let resolver = Resolver::new(
//!     &config,
//!     ZoomaClient::new(&config.annotation.url)?,
//!     OxoClient::new(&config.cross_reference.url)?,
//!     OlsClient::new(&config.metadata.url)?,
//! )?;
//!
//! let pipeline = Pipeline::new(resolver, config.concurrency);
//! let report = pipeline
//!     .run(vec![ClinicalTrait::new("marfan syndrome", 3)], |_| {})
//!     .await;
//!
//! println!("{}", report.metrics.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cache;
mod config;
pub mod cross_reference;
mod error;
pub mod metadata;
mod metrics;
pub mod output;
mod pipeline;
pub mod primary;
mod resolver;
pub mod retry;


pub use cache::{CacheStats, ResultCache};
pub use config::{AnnotationConfig, CrossReferenceConfig, MetadataConfig, ResolverConfig};
pub use error::{ConfigError, ResolverError};
pub use metrics::ResolutionMetrics;
pub use output::{CurationRow, FinishedRow, TraitOutput, MAPPINGS_HEADER};
pub use pipeline::{Pipeline, PipelineReport};
pub use resolver::{ResolutionPath, Resolver};
