//! Ontomap Service Client Layer
//!
//! HTTP implementations of the service traits from `ontomap-domain`.
//!
//! # Clients
//!
//! - `ZoomaClient`: primary annotation source
//! - `OxoClient`: bulk cross-reference search
//! - `OlsClient`: term labels and target ontology membership
//! - `mock`: deterministic in-memory doubles for testing
//!
//! # Examples
//!
//! ```
//! use ontomap_client::mock::MockAnnotationService;
//!
//! let service = MockAnnotationService::new();
//! assert_eq!(service.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod mock;
pub mod ols;
pub mod oxo;
pub mod zooma;

pub use error::ClientError;
pub use http::{build_http_client, DEFAULT_TIMEOUT_SECS};
pub use ols::{OlsClient, DEFAULT_OLS_URL, DEFAULT_TARGET_ONTOLOGY};
pub use oxo::{OxoClient, DEFAULT_OXO_URL, DEFAULT_PAGE_SIZE};
pub use zooma::{ZoomaClient, DEFAULT_ZOOMA_URL};
