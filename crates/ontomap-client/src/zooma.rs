//! Zooma annotation client
//!
//! Implements [`AnnotationService`] against Zooma's `services/annotate`
//! endpoint. Each JSON result becomes one [`AnnotationHit`]; an unknown
//! confidence string fails the whole response as malformed.
//!
//! # Examples
//!
//! ```no_run
//! use ontomap_client::ZoomaClient;
//!
//! let client = ZoomaClient::new("https://www.ebi.ac.uk/spot/zooma/v2/api").unwrap();
//! ```

use crate::http::{build_http_client, decode_json, join_url, DEFAULT_TIMEOUT_SECS};
use crate::ClientError;
use async_trait::async_trait;
use ontomap_domain::traits::{AnnotationHit, AnnotationQuery, AnnotationService};
use ontomap_domain::ConfidenceClass;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default Zooma API base URL
pub const DEFAULT_ZOOMA_URL: &str = "https://www.ebi.ac.uk/spot/zooma/v2/api";

/// HTTP client for the primary annotation source
#[derive(Debug, Clone)]
pub struct ZoomaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoomaAnnotation {
    semantic_tags: Vec<String>,
    annotated_property: AnnotatedProperty,
    confidence: String,
    derived_from: DerivedFrom,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotatedProperty {
    property_value: String,
}

#[derive(Debug, Deserialize)]
struct DerivedFrom {
    provenance: Provenance,
}

#[derive(Debug, Deserialize)]
struct Provenance {
    source: Source,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: String,
}

impl TryFrom<ZoomaAnnotation> for AnnotationHit {
    type Error = ClientError;

    fn try_from(annotation: ZoomaAnnotation) -> Result<Self, Self::Error> {
        let confidence = ConfidenceClass::parse(&annotation.confidence).ok_or_else(|| {
            let message = format!("unknown confidence '{}'", annotation.confidence);
            ClientError::MalformedResponse(message)
        })?;

        Ok(AnnotationHit {
            label: annotation.annotated_property.property_value,
            uris: annotation.semantic_tags,
            confidence,
            source: annotation.derived_from.provenance.source.name,
        })
    }
}

impl ZoomaClient {
    /// Create a client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self::with_client(base_url, build_http_client(timeout)?))
    }

    /// Create a client sharing an existing reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnnotationService for ZoomaClient {
    type Error = ClientError;

    async fn annotate(&self, query: &AnnotationQuery) -> Result<Vec<AnnotationHit>, Self::Error> {
        let url = join_url(&self.base_url, "services/annotate");
        let filter = query.filters.filter_expression();
        debug!("Zooma query for '{}' with filter {}", query.property_value, filter);

        let response = self
            .client
            .get(&url)
            .query(&[("propertyValue", query.property_value.as_str()), ("filter", filter.as_str())])
            .send()
            .await?;

        let annotations: Vec<ZoomaAnnotation> = decode_json(response).await?;
        annotations.into_iter().map(AnnotationHit::try_from).collect()
    }
}
