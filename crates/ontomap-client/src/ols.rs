//! OLS term metadata client
//!
//! Two lookups are exposed through [`TermMetadataService`]:
//! - the preferred label, taken from the first term whose ontology defines it
//! - the term as recorded in the target ontology (EFO by default); the URI is
//!   double URL-encoded into the path, and a 404 means the term is absent

use crate::http::{build_http_client, decode_json, join_url, DEFAULT_TIMEOUT_SECS};
use crate::ClientError;
use async_trait::async_trait;
use ontomap_domain::traits::{TermMetadataService, TermRecord};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default OLS API base URL
pub const DEFAULT_OLS_URL: &str = "https://www.ebi.ac.uk/ols/api";

/// Default target reference ontology
pub const DEFAULT_TARGET_ONTOLOGY: &str = "efo";

/// HTTP client for the term metadata source
#[derive(Debug, Clone)]
pub struct OlsClient {
    base_url: String,
    target_ontology: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TermsResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedTerms>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedTerms {
    terms: Vec<OlsTerm>,
}

#[derive(Debug, Deserialize)]
struct OlsTerm {
    label: String,
    is_defining_ontology: bool,
}

#[derive(Debug, Deserialize)]
struct OntologyTerm {
    label: String,
    is_obsolete: bool,
}

impl TermsResponse {
    fn defining_label(self) -> Option<String> {
        self.embedded?
            .terms
            .into_iter()
            .find(|term| term.is_defining_ontology)
            .map(|term| term.label)
    }
}

/// Percent-encode twice, as OLS expects IRIs in path segments
///
/// # Examples
///
/// ```
/// use ontomap_client::ols::double_encode;
///
/// assert_eq!(
///     double_encode("http://www.orpha.net/ORDO/Orphanet_425"),
///     "http%253A%252F%252Fwww.orpha.net%252FORDO%252FOrphanet_425"
/// );
/// ```
pub fn double_encode(uri: &str) -> String {
    let once = urlencoding::encode(uri);
    urlencoding::encode(&once).into_owned()
}

impl OlsClient {
    /// Create a client for the default target ontology
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
            target_ontology: DEFAULT_TARGET_ONTOLOGY.to_string(),
            client,
        }
    }

    /// Check membership against a different ontology
    pub fn with_target_ontology(mut self, ontology: impl Into<String>) -> Self {
        self.target_ontology = ontology.into();
        self
    }

    /// Ontology membership is checked against
    pub fn target_ontology(&self) -> &str {
        &self.target_ontology
    }

    fn target_term_url(&self, uri: &str) -> String {
        join_url(
            &self.base_url,
            &format!("ontologies/{}/terms/{}", self.target_ontology, double_encode(uri)),
        )
    }
}

#[async_trait]
impl TermMetadataService for OlsClient {
    type Error = ClientError;

    async fn preferred_label(&self, uri: &str) -> Result<Option<String>, Self::Error> {
        let url = join_url(&self.base_url, "terms");
        debug!("OLS label lookup for {}", uri);

        let response = self.client.get(&url).query(&[("iri", uri)]).send().await?;
        let body: TermsResponse = decode_json(response).await?;
        Ok(body.defining_label())
    }

    async fn target_term(&self, uri: &str) -> Result<Option<TermRecord>, Self::Error> {
        let url = self.target_term_url(uri);
        debug!("OLS {} lookup for {}", self.target_ontology, uri);

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let term: OntologyTerm = decode_json(response).await?;
        Ok(Some(TermRecord {
            label: term.label,
            is_obsolete: term.is_obsolete,
        }))
    }
}
