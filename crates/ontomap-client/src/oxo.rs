//! OxO cross-reference client
//!
//! Implements [`CrossReferenceService`] with one bulk `POST search` request
//! per query. Search results with an empty mapping list are dropped, and a
//! response without `_embedded` is treated as no results.

use crate::http::{build_http_client, decode_json, join_url, DEFAULT_TIMEOUT_SECS};
use crate::ClientError;
use async_trait::async_trait;
use ontomap_domain::traits::{
    BridgedTerm, CrossReferenceHit, CrossReferenceQuery, CrossReferenceService,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default OxO API base URL
pub const DEFAULT_OXO_URL: &str = "https://www.ebi.ac.uk/spot/oxo/api";

/// Default number of search results requested per call
pub const DEFAULT_PAGE_SIZE: usize = 5000;

/// HTTP client for the cross-reference source
#[derive(Debug, Clone)]
pub struct OxoClient {
    base_url: String,
    page_size: usize,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Embedded {
    search_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    query_id: String,
    label: String,
    curie: String,
    mapping_response_list: Vec<MappingResponse>,
}

#[derive(Debug, Deserialize)]
struct MappingResponse {
    label: String,
    curie: String,
    distance: u32,
}

impl From<SearchResult> for CrossReferenceHit {
    fn from(result: SearchResult) -> Self {
        CrossReferenceHit {
            query_id: result.query_id,
            label: result.label,
            curie: result.curie,
            mappings: result
                .mapping_response_list
                .into_iter()
                .map(|mapping| BridgedTerm {
                    label: mapping.label,
                    curie: mapping.curie,
                    distance: mapping.distance,
                })
                .collect(),
        }
    }
}

impl SearchResponse {
    fn into_hits(self) -> Vec<CrossReferenceHit> {
        self.embedded
            .map(|embedded| embedded.search_results)
            .unwrap_or_default()
            .into_iter()
            .filter(|result| !result.mapping_response_list.is_empty())
            .map(CrossReferenceHit::from)
            .collect()
    }
}

impl OxoClient {
    /// Create a client with the default timeout and page size
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
            page_size: DEFAULT_PAGE_SIZE,
            client,
        }
    }

    /// Set the number of search results requested per call
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Form body with `ids` and `mappingTarget` repeated once per value
fn form_fields(query: &CrossReferenceQuery) -> Vec<(&'static str, String)> {
    let mut fields: Vec<(&'static str, String)> =
        Vec::with_capacity(query.ids.len() + query.targets.len() + 1);
    fields.extend(query.ids.iter().map(|id| ("ids", id.clone())));
    fields.extend(query.targets.iter().map(|target| ("mappingTarget", target.clone())));
    fields.push(("distance", query.distance.to_string()));
    fields
}

#[async_trait]
impl CrossReferenceService for OxoClient {
    type Error = ClientError;

    async fn search(
        &self,
        query: &CrossReferenceQuery,
    ) -> Result<Vec<CrossReferenceHit>, Self::Error> {
        let url = join_url(&self.base_url, "search");
        debug!(
            "OxO search for {} ids, targets {:?}, distance {}",
            query.ids.len(),
            query.targets,
            query.distance
        );

        let response = self
            .client
            .post(&url)
            .query(&[("size", self.page_size)])
            .form(&form_fields(query))
            .send()
            .await?;

        let body: SearchResponse = decode_json(response).await?;
        Ok(body.into_hits())
    }
}
