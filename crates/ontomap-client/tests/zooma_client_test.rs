//! Integration tests for the Zooma client against a mock HTTP server.

use ontomap_client::{ClientError, ZoomaClient};
use ontomap_domain::traits::{AnnotationFilters, AnnotationQuery, AnnotationService};
use ontomap_domain::ConfidenceClass;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query(value: &str) -> AnnotationQuery {
    AnnotationQuery::new(
        value,
        AnnotationFilters {
            required: vec!["cttv".to_string(), "eva-clinvar".to_string(), "gwas".to_string()],
            ontologies: vec!["efo".to_string(), "ordo".to_string(), "hp".to_string()],
            preferred: vec!["eva-clinvar".to_string(), "cttv".to_string(), "gwas".to_string()],
        },
    )
}

#[tokio::test]
async fn test_annotate_sends_filters_and_parses_results() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "semanticTags": [
                "http://www.ebi.ac.uk/efo/EFO_0003847",
                "http://purl.obolibrary.org/obo/HP_0001249"
            ],
            "annotatedProperty": {"propertyType": "trait", "propertyValue": "Intellectual disability"},
            "confidence": "HIGH",
            "derivedFrom": {"provenance": {"source": {"name": "eva-clinvar"}}}
        },
        {
            "semanticTags": ["http://www.orpha.net/ORDO/Orphanet_183757"],
            "annotatedProperty": {"propertyValue": "mental retardation"},
            "confidence": "medium",
            "derivedFrom": {"provenance": {"source": {"name": "gwas"}}}
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/spot/zooma/v2/api/services/annotate"))
        .and(query_param("propertyValue", "intellectual disability"))
        .and(query_param(
            "filter",
            "required:[cttv,eva-clinvar,gwas],ontologies:[efo,ordo,hp],preferred:[eva-clinvar,cttv,gwas]",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ZoomaClient::new(format!("{}/spot/zooma/v2/api", mock_server.uri())).unwrap();
    let hits = client.annotate(&query("intellectual disability")).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].label, "Intellectual disability");
    assert_eq!(hits[0].uris.len(), 2);
    assert_eq!(hits[0].confidence, ConfidenceClass::High);
    assert_eq!(hits[0].source, "eva-clinvar");
    assert_eq!(hits[1].confidence, ConfidenceClass::Medium);
}

#[tokio::test]
async fn test_annotate_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = ZoomaClient::new(mock_server.uri()).unwrap();
    let hits = client.annotate(&query("nothing like this")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_annotate_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/annotate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = ZoomaClient::new(mock_server.uri()).unwrap();
    let err = client.annotate(&query("x")).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 503, .. }), "{:?}", err);
}

#[tokio::test]
async fn test_annotate_invalid_json_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = ZoomaClient::new(mock_server.uri()).unwrap();
    let err = client.annotate(&query("x")).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)), "{:?}", err);
}
