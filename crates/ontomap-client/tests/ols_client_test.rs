//! Integration tests for the OLS client against a mock HTTP server.

use ontomap_client::{ClientError, OlsClient};
use ontomap_domain::traits::TermMetadataService;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORPHANET_425: &str = "http://www.orpha.net/ORDO/Orphanet_425";

#[tokio::test]
async fn test_preferred_label_from_defining_ontology() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "_embedded": {
            "terms": [
                {"iri": ORPHANET_425, "label": "imported label", "is_defining_ontology": false},
                {"iri": ORPHANET_425, "label": "Apolipoprotein A-I deficiency", "is_defining_ontology": true}
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/ols/api/terms"))
        .and(query_param("iri", ORPHANET_425))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OlsClient::new(format!("{}/ols/api", mock_server.uri())).unwrap();
    let label = client.preferred_label(ORPHANET_425).await.unwrap();
    assert_eq!(label.as_deref(), Some("Apolipoprotein A-I deficiency"));
}

#[tokio::test]
async fn test_target_term_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/ols/api/ontologies/efo/terms/http%253A%252F%252F.*Orphanet_425$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "iri": ORPHANET_425,
            "label": "Apolipoprotein A-I deficiency",
            "is_obsolete": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OlsClient::new(format!("{}/ols/api", mock_server.uri())).unwrap();
    let record = client.target_term(ORPHANET_425).await.unwrap().unwrap();
    assert!(!record.is_obsolete);
    assert_eq!(record.label, "Apolipoprotein A-I deficiency");
}

#[tokio::test]
async fn test_target_term_obsolete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/ontologies/efo/terms/.+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "label": "obsolete term",
            "is_obsolete": true
        })))
        .mount(&mock_server)
        .await;

    let client = OlsClient::new(mock_server.uri()).unwrap();
    let record = client.target_term(ORPHANET_425).await.unwrap().unwrap();
    assert!(record.is_obsolete);
}

#[tokio::test]
async fn test_target_term_not_found_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/ontologies/efo/terms/.+"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = OlsClient::new(mock_server.uri()).unwrap();
    assert_eq!(client.target_term(ORPHANET_425).await.unwrap(), None);
}

#[tokio::test]
async fn test_target_term_server_error_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/ontologies/efo/terms/.+"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = OlsClient::new(mock_server.uri()).unwrap();
    let err = client.target_term(ORPHANET_425).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 502, .. }), "{:?}", err);
}
