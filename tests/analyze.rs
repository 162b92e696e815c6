//! HTTP contract tests for the analysis layer fetch.

use mmw_client::analyze::{AnalyzeParams, AnalyzeService};
use mmw_client::{FetchOptions, HttpClient, Settings, SuggestError};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> AnalyzeService {
    let mut settings = Settings::default();
    settings.api.base_url = server.uri();
    AnalyzeService::from_settings(HttpClient::new().unwrap(), &settings).unwrap()
}

#[tokio::test]
async fn test_fetch_layers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analyze/"))
        .and(query_param("area", "10"))
        .and(query_param("place", "Philadelphia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "land",
                "displayName": "Land",
                "categories": [
                    {"type": "Open Water", "area": 12.5, "coverage": 0.05},
                    {"type": "Developed, High Intensity", "area": 237.5, "coverage": 0.95}
                ]
            },
            {
                "name": "soil",
                "displayName": "Soil",
                "categories": [{"type": "Clay", "area": 250.0, "coverage": 1.0}]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let layers = assert_ok!(
        service
            .fetch_layers(&AnalyzeParams::default(), &FetchOptions::new())
            .await
    );

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].name, "land");
    assert_eq!(layers[0].total_area(), 250.0);
    assert_eq!(
        layers[0].dominant().map(|c| c.kind.as_str()),
        Some("Developed, High Intensity")
    );
    assert_eq!(layers[1].display_name.as_deref(), Some("Soil"));
}

#[tokio::test]
async fn test_fetch_layers_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analyze/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = assert_err!(
        service_for(&server)
            .fetch_layers(&AnalyzeParams::default(), &FetchOptions::new())
            .await
    );
    assert!(matches!(err, SuggestError::Status { status: 502, .. }));
    assert_eq!(err.origin(), Some("analyze"));
}

#[tokio::test]
async fn test_fetch_layers_wrong_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analyze/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"layers": []})))
        .mount(&server)
        .await;

    let err = assert_err!(
        service_for(&server)
            .fetch_layers(&AnalyzeParams::default(), &FetchOptions::new())
            .await
    );
    assert!(err.is_parse_error());
}
