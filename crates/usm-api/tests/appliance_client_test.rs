#![allow(clippy::unwrap_used)]
// Integration tests for `ApplianceClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use usm_api::ApplianceClient;
use usm_api::models::ActivationRequest;

async fn setup() -> (MockServer, ApplianceClient) {
    let server = MockServer::start().await;
    let client = ApplianceClient::with_base_url(Url::parse(&server.uri()).unwrap()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_status_decodes_sentinel() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/1.0/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "notConnected"})))
        .mount(&server)
        .await;

    let probe = client.status().await.unwrap();
    assert_eq!(probe.http_status, 200);
    assert!(probe.is_awaiting_activation());
}

#[tokio::test]
async fn test_status_tolerates_undecodable_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/1.0/status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let probe = client.status().await.unwrap();
    assert_eq!(probe.http_status, 502);
    assert_eq!(probe.status, None);
}

#[tokio::test]
async fn test_activate_posts_request_with_appliance_origin() {
    let (server, client) = setup().await;
    let origin = server.uri();

    Mock::given(method("POST"))
        .and(path("/api/1.0/connect"))
        .and(header("Origin", origin.as_str()))
        .and(header("Referer", format!("{origin}/").as_str()))
        .and(body_json(json!({
            "key": "k-1",
            "masterNode": "tenant.alienvault.cloud",
            "name": "edge",
            "description": "lab"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let status = client
        .activate(&ActivationRequest {
            key: "k-1".into(),
            master_node: "tenant.alienvault.cloud".into(),
            name: "edge".into(),
            description: "lab".into(),
        })
        .await
        .unwrap();
    assert_eq!(status, 200);
}
