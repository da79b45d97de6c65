#![allow(clippy::unwrap_used, dead_code)]
// Shared wiremock fixtures for usm-core integration tests.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use usm_core::{ApiVersion, ControlPlane, ControlPlaneConfig, ProvisionTiming, TlsVerification};

pub const TOKEN_COOKIE: &str = "XSRF-TOKEN=abc123; Path=/";

pub fn api(suffix: &str) -> String {
    format!("/api/1.0/{suffix}")
}

pub async fn mount_login(server: &MockServer) {
    for (verb, route) in [("GET", "/".to_owned()), ("POST", api("login")), ("GET", api(""))] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).insert_header("Set-Cookie", TOKEN_COOKIE))
            .mount(server)
            .await;
    }
}

pub fn config(server: &MockServer, timing: ProvisionTiming) -> ControlPlaneConfig {
    ControlPlaneConfig {
        url: Url::parse(&server.uri()).unwrap(),
        api_version: ApiVersion::V1,
        username: "ops@example.com".into(),
        password: SecretString::from("hunter22"),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(5),
        provisioning: timing,
    }
}

/// Mock control plane plus an authenticated facade against it.
pub async fn connect() -> (MockServer, ControlPlane) {
    connect_with(fast_timing()).await
}

pub async fn connect_with(timing: ProvisionTiming) -> (MockServer, ControlPlane) {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let plane = ControlPlane::connect(config(&server, timing)).await.unwrap();
    (server, plane)
}

pub fn fast_timing() -> ProvisionTiming {
    ProvisionTiming::uniform(Duration::from_millis(10))
}

pub fn sensor(id: &str, name: &str, status: &str, setup_status: &str) -> Value {
    json!({
        "uuid": id,
        "name": name,
        "description": "",
        "activation_code": "",
        "status": status,
        "setupStatus": setup_status
    })
}

pub fn license(sensor_limit: u32) -> Value {
    json!({
        "controlNodesAllowed": 1,
        "sensorNodesAllowed": sensor_limit,
        "monthlyKBStorage": 1_048_576,
        "expiration": 4_102_444_800_i64
    })
}

pub fn key(id: &str, node_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "createdAt": 1_700_000_000,
        "expires": 1_700_086_400,
        "nodeId": node_id
    })
}

pub async fn mount_json(server: &MockServer, verb: &str, route: String, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
