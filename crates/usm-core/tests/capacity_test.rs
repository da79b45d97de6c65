#![allow(clippy::unwrap_used)]
// License capacity checks against live counts.

mod common;

use serde_json::{Value, json};

use common::{api, connect, key, license, mount_json, sensor};

fn sensors(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| sensor(&format!("s-{i}"), &format!("edge-{i}"), "Ready", "Complete"))
            .collect(),
    )
}

#[tokio::test]
async fn test_pending_keys_count_against_limit() {
    let (server, plane) = connect().await;
    mount_json(&server, "GET", api("sensors"), sensors(3)).await;
    mount_json(
        &server,
        "GET",
        api("sensors/key"),
        json!([key("k-1", None), key("k-2", None)]),
    )
    .await;
    mount_json(&server, "GET", api("license"), license(5)).await;

    assert!(!plane.capacity().has_sensor_key_availability().await.unwrap());
}

#[tokio::test]
async fn test_consumed_keys_do_not_count() {
    let (server, plane) = connect().await;
    mount_json(&server, "GET", api("sensors"), sensors(3)).await;
    mount_json(
        &server,
        "GET",
        api("sensors/key"),
        json!([key("k-1", None), key("k-2", Some("node-7"))]),
    )
    .await;
    mount_json(&server, "GET", api("license"), license(5)).await;

    assert!(plane.capacity().has_sensor_key_availability().await.unwrap());
}

#[tokio::test]
async fn test_sensor_availability_ignores_keys() {
    let (server, plane) = connect().await;
    mount_json(&server, "GET", api("sensors"), sensors(4)).await;
    mount_json(&server, "GET", api("license"), license(5)).await;

    assert!(plane.capacity().has_sensor_availability().await.unwrap());

    let (full, plane) = connect().await;
    mount_json(&full, "GET", api("sensors"), sensors(5)).await;
    mount_json(&full, "GET", api("license"), license(5)).await;

    assert!(!plane.capacity().has_sensor_availability().await.unwrap());
}
