#![allow(clippy::unwrap_used)]
// Job operation sets against a mock scheduler collection.

mod common;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{api, connect, mount_json};
use usm_core::{
    BucketJob, BucketParams, CloudWatchParams, CoreError, GenericParams, JobCore, SourceFormat,
    schedule,
};

fn job(id: &str, action: &str, params: Value) -> Value {
    json!({
        "uuid": id,
        "sensor": "s-1",
        "schedule": "0 2 0/1 1/1 * ? *",
        "name": format!("job {id}"),
        "description": "",
        "disabled": false,
        "app": "amazon-aws",
        "action": action,
        "type": "collection",
        "custom": true,
        "params": params
    })
}

fn bucket(id: &str) -> Value {
    job(
        id,
        "s3TrackFiles",
        json!({"bucketName": format!("bucket-{id}"), "path": "/", "source": "raw"}),
    )
}

fn cloudwatch(id: &str) -> Value {
    job(
        id,
        "cloudWatchTrackFiles",
        json!({"regionName": "eu-west-1", "groupName": "g", "streamName": "s", "source": "syslog"}),
    )
}

fn new_bucket_job() -> BucketJob {
    BucketJob {
        core: JobCore {
            sensor: "s-1".into(),
            schedule: schedule::to_cron("hourly").into(),
            name: "cloudtrail".into(),
            // Caller-set tags must not survive.
            app: "something-else".into(),
            action: "cloudWatchTrackFiles".into(),
            job_type: "other".into(),
            custom: false,
            ..JobCore::default()
        },
        params: BucketParams {
            bucket_name: "trail-logs".into(),
            path: "/AWSLogs".into(),
            source_format: SourceFormat::Raw,
            plugin: String::new(),
        },
    }
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_stamps_tags_and_records_identifier() {
    let (server, plane) = connect().await;

    Mock::given(method("POST"))
        .and(path(api("scheduler")))
        .and(body_partial_json(json!({
            "app": "amazon-aws",
            "action": "s3TrackFiles",
            "type": "collection",
            "custom": true,
            "params": {"bucketName": "trail-logs", "source": "raw"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bucket("j-new")))
        .expect(1)
        .mount(&server)
        .await;

    let mut job = new_bucket_job();
    plane.jobs::<BucketParams>().create(&mut job).await.unwrap();

    assert_eq!(job.core.id.as_deref(), Some("j-new"));
    assert_eq!(job.core.app, "amazon-aws");
    assert_eq!(job.core.action, "s3TrackFiles");
    assert_eq!(job.core.job_type, "collection");
    assert!(job.core.custom);
}

#[tokio::test]
async fn test_create_with_identifier_is_rejected_before_any_request() {
    let (server, plane) = connect().await;

    Mock::given(method("POST"))
        .and(path(api("scheduler")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut job = new_bucket_job();
    job.core.id = Some("j-1".into());
    let result = plane.jobs::<BucketParams>().create(&mut job).await;

    assert!(
        matches!(result, Err(CoreError::Validation { .. })),
        "got: {result:?}"
    );
    assert_eq!(job.core.action, "cloudWatchTrackFiles");
}

#[tokio::test]
async fn test_create_without_returned_identifier_fails() {
    let (server, plane) = connect().await;
    mount_json(&server, "POST", api("scheduler"), json!({"name": "cloudtrail"})).await;

    let mut job = new_bucket_job();
    let result = plane.jobs::<BucketParams>().create(&mut job).await;

    assert!(matches!(result, Err(CoreError::Creation { .. })), "got: {result:?}");
    assert_eq!(job.core.id, None);
}

// ── Read ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_scans_a_single_listing() {
    let (server, plane) = connect().await;

    let mut jobs: Vec<Value> = (0..50).map(|i| bucket(&format!("j-{i}"))).collect();
    jobs.push(cloudwatch("cw-1"));

    Mock::given(method("GET"))
        .and(path(api("scheduler")))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(jobs)))
        .expect(1)
        .mount(&server)
        .await;

    let job = plane.jobs::<BucketParams>().get("j-37").await.unwrap();
    assert_eq!(job.params.bucket_name, "bucket-j-37");
}

#[tokio::test]
async fn test_typed_get_misses_other_kinds() {
    let (server, plane) = connect().await;
    mount_json(
        &server,
        "GET",
        api("scheduler"),
        json!([bucket("j-1"), cloudwatch("cw-1")]),
    )
    .await;

    let result = plane.jobs::<BucketParams>().get("cw-1").await;
    assert!(
        matches!(result, Err(CoreError::NotFound { .. })),
        "got: {result:?}"
    );

    let found = plane.jobs::<CloudWatchParams>().get("cw-1").await.unwrap();
    assert_eq!(found.params.region, "eu-west-1");
    assert_eq!(found.params.source_format, SourceFormat::Syslog);
}

#[tokio::test]
async fn test_typed_lists_are_subsets_of_generic() {
    let (server, plane) = connect().await;
    mount_json(
        &server,
        "GET",
        api("scheduler"),
        json!([
            bucket("j-1"),
            cloudwatch("cw-1"),
            job("sys-1", "builtinThing", json!({"anything": 1}))
        ]),
    )
    .await;

    let all = plane.jobs::<GenericParams>().list().await.unwrap();
    let buckets = plane.jobs::<BucketParams>().list().await.unwrap();
    let streams = plane.jobs::<CloudWatchParams>().list().await.unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(buckets.len(), 1);
    assert_eq!(streams.len(), 1);
    for typed in buckets
        .iter()
        .map(|j| &j.core)
        .chain(streams.iter().map(|j| &j.core))
    {
        assert!(all.iter().any(|g| g.core.id == typed.id));
    }
}

#[tokio::test]
async fn test_partial_sibling_does_not_break_get() {
    let (server, plane) = connect().await;
    mount_json(
        &server,
        "GET",
        api("scheduler"),
        json!([
            bucket("good"),
            job("partial", "s3TrackFiles", json!({"path": "/", "source": "raw"})),
            job("bad-format", "s3TrackFiles", json!({"bucketName": "b", "source": "json"})),
            job("builtin", "purgeLogs", Value::Null)
        ]),
    )
    .await;

    let jobs = plane.jobs::<BucketParams>();
    let good = jobs.get("good").await.unwrap();
    assert_eq!(good.params.bucket_name, "bucket-good");

    // Missing params decode to zero values.
    let partial = jobs.get("partial").await.unwrap();
    assert_eq!(partial.params.bucket_name, "");
    assert_eq!(partial.params.path, "/");

    // Undecodable params are skipped, not fatal.
    let result = jobs.get("bad-format").await;
    assert!(
        matches!(result, Err(CoreError::NotFound { .. })),
        "got: {result:?}"
    );

    let builtin = plane.jobs::<GenericParams>().get("builtin").await.unwrap();
    assert!(builtin.params.0.is_empty());
}

// ── Update / delete ─────────────────────────────────────────────────

#[tokio::test]
async fn test_update_tolerates_base_only_response() {
    let (server, plane) = connect().await;

    Mock::given(method("PUT"))
        .and(path(api("scheduler/j-1")))
        .and(body_partial_json(json!({"action": "s3TrackFiles", "name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut job = new_bucket_job();
    job.core.id = Some("j-1".into());
    job.core.name = "renamed".into();
    plane.jobs::<BucketParams>().update(&mut job).await.unwrap();

    assert_eq!(job.core.id.as_deref(), Some("j-1"));
    assert_eq!(job.core.action, "s3TrackFiles");
}

#[tokio::test]
async fn test_update_and_delete_require_identifier() {
    let (_server, plane) = connect().await;
    let mut job = new_bucket_job();

    let update = plane.jobs::<BucketParams>().update(&mut job).await;
    assert!(matches!(update, Err(CoreError::Validation { .. })));

    let delete = plane.jobs::<BucketParams>().delete(&job).await;
    assert!(matches!(delete, Err(CoreError::Validation { .. })));
}

#[tokio::test]
async fn test_delete_requires_200() {
    let (server, plane) = connect().await;

    Mock::given(method("DELETE"))
        .and(path(api("scheduler/j-1")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut job = new_bucket_job();
    job.core.id = Some("j-1".into());
    let result = plane.jobs::<BucketParams>().delete(&job).await;

    assert!(
        matches!(result, Err(CoreError::UnexpectedStatus { status: 204, .. })),
        "got: {result:?}"
    );
}
