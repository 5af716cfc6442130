//! Integration tests for the stratus GCS adapter
//!
//! These tests require a running GCS emulator, for example fake-gcs-server:
//!
//! ```bash
//! docker run -d --name fake-gcs -p 4443:4443 \
//!     fsouza/fake-gcs-server -scheme http -public-host localhost:4443
//!
//! STORAGE_EMULATOR_HOST=http://localhost:4443 \
//! GOOGLE_CLOUD_PROJECT=test-project \
//!     cargo test -p stratus-mcp --features integration
//! ```

#![cfg(feature = "integration")]

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use st_core::{Config, ObjectStore};
use st_gcs::GcsStore;
use stratus_mcp::server::{
    CreateBucketParams, DeleteBucketParams, ReadObjectParams, StratusMcpServer,
    UploadObjectParams,
};

/// Connect to the emulator, or return None to skip when unconfigured
async fn connect() -> Option<Arc<GcsStore>> {
    let config = Config::from_env();
    config.endpoint.as_ref()?;

    let config = if config.project_id.is_some() {
        config
    } else {
        config.with_project("test-project")
    };

    match GcsStore::connect(&config).await {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            eprintln!("Failed to connect to emulator: {e}");
            None
        }
    }
}

/// Unique bucket name per test run
fn unique_bucket(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("stratus-it-{tag}-{nanos}")
}

#[tokio::test]
async fn test_bucket_lifecycle() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("lifecycle");

    let created = store.create_bucket(&bucket, "US", "STANDARD").await.unwrap();
    assert_eq!(created.name, bucket);

    let buckets = store.list_buckets().await.unwrap();
    assert!(buckets.iter().any(|b| b.name == bucket));

    store.delete_bucket(&bucket, false).await.unwrap();

    let buckets = store.list_buckets().await.unwrap();
    assert!(!buckets.iter().any(|b| b.name == bucket));
}

#[tokio::test]
async fn test_upload_read_round_trip() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("roundtrip");

    store.create_bucket(&bucket, "US", "STANDARD").await.unwrap();

    let uploaded = store
        .upload_object(&bucket, "greeting.txt", "hello", "text/plain")
        .await
        .unwrap();
    assert_eq!(uploaded.name, "greeting.txt");

    let content = store.read_object(&bucket, "greeting.txt").await.unwrap();
    assert_eq!(content, "hello");

    store.delete_bucket(&bucket, true).await.unwrap();
}

#[tokio::test]
async fn test_force_delete_non_empty_bucket() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("force");

    store.create_bucket(&bucket, "US", "STANDARD").await.unwrap();
    for name in ["a.txt", "b.txt", "dir/c.txt"] {
        store
            .upload_object(&bucket, name, "data", "text/plain")
            .await
            .unwrap();
    }

    // Emulators vary in how they phrase the conflict; it must fail either way.
    assert!(store.delete_bucket(&bucket, false).await.is_err());

    store.delete_bucket(&bucket, true).await.unwrap();

    let buckets = store.list_buckets().await.unwrap();
    assert!(!buckets.iter().any(|b| b.name == bucket));
}

#[tokio::test]
async fn test_copy_preserves_source() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("copy");

    store.create_bucket(&bucket, "US", "STANDARD").await.unwrap();
    store
        .upload_object(&bucket, "src.txt", "payload", "text/plain")
        .await
        .unwrap();

    let copied = store
        .copy_object(&bucket, "src.txt", &bucket, "dst.txt")
        .await
        .unwrap();
    assert_eq!(copied.name, "dst.txt");

    assert_eq!(store.read_object(&bucket, "src.txt").await.unwrap(), "payload");
    assert_eq!(store.read_object(&bucket, "dst.txt").await.unwrap(), "payload");

    store.delete_bucket(&bucket, true).await.unwrap();
}

#[tokio::test]
async fn test_delimiter_listing_direct_children() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("listing");

    store.create_bucket(&bucket, "US", "STANDARD").await.unwrap();
    for name in ["a/one.txt", "a/two.txt", "a/nested/three.txt", "b/other.txt"] {
        store
            .upload_object(&bucket, name, "data", "text/plain")
            .await
            .unwrap();
    }

    let objects = store.list_objects(&bucket, "a/", "/").await.unwrap();
    let mut names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a/one.txt", "a/two.txt"]);

    store.delete_bucket(&bucket, true).await.unwrap();
}

#[tokio::test]
async fn test_server_dispatch_against_emulator() {
    let Some(store) = connect().await else { return };
    let bucket = unique_bucket("dispatch");

    let server = StratusMcpServer::new(store.clone());

    let json = server
        .handle_create_bucket(CreateBucketParams {
            bucket_name: bucket.clone(),
            location: "US".to_string(),
            storage_class: "STANDARD".to_string(),
        })
        .await
        .unwrap();
    let created: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(created["name"], bucket.as_str());

    server
        .handle_upload_object(UploadObjectParams {
            bucket_name: bucket.clone(),
            object_path: "file.txt".to_string(),
            content: "via-mcp".to_string(),
            content_type: "text/plain".to_string(),
        })
        .await
        .unwrap();

    let content = server
        .handle_read_object(ReadObjectParams {
            bucket_name: bucket.clone(),
            object_path: "file.txt".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(content, "via-mcp");

    let result = server
        .handle_delete_bucket(DeleteBucketParams {
            bucket_name: bucket.clone(),
            force: true,
        })
        .await
        .unwrap();
    assert_eq!(result, "true");
}
