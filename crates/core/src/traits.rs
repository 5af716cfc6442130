//! ObjectStore trait definition
//!
//! This trait defines the interface for the storage operations exposed as
//! tools. It decouples the MCP layer from the specific provider SDK, so the
//! dispatch code can be exercised against a fake store in tests.
//!
//! Every method is an independent, stateless request-response unit: no
//! ordering guarantees between calls, no caching, no retries. Provider
//! failures are mapped to the [`crate::error::Error`] taxonomy and propagated
//! unchanged in substance.

use async_trait::async_trait;

use crate::error::Result;
use crate::records::{BucketRecord, ObjectRecord};

/// Interface to a remote object-storage provider
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets in the project
    async fn list_buckets(&self) -> Result<Vec<BucketRecord>>;

    /// List objects in a bucket, filtered by prefix and grouped by delimiter.
    ///
    /// Only objects are returned; delimiter-grouped pseudo-directories are
    /// consumed by the provider and not surfaced. An empty delimiter disables
    /// grouping and lists recursively.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<ObjectRecord>>;

    /// Read an object's content decoded as UTF-8 text.
    ///
    /// Non-text content fails with [`crate::error::Error::Decode`].
    async fn read_object(&self, bucket: &str, object: &str) -> Result<String>;

    /// Create a new bucket.
    ///
    /// Not idempotent: retrying the same name fails with `AlreadyExists`
    /// (bucket names are unique provider-wide).
    async fn create_bucket(
        &self,
        bucket: &str,
        location: &str,
        storage_class: &str,
    ) -> Result<BucketRecord>;

    /// Delete a bucket.
    ///
    /// With `force`, every object in the bucket is deleted first, one by one.
    /// The sequence is not atomic: a failure mid-loop leaves the bucket
    /// partially emptied and still present.
    async fn delete_bucket(&self, bucket: &str, force: bool) -> Result<()>;

    /// Upload text content to an object, overwriting any existing object at
    /// that path (last write wins, no conflict detection).
    async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        content: &str,
        content_type: &str,
    ) -> Result<ObjectRecord>;

    /// Delete an object. Strict: a missing object fails with `NotFound`.
    async fn delete_object(&self, bucket: &str, object: &str) -> Result<()>;

    /// Copy an object, creating or overwriting the destination. The source is
    /// left untouched.
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        dst_bucket: &str,
        dst_object: &str,
    ) -> Result<ObjectRecord>;

    /// List all generations of a single object.
    ///
    /// The provider's listing is prefix-based, so results are post-filtered to
    /// exact name matches: siblings that merely share the prefix (`"dir/a2"`
    /// when asked for `"dir/a"`) are discarded. A missing bucket or object
    /// yields an empty list, not an error.
    async fn list_object_versions(&self, bucket: &str, object: &str) -> Result<Vec<ObjectRecord>>;
}
