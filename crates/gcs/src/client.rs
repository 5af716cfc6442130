//! GCS client implementation
//!
//! Wraps google-cloud-storage and implements the ObjectStore trait from
//! st-core. All normalization from provider records into BucketRecord and
//! ObjectRecord happens here, as does the mapping of provider HTTP failures
//! onto the st-core error taxonomy.

use async_trait::async_trait;

use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::Error as HttpError;
use google_cloud_storage::http::buckets::Bucket;
use google_cloud_storage::http::buckets::delete::DeleteBucketRequest;
use google_cloud_storage::http::buckets::insert::{
    BucketCreationConfig, InsertBucketParam, InsertBucketRequest,
};
use google_cloud_storage::http::buckets::list::ListBucketsRequest;
use google_cloud_storage::http::objects::Object;
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::rewrite::RewriteObjectRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use st_core::{BucketRecord, Config, Error, ObjectRecord, ObjectStore, Result};

/// GCS client wrapper
pub struct GcsStore {
    inner: Client,
    project_id: String,
}

impl GcsStore {
    /// Connect using the given configuration.
    ///
    /// With an emulator endpoint configured the client connects anonymously;
    /// otherwise ambient credentials are resolved by the SDK. The project id
    /// comes from the configuration, falling back to the project carried by
    /// the credentials.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client_config = match &config.endpoint {
            Some(endpoint) => {
                let mut client_config = ClientConfig::default().anonymous();
                client_config.storage_endpoint = endpoint.clone();
                client_config
            }
            None => ClientConfig::default()
                .with_auth()
                .await
                .map_err(|e| Error::Auth(e.to_string()))?,
        };

        let project_id = config
            .project_id
            .clone()
            .or_else(|| client_config.project_id.clone())
            .ok_or_else(|| {
                Error::Config(format!(
                    "project id not set; pass --project or set {}",
                    st_core::config::PROJECT_ENV
                ))
            })?;

        Ok(Self {
            inner: Client::new(client_config),
            project_id,
        })
    }

    /// Wrap an already-built SDK client
    pub fn with_client(inner: Client, project_id: impl Into<String>) -> Self {
        Self {
            inner,
            project_id: project_id.into(),
        }
    }

    /// Get the resolved project id
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

/// Map a provider HTTP failure onto the st-core taxonomy
fn map_http_err(err: HttpError, what: &str) -> Error {
    match err {
        HttpError::Response(response) => status_error(response.code, &response.message, what),
        HttpError::TokenSource(source) => Error::Auth(format!("{what}: {source}")),
        other => Error::Network(format!("{what}: {other}")),
    }
}

/// Map an HTTP status code onto the st-core taxonomy.
///
/// GCS reports both bucket-name collisions and non-empty-bucket deletions as
/// 409, so the message text disambiguates the two.
fn status_error(code: u16, message: &str, what: &str) -> Error {
    match code {
        404 => Error::NotFound(format!("{what}: {message}")),
        401 | 403 => Error::PermissionDenied(format!("{what}: {message}")),
        412 => Error::PreconditionFailed(format!("{what}: {message}")),
        409 if message.to_ascii_lowercase().contains("not empty") => {
            Error::PreconditionFailed(format!("{what}: {message}"))
        }
        409 => Error::AlreadyExists(format!("{what}: {message}")),
        _ => Error::Network(format!("{what}: HTTP {code}: {message}")),
    }
}

fn bucket_record(bucket: Bucket) -> BucketRecord {
    BucketRecord {
        name: bucket.name,
        created: bucket.time_created,
        location: bucket.location,
        storage_class: bucket.storage_class,
    }
}

fn object_record(object: Object) -> ObjectRecord {
    ObjectRecord {
        name: object.name,
        size: Some(object.size),
        updated: object.updated,
        content_type: object.content_type,
        md5_hash: object.md5_hash,
        generation: None,
    }
}

fn version_record(object: Object) -> ObjectRecord {
    let generation = object.generation;
    object_record(object).with_generation(generation)
}

/// Keep only the generations of the named object.
///
/// The provider's listing is prefix-based: asking for "dir/a" also returns
/// "dir/a2" and "dir/a/x". Those siblings must be discarded, not returned.
fn exact_versions(objects: Vec<Object>, name: &str) -> Vec<ObjectRecord> {
    objects
        .into_iter()
        .filter(|object| object.name == name)
        .map(version_record)
        .collect()
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn list_buckets(&self) -> Result<Vec<BucketRecord>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .inner
                .list_buckets(&ListBucketsRequest {
                    project: self.project_id.clone(),
                    page_token: page_token.clone(),
                    ..Default::default()
                })
                .await
                .map_err(|e| map_http_err(e, "list buckets"))?;

            records.extend(response.items.into_iter().map(bucket_record));

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<ObjectRecord>> {
        let prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        let delimiter = (!delimiter.is_empty()).then(|| delimiter.to_string());

        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .inner
                .list_objects(&ListObjectsRequest {
                    bucket: bucket.to_string(),
                    prefix: prefix.clone(),
                    delimiter: delimiter.clone(),
                    page_token: page_token.clone(),
                    ..Default::default()
                })
                .await
                .map_err(|e| map_http_err(e, &format!("list objects in bucket '{bucket}'")))?;

            if let Some(items) = response.items {
                records.extend(items.into_iter().map(object_record));
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn read_object(&self, bucket: &str, object: &str) -> Result<String> {
        let data = self
            .inner
            .download_object(
                &GetObjectRequest {
                    bucket: bucket.to_string(),
                    object: object.to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await
            .map_err(|e| map_http_err(e, &format!("read object '{bucket}/{object}'")))?;

        String::from_utf8(data).map_err(|e| {
            Error::Decode(format!("object '{bucket}/{object}' is not valid UTF-8 text: {e}"))
        })
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location: &str,
        storage_class: &str,
    ) -> Result<BucketRecord> {
        let created = self
            .inner
            .insert_bucket(&InsertBucketRequest {
                name: bucket.to_string(),
                param: InsertBucketParam {
                    project: self.project_id.clone(),
                    ..Default::default()
                },
                bucket: BucketCreationConfig {
                    location: location.to_string(),
                    storage_class: Some(storage_class.to_string()),
                    ..Default::default()
                },
            })
            .await
            .map_err(|e| map_http_err(e, &format!("create bucket '{bucket}'")))?;

        Ok(bucket_record(created))
    }

    async fn delete_bucket(&self, bucket: &str, force: bool) -> Result<()> {
        if force {
            // Unbounded enumerate-then-delete with no rollback: a failure
            // mid-loop leaves the bucket partially emptied and still present.
            let objects = self.list_objects(bucket, "", "").await?;
            tracing::debug!(bucket, count = objects.len(), "emptying bucket before delete");
            for object in objects {
                self.delete_object(bucket, &object.name).await?;
            }
        }

        self.inner
            .delete_bucket(&DeleteBucketRequest {
                bucket: bucket.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| map_http_err(e, &format!("delete bucket '{bucket}'")))
    }

    async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        content: &str,
        content_type: &str,
    ) -> Result<ObjectRecord> {
        let media = Media {
            name: object.to_string().into(),
            content_type: content_type.to_string().into(),
            content_length: None,
        };

        let uploaded = self
            .inner
            .upload_object(
                &UploadObjectRequest {
                    bucket: bucket.to_string(),
                    ..Default::default()
                },
                content.as_bytes().to_vec(),
                &UploadType::Simple(media),
            )
            .await
            .map_err(|e| map_http_err(e, &format!("upload object '{bucket}/{object}'")))?;

        Ok(object_record(uploaded))
    }

    async fn delete_object(&self, bucket: &str, object: &str) -> Result<()> {
        self.inner
            .delete_object(&DeleteObjectRequest {
                bucket: bucket.to_string(),
                object: object.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| map_http_err(e, &format!("delete object '{bucket}/{object}'")))
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        dst_bucket: &str,
        dst_object: &str,
    ) -> Result<ObjectRecord> {
        let what = format!("copy '{src_bucket}/{src_object}' to '{dst_bucket}/{dst_object}'");
        let mut rewrite_token: Option<String> = None;

        // Large or cross-region copies need multiple rewrite rounds.
        loop {
            let response = self
                .inner
                .rewrite_object(&RewriteObjectRequest {
                    source_bucket: src_bucket.to_string(),
                    source_object: src_object.to_string(),
                    destination_bucket: dst_bucket.to_string(),
                    destination_object: dst_object.to_string(),
                    rewrite_token: rewrite_token.clone(),
                    ..Default::default()
                })
                .await
                .map_err(|e| map_http_err(e, &what))?;

            if response.done {
                if let Some(resource) = response.resource {
                    return Ok(object_record(resource));
                }

                // Rewrite finished without destination metadata; read it back.
                let object = self
                    .inner
                    .get_object(&GetObjectRequest {
                        bucket: dst_bucket.to_string(),
                        object: dst_object.to_string(),
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| map_http_err(e, &what))?;
                return Ok(object_record(object));
            }

            tracing::debug!(
                rewritten = response.total_bytes_rewritten,
                total = response.object_size,
                "rewrite round incomplete, continuing"
            );
            rewrite_token = response.rewrite_token;
        }
    }

    async fn list_object_versions(&self, bucket: &str, object: &str) -> Result<Vec<ObjectRecord>> {
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .inner
                .list_objects(&ListObjectsRequest {
                    bucket: bucket.to_string(),
                    prefix: Some(object.to_string()),
                    versions: Some(true),
                    page_token: page_token.clone(),
                    ..Default::default()
                })
                .await;

            let response = match response {
                Ok(response) => response,
                // A missing bucket yields an empty listing, not an error.
                Err(HttpError::Response(response)) if response.code == 404 => {
                    return Ok(Vec::new());
                }
                Err(e) => {
                    return Err(map_http_err(
                        e,
                        &format!("list versions of '{bucket}/{object}'"),
                    ));
                }
            };

            if let Some(items) = response.items {
                objects.extend(items);
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(exact_versions(objects, object))
    }
}
