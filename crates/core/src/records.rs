//! Normalized bucket and object records
//!
//! Every adapter operation returns these two shapes, regardless of what the
//! provider's own response types look like. Records are transient views built
//! fresh from live provider state on each call; nothing is cached between
//! calls. Timestamps serialize as RFC 3339; absent optional fields are omitted
//! from the JSON encoding.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Metadata for a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Bucket name, unique within the provider namespace
    pub name: String,

    /// Creation timestamp; absent until the provider commits creation
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<OffsetDateTime>,

    /// Provider region or multi-region code
    pub location: String,

    /// Provider-defined storage class (e.g. STANDARD, NEARLINE)
    pub storage_class: String,
}

impl BucketRecord {
    /// Create a record for a bucket that has not been timestamped yet
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        storage_class: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            created: None,
            location: location.into(),
            storage_class: storage_class.into(),
        }
    }
}

/// Metadata for an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Object name, unique within its bucket
    pub name: String,

    /// Size in bytes; absent until the first write completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    /// Last update timestamp
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<OffsetDateTime>,

    /// Content type of the stored data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Base64 MD5 integrity checksum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5_hash: Option<String>,

    /// Provider-assigned version id, strictly increasing per object name.
    /// Populated only by version listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
}

impl ObjectRecord {
    /// Create a record with only the name populated
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            updated: None,
            content_type: None,
            md5_hash: None,
            generation: None,
        }
    }

    /// Attach a provider-assigned generation to this record
    pub fn with_generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }
}
