//! Remote-call traits
//!
//! [`SecretStore`] and [`ObjectStore`] are the seams between the never-throw
//! clients in this crate and a concrete provider SDK. Every method performs a
//! single remote call and reports failures as a tagged [`RemoteError`].

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::locator::ObjectLocator;

/// Metadata for a listed object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object of the given size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
            storage_class: None,
        }
    }
}

/// One page of a single-level, delimiter-bounded listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectListing {
    /// Objects directly under the prefix, in the order the store returned them
    pub objects: Vec<ObjectInfo>,

    /// Deeper levels collapsed at the delimiter (e.g. `a/b/`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,

    /// Whether the store had more entries than it returned
    pub truncated: bool,
}

impl ObjectListing {
    /// Keys of the listed objects
    pub fn keys(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.key.as_str()).collect()
    }
}

/// Delimiter used for single-level listings
pub const LIST_DELIMITER: &str = "/";

/// A remote key/value secret service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the string value of the named secret
    async fn get_secret_string(&self, identifier: &str) -> Result<String, RemoteError>;
}

/// A remote bucket/key object service
///
/// Implementations open whatever connection they need for `locator.region`
/// on each call; nothing is expected to be shared across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the whole object body
    async fn get_object(&self, locator: &ObjectLocator) -> Result<Vec<u8>, RemoteError>;

    /// Upload a local file, replacing any object at `locator`
    async fn put_object_from_file(
        &self,
        locator: &ObjectLocator,
        path: &Path,
        content_type: Option<String>,
    ) -> Result<(), RemoteError>;

    /// Server-side copy; both locators share a region
    async fn copy_object(
        &self,
        source: &ObjectLocator,
        destination: &ObjectLocator,
    ) -> Result<(), RemoteError>;

    /// Delete an object; a missing key is not an error
    async fn delete_object(&self, locator: &ObjectLocator) -> Result<(), RemoteError>;

    /// List one level under `prefix.key`, bounded by [`LIST_DELIMITER`]
    async fn list_objects(&self, prefix: &ObjectLocator) -> Result<ObjectListing, RemoteError>;
}
