//! In-memory secret and object stores
//!
//! Both follow the observable behaviour of the managed services closely
//! enough to exercise the clients without a network: missing secrets and
//! keys are `NotFound`, deletes are idempotent, and listings are
//! lexicographic and bounded by [`LIST_DELIMITER`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{RemoteError, RemoteErrorKind};
use crate::locator::ObjectLocator;
use crate::traits::{LIST_DELIMITER, ObjectInfo, ObjectListing, ObjectStore, SecretStore};

/// Secret store backed by a map of identifier to secret string
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, String>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a secret
    pub fn with_secret(mut self, identifier: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(identifier.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret_string(&self, identifier: &str) -> Result<String, RemoteError> {
        if identifier.is_empty() {
            return Err(RemoteError::new(
                RemoteErrorKind::InvalidParameters,
                "GetSecretValue",
                "secret identifier must not be empty",
            ));
        }

        self.secrets.get(identifier).cloned().ok_or_else(|| {
            RemoteError::not_found(
                "GetSecretValue",
                format!("Secrets Manager can't find the specified secret: {identifier}"),
            )
        })
    }
}

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    content_type: Option<String>,
    last_modified: jiff::Timestamp,
}

type Buckets = BTreeMap<String, BTreeMap<String, StoredObject>>;

/// Object store holding buckets and objects in process memory
///
/// Regions are accepted but not modelled: a bucket name is global.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    buckets: Mutex<Buckets>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bucket
    pub fn with_bucket(self, bucket: impl Into<String>) -> Self {
        self.lock().entry(bucket.into()).or_default();
        self
    }

    /// Store an object directly, creating the bucket if needed
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.lock().entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                body: body.into(),
                content_type: None,
                last_modified: jiff::Timestamp::now(),
            },
        );
    }

    /// Whether an object exists at `bucket/key`
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.lock()
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key))
    }

    /// Content type recorded for an object, if any
    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.lock()
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .and_then(|object| object.content_type.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Buckets> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn no_such_bucket(operation: &'static str, bucket: &str) -> RemoteError {
    RemoteError::not_found(
        operation,
        format!("NoSuchBucket: The specified bucket does not exist: {bucket}"),
    )
}

fn no_such_key(operation: &'static str, locator: &ObjectLocator) -> RemoteError {
    RemoteError::not_found(
        operation,
        format!("NoSuchKey: The specified key does not exist: {}", locator.key),
    )
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(&self, locator: &ObjectLocator) -> Result<Vec<u8>, RemoteError> {
        let buckets = self.lock();
        let objects = buckets
            .get(&locator.bucket)
            .ok_or_else(|| no_such_bucket("GetObject", &locator.bucket))?;
        objects
            .get(&locator.key)
            .map(|object| object.body.clone())
            .ok_or_else(|| no_such_key("GetObject", locator))
    }

    async fn put_object_from_file(
        &self,
        locator: &ObjectLocator,
        path: &Path,
        content_type: Option<String>,
    ) -> Result<(), RemoteError> {
        let body = tokio::fs::read(path).await.map_err(|e| {
            RemoteError::other("PutObject", format!("{}: {e}", path.display()))
        })?;

        let mut buckets = self.lock();
        let objects = buckets
            .get_mut(&locator.bucket)
            .ok_or_else(|| no_such_bucket("PutObject", &locator.bucket))?;
        objects.insert(
            locator.key.clone(),
            StoredObject {
                body,
                content_type,
                last_modified: jiff::Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn copy_object(
        &self,
        source: &ObjectLocator,
        destination: &ObjectLocator,
    ) -> Result<(), RemoteError> {
        let mut buckets = self.lock();
        let object = buckets
            .get(&source.bucket)
            .ok_or_else(|| no_such_bucket("CopyObject", &source.bucket))?
            .get(&source.key)
            .cloned()
            .ok_or_else(|| no_such_key("CopyObject", source))?;

        let objects = buckets
            .get_mut(&destination.bucket)
            .ok_or_else(|| no_such_bucket("CopyObject", &destination.bucket))?;
        objects.insert(
            destination.key.clone(),
            StoredObject {
                last_modified: jiff::Timestamp::now(),
                ..object
            },
        );
        Ok(())
    }

    async fn delete_object(&self, locator: &ObjectLocator) -> Result<(), RemoteError> {
        let mut buckets = self.lock();
        let objects = buckets
            .get_mut(&locator.bucket)
            .ok_or_else(|| no_such_bucket("DeleteObject", &locator.bucket))?;
        objects.remove(&locator.key);
        Ok(())
    }

    async fn list_objects(&self, prefix: &ObjectLocator) -> Result<ObjectListing, RemoteError> {
        let buckets = self.lock();
        let objects = buckets
            .get(&prefix.bucket)
            .ok_or_else(|| no_such_bucket("ListObjectsV2", &prefix.bucket))?;

        let mut listing = ObjectListing::default();
        for (key, object) in objects.range(prefix.key.clone()..) {
            let Some(rest) = key.strip_prefix(&prefix.key) else {
                break;
            };

            match rest.find(LIST_DELIMITER) {
                Some(pos) => {
                    let common = format!("{}{}", prefix.key, &rest[..pos + LIST_DELIMITER.len()]);
                    if listing.prefixes.last() != Some(&common) {
                        listing.prefixes.push(common);
                    }
                }
                None => {
                    let mut info = ObjectInfo::new(key, object.body.len() as i64);
                    info.last_modified = Some(object.last_modified);
                    listing.objects.push(info);
                }
            }
        }

        Ok(listing)
    }
}
