//! Object addressing
//!
//! An [`ObjectLocator`] is the `(region, bucket, key)` triple every object
//! operation takes. Region and bucket are never defaulted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed remote location in an object store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocator {
    /// Region the bucket lives in
    pub region: String,
    /// Bucket name
    pub bucket: String,
    /// Object key, or key prefix for listings (may be empty)
    pub key: String,
}

impl ObjectLocator {
    /// Create a new locator, rejecting an empty region or bucket
    pub fn new(
        region: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self> {
        let region = region.into();
        let bucket = bucket.into();

        if region.trim().is_empty() {
            return Err(Error::InvalidLocator("region must not be empty".into()));
        }
        if bucket.trim().is_empty() {
            return Err(Error::InvalidLocator("bucket must not be empty".into()));
        }
        if bucket.contains('/') {
            return Err(Error::InvalidLocator(format!(
                "bucket name '{bucket}' must not contain '/'"
            )));
        }

        Ok(Self {
            region,
            bucket,
            key: key.into(),
        })
    }

    /// Parse `bucket[/key]` within the given region
    ///
    /// A leading `s3://` scheme is accepted and stripped.
    pub fn parse(region: impl Into<String>, path: &str) -> Result<Self> {
        let path = path.strip_prefix("s3://").unwrap_or(path);
        if path.is_empty() {
            return Err(Error::InvalidLocator("Path cannot be empty".into()));
        }

        match path.split_once('/') {
            Some((bucket, key)) => Self::new(region, bucket, key),
            None => Self::new(region, path, ""),
        }
    }

    /// Same region and bucket, different key
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self {
            region: self.region.clone(),
            bucket: self.bucket.clone(),
            key: key.into(),
        }
    }

    /// `bucket/key` form used as the `CopySource` of a copy request
    ///
    /// Each key segment is percent-encoded; the `/` separators are kept.
    pub fn copy_source(&self) -> String {
        let key = self
            .key
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{key}", self.bucket)
    }

    /// Unencoded `bucket/key`, for display and output
    pub fn bucket_key(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }

    /// Whether the key addresses a "directory" level rather than an object
    pub fn is_prefix(&self) -> bool {
        self.key.is_empty() || self.key.ends_with('/')
    }
}

impl std::fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{} ({})", self.bucket, self.key, self.region)
    }
}
