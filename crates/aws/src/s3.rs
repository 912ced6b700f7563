//! S3 backend
//!
//! Implements the [`ObjectStore`] trait from sk-core on top of aws-sdk-s3.
//! A client scoped to the locator's region is built for every call.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use sk_core::{
    AwsSettings, LIST_DELIMITER, ObjectInfo, ObjectListing, ObjectLocator, ObjectStore,
    RemoteError,
};

use crate::error::{remote_error, s3_kind};
use crate::sdk::load_sdk_config;

/// S3 object store
#[derive(Debug, Clone, Default)]
pub struct S3Backend {
    settings: AwsSettings,
}

impl S3Backend {
    pub fn new(settings: AwsSettings) -> Self {
        Self { settings }
    }

    /// Build a client for one call against `region`
    async fn client(&self, region: &str) -> aws_sdk_s3::Client {
        tracing::debug!(region, "building S3 client");
        let shared = load_sdk_config(&self.settings, Some(region)).await;

        // Path-style addressing keeps LocalStack and S3-compatible servers happy
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(self.settings.force_path_style)
            .build();

        aws_sdk_s3::Client::from_conf(config)
    }
}

#[async_trait]
impl ObjectStore for S3Backend {
    async fn get_object(&self, locator: &ObjectLocator) -> Result<Vec<u8>, RemoteError> {
        let response = self
            .client(&locator.region)
            .await
            .get_object()
            .bucket(&locator.bucket)
            .key(&locator.key)
            .send()
            .await
            .map_err(|e| remote_error("GetObject", e, s3_kind))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| RemoteError::other("GetObject", format!("reading body: {e}")))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn put_object_from_file(
        &self,
        locator: &ObjectLocator,
        path: &Path,
        content_type: Option<String>,
    ) -> Result<(), RemoteError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| RemoteError::other("PutObject", format!("{}: {e}", path.display())))?;

        self.client(&locator.region)
            .await
            .put_object()
            .bucket(&locator.bucket)
            .key(&locator.key)
            .set_content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| remote_error("PutObject", e, s3_kind))?;

        Ok(())
    }

    async fn copy_object(
        &self,
        source: &ObjectLocator,
        destination: &ObjectLocator,
    ) -> Result<(), RemoteError> {
        self.client(&destination.region)
            .await
            .copy_object()
            .copy_source(source.copy_source())
            .bucket(&destination.bucket)
            .key(&destination.key)
            .send()
            .await
            .map_err(|e| remote_error("CopyObject", e, s3_kind))?;

        Ok(())
    }

    async fn delete_object(&self, locator: &ObjectLocator) -> Result<(), RemoteError> {
        self.client(&locator.region)
            .await
            .delete_object()
            .bucket(&locator.bucket)
            .key(&locator.key)
            .send()
            .await
            .map_err(|e| remote_error("DeleteObject", e, s3_kind))?;

        Ok(())
    }

    async fn list_objects(&self, prefix: &ObjectLocator) -> Result<ObjectListing, RemoteError> {
        let mut request = self
            .client(&prefix.region)
            .await
            .list_objects_v2()
            .bucket(&prefix.bucket)
            .delimiter(LIST_DELIMITER);

        if !prefix.key.is_empty() {
            request = request.prefix(&prefix.key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| remote_error("ListObjectsV2", e, s3_kind))?;

        let prefixes = response
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(str::to_string))
            .collect();

        let objects = response
            .contents()
            .iter()
            .map(|object| {
                let mut info =
                    ObjectInfo::new(object.key().unwrap_or_default(), object.size().unwrap_or(0));

                if let Some(modified) = object.last_modified() {
                    info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
                }

                if let Some(etag) = object.e_tag() {
                    info.etag = Some(etag.trim_matches('"').to_string());
                }

                if let Some(sc) = object.storage_class() {
                    info.storage_class = Some(sc.as_str().to_string());
                }

                info
            })
            .collect();

        Ok(ObjectListing {
            objects,
            prefixes,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }
}
