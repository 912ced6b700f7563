//! Object storage client
//!
//! [`ObjectStoreClient`] wraps an [`ObjectStore`] with a never-fail contract:
//! every remote or local I/O failure is caught at the operation boundary,
//! logged once at ERROR level, and turned into an empty or absent result.
//! Each operation also has a `try_` form that returns the [`RemoteError`]
//! instead, for callers that branch on the failure kind.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{error, info};

use crate::deadline;
use crate::error::{RemoteError, RemoteErrorKind};
use crate::locator::ObjectLocator;
use crate::traits::{ObjectListing, ObjectStore};

/// Result of [`ObjectStoreClient::copy_and_delete`]
///
/// The move is two remote calls and is not atomic. An object is never lost,
/// but it can end up in both places.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum TransferOutcome {
    /// Copied, and the source was deleted
    Moved,
    /// The copy failed; the source was left alone and no delete was attempted
    CopyFailed(RemoteError),
    /// The copy succeeded but deleting the source failed: the object now
    /// exists at both locations
    Duplicated(RemoteError),
}

impl TransferOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, TransferOutcome::Moved)
    }

    /// Whether the destination holds a copy
    pub fn destination_written(&self) -> bool {
        !matches!(self, TransferOutcome::CopyFailed(_))
    }
}

/// Read, write, move, delete and list objects without ever returning an error
#[derive(Debug)]
pub struct ObjectStoreClient<S> {
    store: S,
    timeout: Option<Duration>,
}

impl<S: ObjectStore> ObjectStoreClient<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Bound every remote call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The underlying object store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Download an object into `local_path`, overwriting any existing file
    ///
    /// Returns the path on success. A partially written file is left in
    /// place on failure.
    pub async fn read_to_file(
        &self,
        locator: &ObjectLocator,
        local_path: impl AsRef<Path>,
    ) -> Option<PathBuf> {
        self.try_read_to_file(locator, local_path)
            .await
            .inspect_err(|err| failed("read_to_file", locator, err))
            .ok()
    }

    /// Download an object into `local_path`, reporting the failure if there is one
    pub async fn try_read_to_file(
        &self,
        locator: &ObjectLocator,
        local_path: impl AsRef<Path>,
    ) -> Result<PathBuf, RemoteError> {
        let local_path = local_path.as_ref();
        started("read_to_file", locator);

        let body = self.get(locator).await?;
        tokio::fs::write(local_path, &body)
            .await
            .map_err(|e| local_io_error(local_path, e))?;

        info!(operation = "read_to_file", bucket = %locator.bucket, key = %locator.key,
            path = %local_path.display(), bytes = body.len(), "Completed");
        Ok(local_path.to_path_buf())
    }

    /// Download an object into memory, positioned at the start
    ///
    /// Returns an empty buffer on failure. Use [`Self::try_read_to_buffer`]
    /// to tell an empty object apart from a failed fetch.
    pub async fn read_to_buffer(&self, locator: &ObjectLocator) -> Cursor<Vec<u8>> {
        match self.try_read_to_buffer(locator).await {
            Ok(buffer) => buffer,
            Err(err) => {
                failed("read_to_buffer", locator, &err);
                Cursor::new(Vec::new())
            }
        }
    }

    /// Download an object into memory, reporting the failure if there is one
    pub async fn try_read_to_buffer(
        &self,
        locator: &ObjectLocator,
    ) -> Result<Cursor<Vec<u8>>, RemoteError> {
        started("read_to_buffer", locator);
        let body = self.get(locator).await?;
        completed("read_to_buffer", locator);
        Ok(Cursor::new(body))
    }

    /// Upload a local file to `destination`, replacing any existing object
    ///
    /// The content type is guessed from the file extension.
    pub async fn write(&self, destination: &ObjectLocator, local_file: impl AsRef<Path>) -> bool {
        self.try_write(destination, local_file)
            .await
            .inspect_err(|err| failed("write", destination, err))
            .is_ok()
    }

    /// Upload a local file, reporting the failure if there is one
    pub async fn try_write(
        &self,
        destination: &ObjectLocator,
        local_file: impl AsRef<Path>,
    ) -> Result<(), RemoteError> {
        let local_file = local_file.as_ref();
        started("write", destination);

        let metadata = tokio::fs::metadata(local_file)
            .await
            .map_err(|e| local_io_error(local_file, e))?;
        if !metadata.is_file() {
            return Err(RemoteError::new(
                RemoteErrorKind::InvalidParameters,
                "PutObject",
                format!("{} is not a regular file", local_file.display()),
            ));
        }

        let content_type = mime_guess::from_path(local_file)
            .first()
            .map(|mime| mime.essence_str().to_string());
        deadline::within(
            self.timeout,
            "PutObject",
            self.store
                .put_object_from_file(destination, local_file, content_type),
        )
        .await?;

        completed("write", destination);
        Ok(())
    }

    /// Move an object: copy to `destination`, then delete `source`
    ///
    /// The delete is only attempted after a successful copy. Both locators
    /// must be in the same region.
    pub async fn copy_and_delete(
        &self,
        source: &ObjectLocator,
        destination: &ObjectLocator,
    ) -> TransferOutcome {
        started("copy_and_delete", source);

        if source.region != destination.region {
            let err = RemoteError::new(
                RemoteErrorKind::InvalidParameters,
                "CopyObject",
                format!(
                    "source region {} differs from destination region {}",
                    source.region, destination.region
                ),
            );
            failed("copy_and_delete", source, &err);
            return TransferOutcome::CopyFailed(err);
        }

        let copied = deadline::within(
            self.timeout,
            "CopyObject",
            self.store.copy_object(source, destination),
        )
        .await;
        if let Err(err) = copied {
            failed("copy_and_delete", source, &err);
            return TransferOutcome::CopyFailed(err);
        }

        let deleted = deadline::within(
            self.timeout,
            "DeleteObject",
            self.store.delete_object(source),
        )
        .await;
        match deleted {
            Ok(()) => {
                info!(operation = "copy_and_delete", bucket = %source.bucket, key = %source.key,
                    destination_bucket = %destination.bucket, destination_key = %destination.key,
                    "Completed");
                TransferOutcome::Moved
            }
            Err(err) => {
                error!(operation = "copy_and_delete", bucket = %source.bucket, key = %source.key,
                    destination_bucket = %destination.bucket, destination_key = %destination.key,
                    kind = err.kind.as_str(), error = %err.message,
                    "Copied but failed to delete the source; object exists at both locations");
                TransferOutcome::Duplicated(err)
            }
        }
    }

    /// Delete an object; deleting a missing key counts as success
    pub async fn delete(&self, locator: &ObjectLocator) -> bool {
        self.try_delete(locator)
            .await
            .inspect_err(|err| failed("delete", locator, err))
            .is_ok()
    }

    /// Delete an object, reporting the failure if there is one
    pub async fn try_delete(&self, locator: &ObjectLocator) -> Result<(), RemoteError> {
        started("delete", locator);
        deadline::within(
            self.timeout,
            "DeleteObject",
            self.store.delete_object(locator),
        )
        .await?;
        completed("delete", locator);
        Ok(())
    }

    /// List the objects one level under `prefix.key`
    pub async fn list(&self, prefix: &ObjectLocator) -> Option<ObjectListing> {
        self.try_list(prefix)
            .await
            .inspect_err(|err| failed("list", prefix, err))
            .ok()
    }

    /// List one level under `prefix.key`, reporting the failure if there is one
    pub async fn try_list(&self, prefix: &ObjectLocator) -> Result<ObjectListing, RemoteError> {
        started("list", prefix);
        let listing = deadline::within(
            self.timeout,
            "ListObjectsV2",
            self.store.list_objects(prefix),
        )
        .await?;

        info!(operation = "list", bucket = %prefix.bucket, prefix = %prefix.key,
            objects = listing.objects.len(), truncated = listing.truncated, "Completed");
        Ok(listing)
    }

    async fn get(&self, locator: &ObjectLocator) -> Result<Vec<u8>, RemoteError> {
        deadline::within(self.timeout, "GetObject", self.store.get_object(locator)).await
    }
}

fn local_io_error(path: &Path, err: std::io::Error) -> RemoteError {
    RemoteError::other("LocalFile", format!("{}: {err}", path.display()))
}

fn started(operation: &'static str, locator: &ObjectLocator) {
    info!(operation, region = %locator.region, bucket = %locator.bucket, key = %locator.key, "Starts");
}

fn completed(operation: &'static str, locator: &ObjectLocator) {
    info!(operation, bucket = %locator.bucket, key = %locator.key, "Completed");
}

fn failed(operation: &'static str, locator: &ObjectLocator, err: &RemoteError) {
    error!(
        operation,
        bucket = %locator.bucket,
        key = %locator.key,
        kind = err.kind.as_str(),
        remote_operation = err.operation,
        error = %err.message,
        "Object store operation failed"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use mockall::predicate::always;
    use tempfile::TempDir;

    use super::*;
    use crate::memory::InMemoryObjectStore;
    use crate::test_support::capture_errors;
    use crate::traits::MockObjectStore;

    fn locator(bucket: &str, key: &str) -> ObjectLocator {
        ObjectLocator::new("eu-west-1", bucket, key).unwrap()
    }

    fn memory_client() -> ObjectStoreClient<InMemoryObjectStore> {
        ObjectStoreClient::new(InMemoryObjectStore::new().with_bucket("data"))
    }

    #[tokio::test]
    async fn test_write_then_read_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("report.csv");
        let target = dir.path().join("copy.csv");
        let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        std::fs::write(&source, &content).unwrap();

        let client = memory_client();
        let loc = locator("data", "reports/report.csv");

        assert!(client.write(&loc, &source).await);
        assert_eq!(
            client.store().content_type("data", "reports/report.csv").as_deref(),
            Some("text/csv")
        );

        let written = client.read_to_file(&loc, &target).await;
        assert_eq!(written.as_deref(), Some(target.as_path()));
        assert_eq!(std::fs::read(&target).unwrap(), content);
    }

    #[tokio::test]
    async fn test_read_to_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, "a much longer previous content").unwrap();

        let client = memory_client();
        client.store().insert("data", "k", "new");

        assert!(client.read_to_file(&locator("data", "k"), &target).await.is_some());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_read_to_file_missing_object_is_none() {
        let dir = TempDir::new().unwrap();
        let client = memory_client();

        let (result, errors) =
            capture_errors(client.read_to_file(&locator("data", "nope"), dir.path().join("x"))).await;
        assert!(result.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not_found"));
    }

    #[tokio::test]
    async fn test_read_to_file_bad_local_path_is_none() {
        let client = memory_client();
        client.store().insert("data", "k", "body");

        let result = client
            .read_to_file(&locator("data", "k"), "/nonexistent-dir/for/sure/out.bin")
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_to_buffer_starts_at_beginning() {
        let client = memory_client();
        client.store().insert("data", "notes.txt", "hello world");

        let mut buffer = client.read_to_buffer(&locator("data", "notes.txt")).await;
        assert_eq!(buffer.position(), 0);

        let mut text = String::new();
        buffer.read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn test_read_to_buffer_missing_object_is_empty() {
        let client = memory_client();

        let (buffer, errors) = capture_errors(client.read_to_buffer(&locator("data", "nope"))).await;
        assert!(buffer.get_ref().is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_try_read_to_buffer_reports_failure() {
        let client = memory_client();

        let err = client
            .try_read_to_buffer(&locator("missing-bucket", "k"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        client.store().insert("data", "empty", Vec::new());
        let buffer = client.try_read_to_buffer(&locator("data", "empty")).await.unwrap();
        assert!(buffer.get_ref().is_empty());
    }

    #[tokio::test]
    async fn test_write_missing_local_file_skips_remote_call() {
        let mut store = MockObjectStore::new();
        store.expect_put_object_from_file().never();
        let client = ObjectStoreClient::new(store);

        let (ok, errors) =
            capture_errors(client.write(&locator("data", "k"), "/definitely/not/here.txt")).await;
        assert!(!ok);
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_write_remote_failure_is_false() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.json");
        std::fs::write(&file, "{}").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_put_object_from_file()
            .times(1)
            .withf(|_, _, content_type| content_type.as_deref() == Some("application/json"))
            .returning(|_, _, _| Err(RemoteError::other("PutObject", "AccessDenied")));
        let client = ObjectStoreClient::new(store);

        assert!(!client.write(&locator("data", "a.json"), &file).await);
    }

    #[tokio::test]
    async fn test_copy_failure_never_deletes() {
        let mut store = MockObjectStore::new();
        store
            .expect_copy_object()
            .times(1)
            .returning(|_, _| Err(RemoteError::other("CopyObject", "SlowDown")));
        store.expect_delete_object().never();
        let client = ObjectStoreClient::new(store);

        let outcome = client
            .copy_and_delete(&locator("in", "a.txt"), &locator("out", "a.txt"))
            .await;
        assert!(matches!(outcome, TransferOutcome::CopyFailed(_)));
        assert!(!outcome.destination_written());
    }

    #[tokio::test]
    async fn test_copy_success_deletes_once() {
        let source = locator("in", "a.txt");
        let expected_source = source.clone();

        let mut store = MockObjectStore::new();
        store.expect_copy_object().times(1).returning(|_, _| Ok(()));
        store
            .expect_delete_object()
            .withf(move |loc| *loc == expected_source)
            .times(1)
            .returning(|_| Ok(()));
        let client = ObjectStoreClient::new(store);

        let outcome = client.copy_and_delete(&source, &locator("out", "a.txt")).await;
        assert!(outcome.is_moved());
    }

    #[tokio::test]
    async fn test_delete_failure_after_copy_is_duplicated() {
        let mut store = MockObjectStore::new();
        store.expect_copy_object().times(1).returning(|_, _| Ok(()));
        store
            .expect_delete_object()
            .with(always())
            .times(1)
            .returning(|_| Err(RemoteError::other("DeleteObject", "AccessDenied")));
        let client = ObjectStoreClient::new(store);

        let outcome = client
            .copy_and_delete(&locator("in", "a.txt"), &locator("out", "a.txt"))
            .await;
        assert!(matches!(outcome, TransferOutcome::Duplicated(ref e) if e.message == "AccessDenied"));
        assert!(outcome.destination_written());
    }

    #[tokio::test]
    async fn test_copy_across_regions_is_rejected() {
        let mut store = MockObjectStore::new();
        store.expect_copy_object().never();
        store.expect_delete_object().never();
        let client = ObjectStoreClient::new(store);

        let source = ObjectLocator::new("eu-west-1", "in", "a").unwrap();
        let destination = ObjectLocator::new("us-east-1", "out", "a").unwrap();
        let outcome = client.copy_and_delete(&source, &destination).await;
        assert!(
            matches!(outcome, TransferOutcome::CopyFailed(ref e) if e.kind == RemoteErrorKind::InvalidParameters)
        );
    }

    #[tokio::test]
    async fn test_copy_and_delete_moves_object() {
        let client = ObjectStoreClient::new(
            InMemoryObjectStore::new().with_bucket("in").with_bucket("archive"),
        );
        client.store().insert("in", "batch/001.dat", "payload");

        let outcome = client
            .copy_and_delete(&locator("in", "batch/001.dat"), &locator("archive", "001.dat"))
            .await;

        assert!(outcome.is_moved());
        assert!(!client.store().contains("in", "batch/001.dat"));
        assert!(client.store().contains("archive", "001.dat"));
    }

    #[tokio::test]
    async fn test_copy_missing_source_preserves_state() {
        let client = ObjectStoreClient::new(
            InMemoryObjectStore::new().with_bucket("in").with_bucket("archive"),
        );

        let outcome = client
            .copy_and_delete(&locator("in", "ghost"), &locator("archive", "ghost"))
            .await;
        assert!(matches!(outcome, TransferOutcome::CopyFailed(ref e) if e.is_not_found()));
        assert!(!client.store().contains("archive", "ghost"));
    }

    #[tokio::test]
    async fn test_delete_twice_is_ok() {
        let client = memory_client();
        client.store().insert("data", "old.log", "x");
        let loc = locator("data", "old.log");

        assert!(client.delete(&loc).await);
        let (second, errors) = capture_errors(client.delete(&loc)).await;
        assert!(second);
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_list_single_level_under_prefix() {
        let client = memory_client();
        for key in ["a/1", "a/2", "b/1"] {
            client.store().insert("data", key, key);
        }

        let listing = client.list(&locator("data", "a/")).await.unwrap();
        assert_eq!(listing.keys(), vec!["a/1", "a/2"]);
        assert!(listing.prefixes.is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_none() {
        let client = memory_client();
        let (listing, errors) = capture_errors(client.list(&locator("nope", "a/"))).await;
        assert!(listing.is_none());
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_swallowed() {
        struct Stalled;

        #[async_trait::async_trait]
        impl ObjectStore for Stalled {
            async fn get_object(&self, _: &ObjectLocator) -> Result<Vec<u8>, RemoteError> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(b"late".to_vec())
            }
            async fn put_object_from_file(
                &self,
                _: &ObjectLocator,
                _: &Path,
                _: Option<String>,
            ) -> Result<(), RemoteError> {
                Ok(())
            }
            async fn copy_object(&self, _: &ObjectLocator, _: &ObjectLocator) -> Result<(), RemoteError> {
                Ok(())
            }
            async fn delete_object(&self, _: &ObjectLocator) -> Result<(), RemoteError> {
                Ok(())
            }
            async fn list_objects(&self, _: &ObjectLocator) -> Result<ObjectListing, RemoteError> {
                Ok(ObjectListing::default())
            }
        }

        let client = ObjectStoreClient::new(Stalled).with_timeout(Duration::from_millis(20));
        let buffer = client.read_to_buffer(&locator("data", "k")).await;
        assert!(buffer.get_ref().is_empty());
    }

    #[tokio::test]
    async fn test_try_variants_report_kind_without_logging() {
        let client = memory_client();
        let dir = TempDir::new().unwrap();

        let (err, errors) = capture_errors(
            client.try_read_to_file(&locator("data", "missing"), dir.path().join("out.bin")),
        )
        .await;
        assert_eq!(err.unwrap_err().kind, RemoteErrorKind::NotFound);
        assert!(errors.is_empty());

        let err = client.try_delete(&locator("nope", "k")).await.unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::NotFound);

        let err = client.try_list(&locator("nope", "a/")).await.unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_try_write_directory_is_invalid_parameters() {
        let mut store = MockObjectStore::new();
        store.expect_put_object_from_file().never();
        let client = ObjectStoreClient::new(store);
        let dir = TempDir::new().unwrap();

        let err = client
            .try_write(&locator("data", "k"), dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::InvalidParameters);
    }
}
