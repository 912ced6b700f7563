//! Mapping of SDK failures onto [`RemoteError`]

use aws_sdk_s3::error::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use sk_core::{RemoteError, RemoteErrorKind};

/// Classify an SDK error by its service error code
///
/// Transport, timeout and response-parsing failures carry no code and are
/// reported as [`RemoteErrorKind::Other`].
pub(crate) fn remote_error<E, R>(
    operation: &'static str,
    err: SdkError<E, R>,
    classify: fn(&str) -> RemoteErrorKind,
) -> RemoteError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let kind = match &err {
        SdkError::ServiceError(context) => context
            .err()
            .code()
            .map_or(RemoteErrorKind::Other, classify),
        _ => RemoteErrorKind::Other,
    };
    RemoteError::new(kind, operation, DisplayErrorContext(&err).to_string())
}

/// S3 error codes
pub(crate) fn s3_kind(code: &str) -> RemoteErrorKind {
    match code {
        "NoSuchKey" | "NoSuchBucket" | "NotFound" => RemoteErrorKind::NotFound,
        "InvalidRequest" => RemoteErrorKind::InvalidRequest,
        "InvalidArgument" | "InvalidBucketName" | "KeyTooLongError" => {
            RemoteErrorKind::InvalidParameters
        }
        _ => RemoteErrorKind::Other,
    }
}

/// Secrets Manager error codes
pub(crate) fn secrets_manager_kind(code: &str) -> RemoteErrorKind {
    match code {
        "ResourceNotFoundException" => RemoteErrorKind::NotFound,
        "InvalidRequestException" => RemoteErrorKind::InvalidRequest,
        "InvalidParameterException" => RemoteErrorKind::InvalidParameters,
        _ => RemoteErrorKind::Other,
    }
}
