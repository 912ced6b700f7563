//! Optional per-call timeout around a remote call

use std::future::Future;
use std::time::Duration;

use crate::error::RemoteError;

/// Await `call`, giving up after `timeout` if one is set
///
/// An elapsed timeout is reported like any other unclassified remote failure.
pub(crate) async fn within<T, F>(
    timeout: Option<Duration>,
    operation: &'static str,
    call: F,
) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    match timeout {
        None => call.await,
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::other(
                operation,
                format!("timed out after {}ms", limit.as_millis()),
            )),
        },
    }
}
