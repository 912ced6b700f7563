//! Secret resolution
//!
//! [`SecretResolver`] fetches a secret through a [`SecretStore`] and turns it
//! into a validated [`SecretMap`]. Fetch failures are logged and reported as
//! an absent payload; validation failures are returned to the caller, since
//! proceeding with an incomplete map is unsafe.

use std::time::Duration;

use tracing::{error, info};

use crate::deadline;
use crate::error::{RemoteError, RemoteErrorKind, Result};
use crate::secret::{self, SecretMap};
use crate::traits::SecretStore;

/// Resolves named secrets into validated key/value maps
#[derive(Debug)]
pub struct SecretResolver<S> {
    store: S,
    timeout: Option<Duration>,
}

impl<S: SecretStore> SecretResolver<S> {
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

    /// The underlying secret store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the raw secret string, reporting the classified failure
    pub async fn try_fetch_secret(&self, identifier: &str) -> std::result::Result<String, RemoteError> {
        info!(secret = identifier, "Getting the secret from the secret store");
        deadline::within(
            self.timeout,
            "GetSecretValue",
            self.store.get_secret_string(identifier),
        )
        .await
    }

    /// Fetch the raw secret string
    ///
    /// Returns `None` on any failure after logging it once at ERROR level.
    pub async fn fetch_secret(&self, identifier: &str) -> Option<String> {
        match self.try_fetch_secret(identifier).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                log_fetch_failure(identifier, &err);
                None
            }
        }
    }

    /// Parse and validate a payload; see [`secret::parse_and_validate`]
    pub fn parse_and_validate(&self, payload: &str) -> Result<SecretMap> {
        secret::parse_and_validate(payload)
    }

    /// Fetch and validate in one step
    ///
    /// `Ok(None)` means the fetch failed (and was logged); `Err` means the
    /// secret was found but its payload was rejected.
    pub async fn resolve(&self, identifier: &str) -> Result<Option<SecretMap>> {
        let Some(payload) = self.fetch_secret(identifier).await else {
            return Ok(None);
        };

        let secrets = self.parse_and_validate(&payload).inspect_err(|err| {
            error!(secret = identifier, error = %err, "Secret payload rejected");
        })?;

        info!(secret = identifier, keys = secrets.len(), "Resolved secret");
        Ok(Some(secrets))
    }
}

fn log_fetch_failure(identifier: &str, err: &RemoteError) {
    let kind = err.kind.as_str();
    match err.kind {
        RemoteErrorKind::NotFound => {
            error!(secret = identifier, kind, error = %err.message, "The requested secret was not found");
        }
        RemoteErrorKind::InvalidRequest => {
            error!(secret = identifier, kind, error = %err.message, "The request was invalid");
        }
        RemoteErrorKind::InvalidParameters => {
            error!(secret = identifier, kind, error = %err.message, "The request had invalid params");
        }
        RemoteErrorKind::Other => {
            error!(secret = identifier, kind, error = %err.message, "Failed to get the secret");
        }
    }
}
