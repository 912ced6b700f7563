//! Error types for sk-core
//!
//! Remote calls report a tagged [`RemoteError`]; everything else goes through
//! the crate-level [`Error`], which maps onto CLI exit codes.

use thiserror::Error;

/// Result type alias for sk-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// The secret, bucket or key does not exist
    NotFound,
    /// The request was rejected as malformed
    InvalidRequest,
    /// One or more request parameters were rejected
    InvalidParameters,
    /// Anything else: transport failures, timeouts, local I/O, unknown service codes
    Other,
}

impl RemoteErrorKind {
    /// Short machine-friendly name, used as a structured log field
    pub const fn as_str(self) -> &'static str {
        match self {
            RemoteErrorKind::NotFound => "not_found",
            RemoteErrorKind::InvalidRequest => "invalid_request",
            RemoteErrorKind::InvalidParameters => "invalid_parameters",
            RemoteErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call against the secret store or the object store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed ({kind}): {message}")]
pub struct RemoteError {
    /// What went wrong
    pub kind: RemoteErrorKind,
    /// Remote operation name, e.g. `GetSecretValue` or `CopyObject`
    pub operation: &'static str,
    /// Detail reported by the provider or the transport
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            message: message.into(),
        }
    }

    pub fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::NotFound, operation, message)
    }

    pub fn other(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Other, operation, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == RemoteErrorKind::NotFound
    }
}

/// Why a secret payload was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecretFormatError {
    /// Payload is not a non-empty, flat JSON object of scalars
    #[error("secret payload is not a flat key/value map: {0}")]
    InvalidSecretFormat(String),

    /// A key maps to `null` or an empty string
    #[error("expected a value for key '{key}' but found empty or null")]
    MissingSecretValue { key: String },
}

/// Error types for sk-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Region, bucket or key is unusable
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Remote call failed
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Secret payload failed validation
    #[error("Exception while getting the secrets: {0}")]
    SecretResolution(#[source] SecretFormatError),

    /// General error
    #[error("{0}")]
    General(String),
}

impl From<SecretFormatError> for Error {
    fn from(err: SecretFormatError) -> Self {
        Error::SecretResolution(err)
    }
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidLocator(_) | Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::Remote(remote) => match remote.kind {
                RemoteErrorKind::NotFound => 5,
                RemoteErrorKind::InvalidRequest | RemoteErrorKind::InvalidParameters => 4,
                RemoteErrorKind::Other => 3,
            },
            _ => 1, // GeneralError
        }
    }
}
