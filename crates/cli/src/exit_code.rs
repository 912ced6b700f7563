//! Exit code definitions for the sk CLI
//!
//! Scripts branch on these values; changing one is a breaking change.

use sk_core::{Error, RemoteErrorKind};

/// Exit codes for the sk CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error, including rejected secret payloads
    GeneralError = 1,

    /// User input error: invalid arguments, malformed locator, bad config
    UsageError = 2,

    /// Unclassified remote failure: network, timeout, access denied, etc.
    NetworkError = 3,

    /// The service rejected the request or its parameters
    Rejected = 4,

    /// Resource not found: secret, bucket or object does not exist
    NotFound = 5,

    /// A move copied the object but could not delete the source
    Duplicated = 6,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::Rejected),
            5 => Some(Self::NotFound),
            6 => Some(Self::Duplicated),
            130 => Some(Self::Interrupted),
            _ => None,
        }
    }

    /// Exit code for a classified remote failure
    pub const fn from_remote(kind: RemoteErrorKind) -> Self {
        match kind {
            RemoteErrorKind::NotFound => Self::NotFound,
            RemoteErrorKind::InvalidRequest | RemoteErrorKind::InvalidParameters => Self::Rejected,
            RemoteErrorKind::Other => Self::NetworkError,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments, locator or configuration",
            Self::NetworkError => "Remote call failed",
            Self::Rejected => "Request rejected by the service",
            Self::NotFound => "Resource not found",
            Self::Duplicated => "Object copied but source not deleted",
            Self::Interrupted => "Operation interrupted",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
