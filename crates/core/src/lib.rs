//! sk-core: Core library for stowkit
//!
//! This crate provides the SDK-independent half of stowkit:
//! - `SecretResolver`: fetch a named secret and validate it into a flat map
//! - `ObjectStoreClient`: read, write, move, delete and list objects
//! - `SecretStore` / `ObjectStore` traits for the remote calls
//! - In-memory stores and configuration management
//!
//! Provider SDKs live in separate crates that implement the traits, which
//! keeps this crate easy to test.

pub mod config;
mod deadline;
pub mod error;
pub mod locator;
pub mod memory;
pub mod resolver;
pub mod secret;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use config::{AwsSettings, ClientSettings, Config, ConfigManager};
pub use error::{Error, RemoteError, RemoteErrorKind, Result, SecretFormatError};
pub use locator::ObjectLocator;
pub use memory::{InMemoryObjectStore, InMemorySecretStore};
pub use resolver::SecretResolver;
pub use secret::{SecretMap, parse_and_validate};
pub use storage::{ObjectStoreClient, TransferOutcome};
pub use traits::{LIST_DELIMITER, ObjectInfo, ObjectListing, ObjectStore, SecretStore};
