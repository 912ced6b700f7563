//! sk-aws: AWS SDK adapters for stowkit
//!
//! This crate provides implementations of the `SecretStore` and
//! `ObjectStore` traits from sk-core using aws-sdk-secretsmanager and
//! aws-sdk-s3. It is the only crate that directly depends on the AWS SDK.

mod error;
pub mod s3;
pub mod sdk;
pub mod secrets;

pub use s3::S3Backend;
pub use sdk::load_sdk_config;
pub use secrets::SecretsManagerBackend;
