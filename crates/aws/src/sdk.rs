//! Shared SDK configuration
//!
//! Builds an [`SdkConfig`] from the ambient AWS environment, layered with
//! whatever the stowkit configuration overrides.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use sk_core::AwsSettings;

/// Provider name reported for credentials taken from the config file
const STATIC_PROVIDER: &str = "sk-static-credentials";

/// Load an SDK config, optionally pinned to `region`
///
/// Without a region the SDK resolves one from `AWS_REGION`, the profile, or
/// instance metadata.
pub async fn load_sdk_config(settings: &AwsSettings, region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    if let Some(profile) = &settings.profile {
        loader = loader.profile_name(profile);
    }

    if let Some((access_key, secret_key)) = settings.static_credentials() {
        let credentials = Credentials::new(access_key, secret_key, None, None, STATIC_PROVIDER);
        loader = loader.credentials_provider(credentials);
    }

    if let Some(endpoint) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
