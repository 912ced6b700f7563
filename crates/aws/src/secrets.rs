//! Secrets Manager backend

use async_trait::async_trait;
use sk_core::{AwsSettings, RemoteError, SecretStore};

use crate::error::{remote_error, secrets_manager_kind};
use crate::sdk::load_sdk_config;

/// AWS Secrets Manager secret store
///
/// Region and credentials come from the ambient AWS environment unless
/// pinned with [`SecretsManagerBackend::with_region`].
#[derive(Debug, Clone, Default)]
pub struct SecretsManagerBackend {
    settings: AwsSettings,
    region: Option<String>,
}

impl SecretsManagerBackend {
    pub fn new(settings: AwsSettings) -> Self {
        Self {
            settings,
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    async fn client(&self) -> aws_sdk_secretsmanager::Client {
        tracing::debug!(region = ?self.region, "building Secrets Manager client");
        let shared = load_sdk_config(&self.settings, self.region.as_deref()).await;
        aws_sdk_secretsmanager::Client::new(&shared)
    }
}

#[async_trait]
impl SecretStore for SecretsManagerBackend {
    async fn get_secret_string(&self, identifier: &str) -> Result<String, RemoteError> {
        let response = self
            .client()
            .await
            .get_secret_value()
            .secret_id(identifier)
            .send()
            .await
            .map_err(|e| remote_error("GetSecretValue", e, secrets_manager_kind))?;

        response.secret_string().map(str::to_string).ok_or_else(|| {
            RemoteError::other(
                "GetSecretValue",
                format!("secret {identifier} holds binary data only"),
            )
        })
    }
}
