use crate::app::config::DataSourceSettings;
use anyhow::Result;
use aws_config::sts::AssumeRoleProvider;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_types::region::Region;
use std::sync::Arc;
use tracing::debug;

const SESSION_NAME: &str = "cwsuggest";

/// Builds region-scoped SDK configs from the data-source settings
#[derive(Debug, Clone)]
pub struct AwsSession {
    settings: Arc<DataSourceSettings>,
}

impl AwsSession {
    pub fn new(settings: Arc<DataSourceSettings>) -> Self {
        Self { settings }
    }

    /// Create AWS SDK config for a region
    ///
    /// Applies the configured profile and endpoint override, then wraps the resolved
    /// credentials in an STS assume-role provider when a role ARN is set.
    pub async fn create_aws_config_for_region(&self, region: &str) -> Result<aws_config::SdkConfig> {
        debug!("Creating AWS config for region: {}", region);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()));

        if let Some(profile) = &self.settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &self.settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let base = loader.load().await;

        let Some(role_arn) = &self.settings.assume_role_arn else {
            return Ok(base);
        };

        debug!("Assuming role {} for region {}", role_arn, region);
        let mut role = AssumeRoleProvider::builder(role_arn.as_str())
            .session_name(SESSION_NAME)
            .region(Region::new(region.to_string()));
        if let Some(external_id) = &self.settings.external_id {
            role = role.external_id(external_id.as_str());
        }
        let provider = role.configure(&base).build().await;

        Ok(base
            .into_builder()
            .credentials_provider(SharedCredentialsProvider::new(provider))
            .build())
    }
}
