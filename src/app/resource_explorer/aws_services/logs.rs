use super::super::session::AwsSession;
use super::{sdk_failure, LogGroupInventory, LogGroupQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs as logs;

pub struct LogsService {
    session: AwsSession,
}

impl LogsService {
    pub fn new(session: AwsSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl LogGroupInventory for LogsService {
    /// Describe log groups with optional filtering
    async fn describe_log_groups(&self, region: &str, query: LogGroupQuery) -> Result<Vec<String>> {
        let aws_config = self
            .session
            .create_aws_config_for_region(region)
            .await
            .with_context(|| format!("Failed to create AWS config for region {}", region))?;

        let client = logs::Client::new(&aws_config);
        let mut request = client.describe_log_groups();

        if let Some(prefix) = query.prefix {
            request = request.log_group_name_prefix(prefix);
        }

        let names = |groups: Option<Vec<logs::types::LogGroup>>| {
            groups
                .unwrap_or_default()
                .into_iter()
                .filter_map(|group| group.log_group_name)
        };

        if let Some(limit) = query.limit {
            let page = request
                .limit(limit)
                .send()
                .await
                .map_err(sdk_failure)
                .context("DescribeLogGroups failed")?;
            return Ok(names(page.log_groups).collect());
        }

        let mut paginator = request.into_paginator().send();
        let mut log_groups = Vec::new();

        while let Some(page) = paginator.next().await {
            let page = page
                .map_err(sdk_failure)
                .context("DescribeLogGroups page failed")?;
            log_groups.extend(names(page.log_groups));
        }

        Ok(log_groups)
    }
}
