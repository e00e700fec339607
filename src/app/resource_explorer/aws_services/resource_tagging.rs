use super::super::session::AwsSession;
use super::{sdk_failure, Tag, TaggedResource, TaggedResourceInventory, TaggedResourceQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_resourcegroupstagging as tagging;

pub struct ResourceTaggingService {
    session: AwsSession,
}

impl ResourceTaggingService {
    pub fn new(session: AwsSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl TaggedResourceInventory for ResourceTaggingService {
    /// Get resources matching the type and tag filters, with their tags
    ///
    /// # Arguments
    ///
    /// * `region` - The AWS region
    /// * `query` - Resource type filters like "ec2:instance" and tag key filters. A tag
    ///   filter with no values matches any resource carrying the key.
    async fn get_tagged_resources(
        &self,
        region: &str,
        query: TaggedResourceQuery,
    ) -> Result<Vec<TaggedResource>> {
        let aws_config = self
            .session
            .create_aws_config_for_region(region)
            .await
            .with_context(|| format!("Failed to create AWS config for region {}", region))?;

        let client = tagging::Client::new(&aws_config);
        let mut resources = Vec::new();

        let mut request = client.get_resources();

        for resource_type in query.resource_types {
            request = request.resource_type_filters(resource_type);
        }

        for filter in query.tag_filters {
            let tag_filter = tagging::types::TagFilter::builder()
                .key(filter.key)
                .set_values((!filter.values.is_empty()).then_some(filter.values))
                .build();
            request = request.tag_filters(tag_filter);
        }

        let mut paginator = request.into_paginator().send();

        while let Some(page) = paginator.next().await {
            let page = page
                .map_err(sdk_failure)
                .context("GetResources page failed")?;

            if let Some(resource_tag_mapping_list) = page.resource_tag_mapping_list {
                for mapping in resource_tag_mapping_list {
                    let Some(arn) = mapping.resource_arn else {
                        continue;
                    };
                    let tags = mapping
                        .tags
                        .unwrap_or_default()
                        .into_iter()
                        .map(|tag| Tag::new(tag.key, tag.value))
                        .collect();

                    resources.push(TaggedResource { arn, tags });
                }
            }
        }

        tracing::debug!(
            "Fetched {} tagged resources from Resource Groups API in {}",
            resources.len(),
            region
        );

        Ok(resources)
    }
}
