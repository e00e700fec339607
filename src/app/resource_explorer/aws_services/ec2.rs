use super::super::session::AwsSession;
use super::{
    sdk_failure, BlockDevice, Instance, InstanceInventory, InstanceQuery, Reservation, Tag,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_ec2 as ec2;

pub struct EC2Service {
    session: AwsSession,
}

impl EC2Service {
    pub fn new(session: AwsSession) -> Self {
        Self { session }
    }

    async fn client(&self, region: &str) -> Result<ec2::Client> {
        let aws_config = self
            .session
            .create_aws_config_for_region(region)
            .await
            .with_context(|| format!("Failed to create AWS config for region {}", region))?;
        Ok(ec2::Client::new(&aws_config))
    }

    fn instance_from_sdk(instance: ec2::types::Instance) -> Instance {
        let tags = instance
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| Some(Tag::new(tag.key?, tag.value.unwrap_or_default())))
            .collect();

        let block_devices = instance
            .block_device_mappings
            .unwrap_or_default()
            .into_iter()
            .map(|mapping| BlockDevice {
                device_name: mapping.device_name,
                volume_id: mapping.ebs.and_then(|ebs| ebs.volume_id),
            })
            .collect();

        Instance {
            instance_id: instance.instance_id.unwrap_or_default(),
            instance_type: instance.instance_type.map(|t| t.as_str().to_string()),
            image_id: instance.image_id,
            key_name: instance.key_name,
            architecture: instance.architecture.map(|a| a.as_str().to_string()),
            private_ip_address: instance.private_ip_address,
            public_ip_address: instance.public_ip_address,
            private_dns_name: instance.private_dns_name,
            public_dns_name: instance.public_dns_name,
            subnet_id: instance.subnet_id,
            vpc_id: instance.vpc_id,
            state: instance
                .state
                .and_then(|state| state.name)
                .map(|name| name.as_str().to_string()),
            availability_zone: instance.placement.and_then(|p| p.availability_zone),
            launch_time: instance.launch_time.map(|t| t.to_string()),
            tags,
            block_devices,
        }
    }
}

#[async_trait]
impl InstanceInventory for EC2Service {
    /// Regions enabled for the account, as seen from `region`
    async fn list_regions(&self, region: &str) -> Result<Vec<String>> {
        let client = self.client(region).await?;
        let response = client
            .describe_regions()
            .send()
            .await
            .map_err(sdk_failure)
            .context("DescribeRegions failed")?;

        Ok(response
            .regions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| r.region_name)
            .collect())
    }

    async fn describe_instances(
        &self,
        region: &str,
        query: InstanceQuery,
    ) -> Result<Vec<Reservation>> {
        let client = self.client(region).await?;

        let filters: Vec<ec2::types::Filter> = query
            .filters
            .into_iter()
            .map(|f| {
                ec2::types::Filter::builder()
                    .name(f.name)
                    .set_values(Some(f.values))
                    .build()
            })
            .collect();

        let mut request = client.describe_instances();
        if !filters.is_empty() {
            request = request.set_filters(Some(filters));
        }
        if !query.instance_ids.is_empty() {
            request = request.set_instance_ids(Some(query.instance_ids));
        }

        let mut paginator = request.into_paginator().send();
        let mut reservations = Vec::new();

        while let Some(page) = paginator.next().await {
            let page = page
                .map_err(sdk_failure)
                .context("DescribeInstances page failed")?;
            for reservation in page.reservations.unwrap_or_default() {
                reservations.push(Reservation {
                    instances: reservation
                        .instances
                        .unwrap_or_default()
                        .into_iter()
                        .map(Self::instance_from_sdk)
                        .collect(),
                });
            }
        }

        tracing::debug!(
            "DescribeInstances returned {} reservations in {}",
            reservations.len(),
            region
        );
        Ok(reservations)
    }
}
