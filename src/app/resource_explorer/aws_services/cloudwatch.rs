use super::super::session::AwsSession;
use super::{sdk_failure, Dimension, Metric, MetricQuery, MetricsCatalog};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudwatch as cloudwatch;

pub struct CloudWatchService {
    session: AwsSession,
}

impl CloudWatchService {
    pub fn new(session: AwsSession) -> Self {
        Self { session }
    }

    fn metric_from_sdk(metric: cloudwatch::types::Metric) -> Metric {
        Metric {
            namespace: metric.namespace.unwrap_or_default(),
            metric_name: metric.metric_name.unwrap_or_default(),
            dimensions: metric
                .dimensions
                .unwrap_or_default()
                .into_iter()
                .map(|d| Dimension {
                    name: d.name.unwrap_or_default(),
                    value: d.value.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MetricsCatalog for CloudWatchService {
    /// List metrics, following every `NextToken`
    async fn list_metrics(&self, region: &str, query: MetricQuery) -> Result<Vec<Metric>> {
        let aws_config = self
            .session
            .create_aws_config_for_region(region)
            .await
            .with_context(|| format!("Failed to create AWS config for region {}", region))?;

        let client = cloudwatch::Client::new(&aws_config);
        let mut request = client
            .list_metrics()
            .set_namespace(query.namespace)
            .set_metric_name(query.metric_name);

        for filter in query.dimensions {
            let dimension = cloudwatch::types::DimensionFilter::builder()
                .name(filter.name)
                .set_value(filter.value)
                .build()
                .context("Invalid dimension filter")?;
            request = request.dimensions(dimension);
        }

        let mut paginator = request.into_paginator().send();
        let mut metrics = Vec::new();

        while let Some(page) = paginator.next().await {
            let page = page
                .map_err(sdk_failure)
                .context("ListMetrics page failed")?;
            if let Some(page_metrics) = page.metrics {
                metrics.extend(page_metrics.into_iter().map(Self::metric_from_sdk));
            }
        }

        tracing::debug!("ListMetrics returned {} metrics in {}", metrics.len(), region);
        Ok(metrics)
    }
}
