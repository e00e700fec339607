//! Deterministic provider double.
//!
//! Serves canned inventories, records every call it receives, and can be told to fail
//! an operation with a given error text (e.g. `"ThrottlingException: Rate exceeded"`),
//! which then flows through the same categorization as a real SDK failure.

use super::{
    InstanceInventory, InstanceQuery, LogGroupInventory, LogGroupQuery, Metric, MetricQuery,
    MetricsCatalog, Reservation, TaggedResource, TaggedResourceInventory, TaggedResourceQuery,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded facade call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    ListMetrics { region: String, query: MetricQuery },
    ListRegions { region: String },
    DescribeInstances { region: String, query: InstanceQuery },
    GetTaggedResources { region: String, query: TaggedResourceQuery },
    DescribeLogGroups { region: String, query: LogGroupQuery },
}

impl ProviderCall {
    pub fn operation(&self) -> &'static str {
        match self {
            ProviderCall::ListMetrics { .. } => "ListMetrics",
            ProviderCall::ListRegions { .. } => "DescribeRegions",
            ProviderCall::DescribeInstances { .. } => "DescribeInstances",
            ProviderCall::GetTaggedResources { .. } => "GetResources",
            ProviderCall::DescribeLogGroups { .. } => "DescribeLogGroups",
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    metrics: Vec<Metric>,
    regions: Vec<String>,
    reservations: Vec<Reservation>,
    tagged_resources: Vec<TaggedResource>,
    log_groups: Vec<String>,
    failures: HashMap<&'static str, String>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics.extend(metrics);
        self
    }

    pub fn with_regions<S: Into<String>>(mut self, regions: impl IntoIterator<Item = S>) -> Self {
        self.regions.extend(regions.into_iter().map(Into::into));
        self
    }

    pub fn with_reservations(mut self, reservations: impl IntoIterator<Item = Reservation>) -> Self {
        self.reservations.extend(reservations);
        self
    }

    pub fn with_tagged_resources(
        mut self,
        resources: impl IntoIterator<Item = TaggedResource>,
    ) -> Self {
        self.tagged_resources.extend(resources);
        self
    }

    pub fn with_log_groups<S: Into<String>>(mut self, groups: impl IntoIterator<Item = S>) -> Self {
        self.log_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// Make every call to `operation` fail with `error`
    pub fn failing(mut self, operation: &'static str, error: impl Into<String>) -> Self {
        self.failures.insert(operation, error.into());
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn record(&self, call: ProviderCall) -> Result<()> {
        let operation = call.operation();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match self.failures.get(operation) {
            Some(error) => Err(anyhow!("{}", error)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MetricsCatalog for InMemoryProvider {
    /// Applies namespace, metric-name and dimension filters like ListMetrics does
    async fn list_metrics(&self, region: &str, query: MetricQuery) -> Result<Vec<Metric>> {
        self.record(ProviderCall::ListMetrics {
            region: region.to_string(),
            query: query.clone(),
        })?;

        Ok(self
            .metrics
            .iter()
            .filter(|m| query.namespace.as_deref().map_or(true, |ns| m.namespace == ns))
            .filter(|m| {
                query
                    .metric_name
                    .as_deref()
                    .map_or(true, |name| m.metric_name == name)
            })
            .filter(|m| query.dimensions.iter().all(|f| m.matches(f)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InstanceInventory for InMemoryProvider {
    async fn list_regions(&self, region: &str) -> Result<Vec<String>> {
        self.record(ProviderCall::ListRegions {
            region: region.to_string(),
        })?;
        Ok(self.regions.clone())
    }

    /// Returns every reservation unfiltered; callers must not rely on server-side filtering
    async fn describe_instances(
        &self,
        region: &str,
        query: InstanceQuery,
    ) -> Result<Vec<Reservation>> {
        self.record(ProviderCall::DescribeInstances {
            region: region.to_string(),
            query,
        })?;
        Ok(self.reservations.clone())
    }
}

#[async_trait]
impl TaggedResourceInventory for InMemoryProvider {
    async fn get_tagged_resources(
        &self,
        region: &str,
        query: TaggedResourceQuery,
    ) -> Result<Vec<TaggedResource>> {
        self.record(ProviderCall::GetTaggedResources {
            region: region.to_string(),
            query,
        })?;
        Ok(self.tagged_resources.clone())
    }
}

#[async_trait]
impl LogGroupInventory for InMemoryProvider {
    async fn describe_log_groups(&self, region: &str, query: LogGroupQuery) -> Result<Vec<String>> {
        self.record(ProviderCall::DescribeLogGroups {
            region: region.to_string(),
            query: query.clone(),
        })?;

        let matching = self
            .log_groups
            .iter()
            .filter(|g| query.prefix.as_deref().map_or(true, |p| g.starts_with(p)))
            .cloned();

        Ok(match query.limit {
            Some(limit) => matching.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => matching.collect(),
        })
    }
}
