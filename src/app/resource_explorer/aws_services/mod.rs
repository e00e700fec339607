//! Provider facade over the AWS inventories the suggestion handlers read from.
//!
//! Handlers only see the traits in this module. Production wiring uses the SDK-backed
//! services; tests use [`InMemoryProvider`]. Every implementation returns fully
//! paginated results.

use super::request::DimensionFilter;
use super::sdk_errors::describe_sdk_error;
use super::session::AwsSession;
use anyhow::Result;
use async_trait::async_trait;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use std::sync::Arc;

pub mod cloudwatch;
pub mod ec2;
pub mod in_memory;
pub mod logs;
pub mod resource_tagging;

pub use cloudwatch::CloudWatchService;
pub use ec2::EC2Service;
pub use in_memory::InMemoryProvider;
pub use logs::LogsService;
pub use resource_tagging::ResourceTaggingService;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// A CloudWatch metric as returned by ListMetrics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
}

impl Metric {
    pub fn new(namespace: impl Into<String>, metric_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            metric_name: metric_name.into(),
            dimensions: Vec::new(),
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Dimension {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Whether this metric satisfies a single dimension filter
    pub fn matches(&self, filter: &DimensionFilter) -> bool {
        self.dimensions.iter().any(|d| {
            d.name == filter.name
                && filter
                    .value
                    .as_deref()
                    .map_or(true, |value| d.value == value)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricQuery {
    pub namespace: Option<String>,
    pub metric_name: Option<String>,
    pub dimensions: Vec<DimensionFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockDevice {
    pub device_name: Option<String>,
    pub volume_id: Option<String>,
}

/// The instance fields the attribute lookups can read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instance {
    pub instance_id: String,
    pub instance_type: Option<String>,
    pub image_id: Option<String>,
    pub key_name: Option<String>,
    pub architecture: Option<String>,
    pub private_ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    pub private_dns_name: Option<String>,
    pub public_dns_name: Option<String>,
    pub subnet_id: Option<String>,
    pub vpc_id: Option<String>,
    pub state: Option<String>,
    pub availability_zone: Option<String>,
    pub launch_time: Option<String>,
    pub tags: Vec<Tag>,
    pub block_devices: Vec<BlockDevice>,
}

impl Instance {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Default::default()
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reservation {
    pub instances: Vec<Instance>,
}

/// An EC2 `Filter`: name plus allowed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Filter {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceQuery {
    pub filters: Vec<Ec2Filter>,
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaggedResourceQuery {
    pub resource_types: Vec<String>,
    pub tag_filters: Vec<TagFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResource {
    pub arn: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogGroupQuery {
    pub prefix: Option<String>,
    /// Page size; `Some` returns a single page, `None` walks every page
    pub limit: Option<i32>,
}

#[async_trait]
pub trait MetricsCatalog: Send + Sync {
    async fn list_metrics(&self, region: &str, query: MetricQuery) -> Result<Vec<Metric>>;
}

#[async_trait]
pub trait InstanceInventory: Send + Sync {
    async fn list_regions(&self, region: &str) -> Result<Vec<String>>;

    async fn describe_instances(&self, region: &str, query: InstanceQuery)
        -> Result<Vec<Reservation>>;
}

#[async_trait]
pub trait TaggedResourceInventory: Send + Sync {
    async fn get_tagged_resources(
        &self,
        region: &str,
        query: TaggedResourceQuery,
    ) -> Result<Vec<TaggedResource>>;
}

#[async_trait]
pub trait LogGroupInventory: Send + Sync {
    async fn describe_log_groups(&self, region: &str, query: LogGroupQuery) -> Result<Vec<String>>;
}

/// The set of provider clients a request is resolved against
#[derive(Clone)]
pub struct ProviderClients {
    pub metrics: Arc<dyn MetricsCatalog>,
    pub instances: Arc<dyn InstanceInventory>,
    pub tagged_resources: Arc<dyn TaggedResourceInventory>,
    pub log_groups: Arc<dyn LogGroupInventory>,
}

impl ProviderClients {
    /// SDK-backed clients sharing one session
    pub fn aws(session: AwsSession) -> Self {
        Self {
            metrics: Arc::new(CloudWatchService::new(session.clone())),
            instances: Arc::new(EC2Service::new(session.clone())),
            tagged_resources: Arc::new(ResourceTaggingService::new(session.clone())),
            log_groups: Arc::new(LogsService::new(session)),
        }
    }

    /// Use one value for every inventory
    pub fn from_shared<P>(provider: Arc<P>) -> Self
    where
        P: MetricsCatalog
            + InstanceInventory
            + TaggedResourceInventory
            + LogGroupInventory
            + 'static,
    {
        Self {
            metrics: provider.clone(),
            instances: provider.clone(),
            tagged_resources: provider.clone(),
            log_groups: provider,
        }
    }
}

impl std::fmt::Debug for ProviderClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClients").finish_non_exhaustive()
    }
}

/// Flatten an SDK error into `anyhow`, code first
pub(crate) fn sdk_failure<E>(error: E) -> anyhow::Error
where
    E: ProvideErrorMetadata + std::error::Error,
{
    anyhow::anyhow!(describe_sdk_error(&error))
}
