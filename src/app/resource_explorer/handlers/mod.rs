//! One handler per suggestion kind, plus the dispatch table that selects them.

use super::error::ResourceError;
use super::normalizers::Suggestion;
use super::request::QueryParams;
use super::ResourceContext;
use std::collections::HashSet;
use std::fmt;

pub mod dimensions;
pub mod ec2;
pub mod logs;
pub mod metrics;
pub mod tagging;

/// The resource lookups exposed at `/<path>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Regions,
    Namespaces,
    Metrics,
    AllMetrics,
    EbsVolumeIds,
    Ec2InstanceAttribute,
    ResourceArns,
    DimensionKeys,
    DimensionValues,
    LogGroups,
    AllLogGroups,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Regions,
        ResourceKind::Namespaces,
        ResourceKind::Metrics,
        ResourceKind::AllMetrics,
        ResourceKind::EbsVolumeIds,
        ResourceKind::Ec2InstanceAttribute,
        ResourceKind::ResourceArns,
        ResourceKind::DimensionKeys,
        ResourceKind::DimensionValues,
        ResourceKind::LogGroups,
        ResourceKind::AllLogGroups,
    ];

    pub fn as_path(self) -> &'static str {
        match self {
            ResourceKind::Regions => "regions",
            ResourceKind::Namespaces => "namespaces",
            ResourceKind::Metrics => "metrics",
            ResourceKind::AllMetrics => "all-metrics",
            ResourceKind::EbsVolumeIds => "ebs-volume-ids",
            ResourceKind::Ec2InstanceAttribute => "ec2-instance-attribute",
            ResourceKind::ResourceArns => "resource-arns",
            ResourceKind::DimensionKeys => "dimension-keys",
            ResourceKind::DimensionValues => "dimension-values",
            ResourceKind::LogGroups => "log-groups",
            ResourceKind::AllLogGroups => "all-log-groups",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_matches('/');
        Self::ALL.into_iter().find(|kind| kind.as_path() == path)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Resolve one lookup against the context's providers
///
/// Callable without the HTTP layer; the first error any step hits is returned as is.
pub async fn resolve(
    kind: ResourceKind,
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    trace_debug!("Dispatching {} lookup", kind);

    let suggestions = match kind {
        ResourceKind::Regions => metrics::regions(ctx, params).await,
        ResourceKind::Namespaces => metrics::namespaces(ctx),
        ResourceKind::Metrics => metrics::metrics(ctx, params).await,
        ResourceKind::AllMetrics => metrics::all_metrics(),
        ResourceKind::EbsVolumeIds => ec2::ebs_volume_ids(ctx, params).await,
        ResourceKind::Ec2InstanceAttribute => ec2::ec2_instance_attribute(ctx, params).await,
        ResourceKind::ResourceArns => tagging::resource_arns(ctx, params).await,
        ResourceKind::DimensionKeys => dimensions::dimension_keys(ctx, params).await,
        ResourceKind::DimensionValues => dimensions::dimension_values(ctx, params).await,
        ResourceKind::LogGroups => logs::log_groups(ctx, params).await,
        ResourceKind::AllLogGroups => logs::all_log_groups(ctx, params).await,
    }?;

    trace_debug!("{} lookup produced {} suggestions", kind, suggestions.len());
    Ok(suggestions)
}

/// Drop repeats, keeping the first occurrence of each value
pub(crate) fn unique<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
