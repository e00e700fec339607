use super::super::aws_services::MetricQuery;
use super::super::constants;
use super::super::error::ResourceError;
use super::super::normalizers::{normalize, Suggestion};
use super::super::request::{QueryParams, ResourceRequest};
use super::super::ResourceContext;
use super::unique;

/// Static regions first, then any region the account reports that the list lacks
pub async fn regions(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let requested = params.get("region").unwrap_or(constants::DEFAULT_REGION_ALIAS);
    let region = ctx.resolve_region(requested);

    let discovered = ctx
        .clients
        .instances
        .list_regions(region)
        .await
        .map_err(|e| ResourceError::provider("EC2", "DescribeRegions", e))?;

    let mut regions: Vec<String> = constants::REGIONS.iter().map(|r| r.to_string()).collect();
    for region in discovered {
        if !regions.contains(&region) {
            log_debug!("Discovered region {} not in the static list", region);
            regions.push(region);
        }
    }

    Ok(normalize(regions))
}

/// Built-in namespaces plus the configured custom ones, sorted
pub fn namespaces(ctx: &ResourceContext) -> Result<Vec<Suggestion>, ResourceError> {
    let mut names: Vec<String> = constants::namespace_names()
        .map(str::to_string)
        .chain(ctx.settings.custom_namespaces.iter().cloned())
        .collect();
    names.sort();
    names.dedup();
    Ok(normalize(names))
}

pub async fn metrics(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let namespace = params.get("namespace").unwrap_or_default();

    if let Some(known) = constants::namespace_metrics(namespace) {
        return Ok(normalize(known.iter().copied()));
    }

    let request = ResourceRequest::from_params(params)?;
    let region = ctx.resolve_region(&request.region);
    let query = MetricQuery {
        namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
        ..Default::default()
    };

    let metrics = ctx
        .clients
        .metrics
        .list_metrics(region, query)
        .await
        .map_err(|e| ResourceError::provider("CloudWatch", "ListMetrics", e))?;

    Ok(normalize(unique(
        metrics.into_iter().map(|metric| metric.metric_name),
    )))
}

/// Every built-in namespace's metric list, concatenated in namespace order
pub fn all_metrics() -> Result<Vec<Suggestion>, ResourceError> {
    Ok(normalize(
        constants::NAMESPACES
            .iter()
            .flat_map(|ns| ns.metrics.iter().copied()),
    ))
}
