use super::super::aws_services::{Metric, MetricQuery};
use super::super::constants;
use super::super::error::ResourceError;
use super::super::normalizers::{normalize, Suggestion};
use super::super::request::{
    DimensionFilter, DimensionKeysRequest, DimensionKeysRequestType, DimensionValuesRequest,
    QueryParams,
};
use super::super::ResourceContext;
use super::unique;
use std::collections::BTreeSet;

async fn live_metrics(
    ctx: &ResourceContext,
    request: &DimensionKeysRequest,
    dimensions: Vec<DimensionFilter>,
) -> Result<Vec<Metric>, ResourceError> {
    let region = ctx.resolve_region(&request.resource.region);
    let query = MetricQuery {
        namespace: (!request.namespace.is_empty()).then(|| request.namespace.clone()),
        metric_name: request.metric_name.clone(),
        dimensions,
    };

    ctx.clients
        .metrics
        .list_metrics(region, query)
        .await
        .map_err(|e| ResourceError::provider("CloudWatch", "ListMetrics", e))
}

pub async fn dimension_keys(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = DimensionKeysRequest::from_params(params)?;
    let request_type = request.request_type();
    trace_debug!(
        "Dimension keys for {} resolved as {:?}",
        request.namespace,
        request_type
    );

    match request_type {
        DimensionKeysRequestType::Standard => {
            let keys = constants::namespace_dimension_keys(&request.namespace).unwrap_or_default();
            Ok(normalize(keys.iter().copied()))
        }
        DimensionKeysRequestType::Filter | DimensionKeysRequestType::CustomMetric => {
            let metrics = live_metrics(ctx, &request, request.dimension_filter.clone()).await?;
            let already_filtered: BTreeSet<&str> = request
                .dimension_filter
                .iter()
                .map(|f| f.name.as_str())
                .collect();

            let names = metrics
                .into_iter()
                .flat_map(|metric| metric.dimensions)
                .map(|dimension| dimension.name)
                .filter(|name| !already_filtered.contains(name.as_str()));

            Ok(normalize(unique(names)))
        }
    }
}

/// Values of `dimensionKey` across metrics matching the request, sorted
pub async fn dimension_values(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = DimensionValuesRequest::from_params(params)?;
    let key = request.dimension_key.as_str();

    let mut filters = request.keys.dimension_filter.clone();
    if !filters.iter().any(|f| f.name == key) {
        filters.push(DimensionFilter::presence(key));
    }

    let metrics = live_metrics(ctx, &request.keys, filters).await?;
    let values: BTreeSet<String> = metrics
        .into_iter()
        .flat_map(|metric| metric.dimensions)
        .filter(|dimension| dimension.name == key)
        .map(|dimension| dimension.value)
        .collect();

    Ok(normalize(values))
}
