use super::super::aws_services::LogGroupQuery;
use super::super::error::ResourceError;
use super::super::normalizers::{normalize, Suggestion};
use super::super::request::{QueryParams, ResourceRequest};
use super::super::ResourceContext;

pub const DEFAULT_LOG_GROUP_LIMIT: i32 = 50;
pub const MAX_LOG_GROUP_LIMIT: i32 = 50;

fn parse_limit(raw: Option<&str>) -> Result<i32, ResourceError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LOG_GROUP_LIMIT);
    };
    let limit: i32 = raw
        .parse()
        .map_err(|_| ResourceError::malformed(format!("limit must be a number, got {}", raw)))?;
    if limit < 1 {
        return Err(ResourceError::malformed("limit must be positive"));
    }
    Ok(limit.min(MAX_LOG_GROUP_LIMIT))
}

async fn describe(
    ctx: &ResourceContext,
    params: &QueryParams,
    limit: Option<i32>,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = ResourceRequest::from_params(params)?;
    let region = ctx.resolve_region(&request.region);
    let query = LogGroupQuery {
        prefix: params.get("logGroupNamePrefix").map(str::to_string),
        limit,
    };

    let groups = ctx
        .clients
        .log_groups
        .describe_log_groups(region, query)
        .await
        .map_err(|e| ResourceError::provider("CloudWatchLogs", "DescribeLogGroups", e))?;

    Ok(normalize(groups))
}

/// A single page of log group names
pub async fn log_groups(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let limit = parse_limit(params.get("limit"))?;
    describe(ctx, params, Some(limit)).await
}

pub async fn all_log_groups(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    describe(ctx, params, None).await
}
