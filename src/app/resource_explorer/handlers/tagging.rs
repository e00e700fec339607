use super::super::aws_services::{TagFilter, TaggedResourceQuery};
use super::super::error::ResourceError;
use super::super::normalizers::{normalize, Suggestion};
use super::super::request::{parse_filter_map, QueryParams, ResourceRequest};
use super::super::ResourceContext;

/// ARNs of resources matching `resourceType` and the `tags` filter, in response order
pub async fn resource_arns(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = ResourceRequest::from_params(params)?;

    let tag_filters = parse_filter_map(params.get("tags"), "tags")?
        .into_iter()
        .map(|(key, values)| TagFilter { key, values })
        .collect();
    let resource_types = params
        .get("resourceType")
        .map(|t| vec![t.to_string()])
        .unwrap_or_default();

    let region = ctx.resolve_region(&request.region);
    let resources = ctx
        .clients
        .tagged_resources
        .get_tagged_resources(
            region,
            TaggedResourceQuery {
                resource_types,
                tag_filters,
            },
        )
        .await
        .map_err(|e| ResourceError::provider("Tagging", "GetResources", e))?;

    Ok(normalize(resources.into_iter().map(|r| r.arn)))
}
