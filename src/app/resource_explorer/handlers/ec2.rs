use super::super::aws_services::{Ec2Filter, Instance, InstanceQuery, Reservation};
use super::super::error::ResourceError;
use super::super::normalizers::{normalize, Suggestion};
use super::super::request::{parse_filter_map, parse_multi_select_value, QueryParams, ResourceRequest};
use super::super::ResourceContext;
use super::unique;
use std::collections::HashSet;

/// Read one attribute of an instance by its dotted path
///
/// `Ok(None)` means the instance lacks the attribute; an unknown path is an error.
pub fn instance_attribute(instance: &Instance, path: &str) -> Result<Option<String>, ResourceError> {
    if let Some(key) = path.strip_prefix("Tags.") {
        return Ok(instance.tag(key).map(str::to_string));
    }

    let value = match path {
        "InstanceId" => Some(&instance.instance_id).filter(|id| !id.is_empty()),
        "InstanceType" => instance.instance_type.as_ref(),
        "ImageId" => instance.image_id.as_ref(),
        "KeyName" => instance.key_name.as_ref(),
        "Architecture" => instance.architecture.as_ref(),
        "PrivateIpAddress" => instance.private_ip_address.as_ref(),
        "PublicIpAddress" => instance.public_ip_address.as_ref(),
        "PrivateDnsName" => instance.private_dns_name.as_ref(),
        "PublicDnsName" => instance.public_dns_name.as_ref(),
        "SubnetId" => instance.subnet_id.as_ref(),
        "VpcId" => instance.vpc_id.as_ref(),
        "State.Name" => instance.state.as_ref(),
        "Placement.AvailabilityZone" => instance.availability_zone.as_ref(),
        "LaunchTime" => instance.launch_time.as_ref(),
        other => {
            return Err(ResourceError::malformed(format!(
                "unsupported instance attribute: {}",
                other
            )))
        }
    };

    Ok(value.filter(|v| !v.is_empty()).cloned())
}

/// Translate the `filters` map into EC2 filters
///
/// `tag:Key` with no values constrains by key presence; other empty filters are dropped.
fn ec2_filters(raw: Option<&str>) -> Result<Vec<Ec2Filter>, ResourceError> {
    let mut filters = Vec::new();
    for (name, values) in parse_filter_map(raw, "filters")? {
        if !values.is_empty() {
            filters.push(Ec2Filter { name, values });
            continue;
        }
        if let Some(key) = name.strip_prefix("tag:") {
            filters.push(Ec2Filter {
                name: "tag-key".to_string(),
                values: vec![key.to_string()],
            });
        }
    }
    Ok(filters)
}

fn instances(reservations: &[Reservation]) -> impl Iterator<Item = &Instance> {
    reservations.iter().flat_map(|r| r.instances.iter())
}

pub async fn ec2_instance_attribute(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = ResourceRequest::from_params(params)?;
    let attribute = params.require("attributeName")?;
    let filters = ec2_filters(params.get("filters"))?;

    // Unknown paths fail before any provider call
    instance_attribute(&Instance::default(), attribute)?;

    let region = ctx.resolve_region(&request.region);
    let reservations = ctx
        .clients
        .instances
        .describe_instances(
            region,
            InstanceQuery {
                filters,
                instance_ids: Vec::new(),
            },
        )
        .await
        .map_err(|e| ResourceError::provider("EC2", "DescribeInstances", e))?;

    let mut values = Vec::new();
    for instance in instances(&reservations) {
        if let Some(value) = instance_attribute(instance, attribute)? {
            values.push(value);
        }
    }

    Ok(normalize(unique(values)))
}

/// EBS volume IDs of the requested instances, in instance-then-device order
pub async fn ebs_volume_ids(
    ctx: &ResourceContext,
    params: &QueryParams,
) -> Result<Vec<Suggestion>, ResourceError> {
    let request = ResourceRequest::from_params(params)?;
    let instance_ids = params
        .get("instanceId")
        .map(parse_multi_select_value)
        .unwrap_or_default();

    let region = ctx.resolve_region(&request.region);
    let reservations = ctx
        .clients
        .instances
        .describe_instances(
            region,
            InstanceQuery {
                filters: Vec::new(),
                instance_ids: instance_ids.clone(),
            },
        )
        .await
        .map_err(|e| ResourceError::provider("EC2", "DescribeInstances", e))?;

    let wanted: HashSet<&str> = instance_ids.iter().map(String::as_str).collect();
    let volume_ids = instances(&reservations)
        .filter(|instance| wanted.is_empty() || wanted.contains(instance.instance_id.as_str()))
        .flat_map(|instance| instance.block_devices.iter())
        .filter_map(|device| device.volume_id.clone());

    Ok(normalize(volume_ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::resource_explorer::aws_services::Tag;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instance_attribute_paths() {
        let mut instance = Instance::new("i-1");
        instance.instance_type = Some("t3.micro".to_string());
        instance.state = Some("running".to_string());
        instance.tags.push(Tag::new("Name", "web"));

        assert_eq!(
            instance_attribute(&instance, "InstanceId").unwrap(),
            Some("i-1".to_string())
        );
        assert_eq!(
            instance_attribute(&instance, "InstanceType").unwrap(),
            Some("t3.micro".to_string())
        );
        assert_eq!(
            instance_attribute(&instance, "State.Name").unwrap(),
            Some("running".to_string())
        );
        assert_eq!(
            instance_attribute(&instance, "Tags.Name").unwrap(),
            Some("web".to_string())
        );
        assert_eq!(instance_attribute(&instance, "Tags.Team").unwrap(), None);
        assert_eq!(instance_attribute(&instance, "KeyName").unwrap(), None);
        assert!(instance_attribute(&instance, "Bogus").unwrap_err().is_malformed());
    }

    #[test]
    fn test_ec2_filters_translation() {
        let filters = ec2_filters(Some(
            r#"{"tag:Team": [], "instance-state-name": ["running"], "vpc-id": []}"#,
        ))
        .unwrap();

        assert_eq!(
            filters,
            vec![
                Ec2Filter {
                    name: "instance-state-name".to_string(),
                    values: vec!["running".to_string()],
                },
                Ec2Filter {
                    name: "tag-key".to_string(),
                    values: vec!["Team".to_string()],
                },
            ]
        );
    }
}
