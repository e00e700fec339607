use cwsuggest::app::config::DataSourceSettings;
use cwsuggest::app::resource_explorer::aws_services::in_memory::ProviderCall;
use cwsuggest::app::resource_explorer::aws_services::Metric;
use cwsuggest::app::resource_explorer::{
    resolve, DimensionFilter, DimensionKeysRequest, DimensionKeysRequestType, InMemoryProvider,
    ProviderClients, QueryParams, ResourceContext, ResourceKind, Suggestion,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn ec2_metrics() -> Vec<Metric> {
    vec![
        Metric::new("AWS/EC2", "CPUUtilization")
            .with_dimension("InstanceId", "i-2")
            .with_dimension("InstanceType", "t3.micro"),
        Metric::new("AWS/EC2", "CPUUtilization")
            .with_dimension("InstanceId", "i-1")
            .with_dimension("InstanceType", "m5.large"),
        Metric::new("AWS/EC2", "CPUUtilization").with_dimension("AutoScalingGroupName", "asg-1"),
        Metric::new("MyApp", "Latency")
            .with_dimension("Service", "api")
            .with_dimension("Stage", "prod"),
        Metric::new("MyApp", "Latency").with_dimension("Service", "worker"),
    ]
}

fn context() -> (ResourceContext, Arc<InMemoryProvider>) {
    let provider = Arc::new(InMemoryProvider::new().with_metrics(ec2_metrics()));
    let ctx = ResourceContext::new(
        DataSourceSettings::default(),
        ProviderClients::from_shared(provider.clone()),
    );
    (ctx, provider)
}

fn values(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.value.as_str()).collect()
}

#[test]
fn test_request_type_from_query_params() {
    let parse = |params: QueryParams| DimensionKeysRequest::from_params(&params).unwrap();

    let custom = parse(
        QueryParams::new()
            .with("region", "us-east-1")
            .with("namespace", "custom"),
    );
    assert_eq!(custom.request_type(), DimensionKeysRequestType::CustomMetric);

    let filtered = parse(
        QueryParams::new()
            .with("region", "us-east-1")
            .with("namespace", "AWS/EC2")
            .with("dimensionFilters", r#"{"InstanceId": ["i-1"]}"#),
    );
    assert_eq!(filtered.request_type(), DimensionKeysRequestType::Filter);
    assert_eq!(
        filtered.dimension_filter,
        vec![DimensionFilter::equals("InstanceId", "i-1")]
    );

    let standard = parse(
        QueryParams::new()
            .with("region", "us-east-1")
            .with("namespace", "AWS/EC2"),
    );
    assert_eq!(standard.request_type(), DimensionKeysRequestType::Standard);
}

#[tokio::test]
async fn test_standard_dimension_keys_come_from_catalogue() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2");

    let result = resolve(ResourceKind::DimensionKeys, &ctx, &params)
        .await
        .unwrap();

    assert_eq!(
        values(&result),
        vec!["AutoScalingGroupName", "ImageId", "InstanceId", "InstanceType"]
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_filtered_dimension_keys_exclude_filtered_names() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2")
        .with("metricName", "CPUUtilization")
        .with("dimensionFilters", r#"{"InstanceId": []}"#);

    let result = resolve(ResourceKind::DimensionKeys, &ctx, &params)
        .await
        .unwrap();

    assert_eq!(values(&result), vec!["InstanceType"]);
    match &provider.calls()[..] {
        [ProviderCall::ListMetrics { query, .. }] => {
            assert_eq!(query.namespace.as_deref(), Some("AWS/EC2"));
            assert_eq!(query.metric_name.as_deref(), Some("CPUUtilization"));
            assert_eq!(query.dimensions, vec![DimensionFilter::presence("InstanceId")]);
        }
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_custom_namespace_dimension_keys_are_live() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "MyApp");

    let result = resolve(ResourceKind::DimensionKeys, &ctx, &params)
        .await
        .unwrap();

    assert_eq!(values(&result), vec!["Service", "Stage"]);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_dimension_values_sorted_and_deduped() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2")
        .with("metricName", "CPUUtilization")
        .with("dimensionKey", "InstanceId");

    let result = resolve(ResourceKind::DimensionValues, &ctx, &params)
        .await
        .unwrap();

    assert_eq!(values(&result), vec!["i-1", "i-2"]);
    match &provider.calls()[..] {
        [ProviderCall::ListMetrics { query, .. }] => {
            assert_eq!(query.dimensions, vec![DimensionFilter::presence("InstanceId")]);
        }
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_dimension_values_respect_other_filters() {
    let (ctx, _) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2")
        .with("dimensionKey", "InstanceId")
        .with("dimensionFilters", r#"{"InstanceType": "m5.large"}"#);

    let result = resolve(ResourceKind::DimensionValues, &ctx, &params)
        .await
        .unwrap();

    assert_eq!(values(&result), vec!["i-1"]);
}

#[tokio::test]
async fn test_malformed_dimension_filter_makes_no_provider_call() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2")
        .with("dimensionKey", "InstanceId")
        .with("dimensionFilters", "{not json");

    for kind in [ResourceKind::DimensionKeys, ResourceKind::DimensionValues] {
        let err = resolve(kind, &ctx, &params).await.unwrap_err();
        assert!(err.is_malformed(), "{} should be malformed", kind);
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_dimension_values_without_key_is_malformed() {
    let (ctx, provider) = context();
    let params = QueryParams::new()
        .with("region", "us-east-1")
        .with("namespace", "AWS/EC2");

    let err = resolve(ResourceKind::DimensionValues, &ctx, &params)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed request: dimensionKey is required");
    assert_eq!(provider.call_count(), 0);
}
