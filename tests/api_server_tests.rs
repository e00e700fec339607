use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use cwsuggest::app::api_server::{router, ApiServer};
use cwsuggest::app::config::DataSourceSettings;
use cwsuggest::app::resource_explorer::aws_services::{Metric, Tag, TaggedResource};
use cwsuggest::app::resource_explorer::{
    InMemoryProvider, ProviderClients, ResourceContext, Suggestion,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tower::ServiceExt;

fn app(provider: InMemoryProvider) -> axum::Router {
    let ctx = ResourceContext::new(
        DataSourceSettings::default(),
        ProviderClients::from_shared(Arc::new(provider)),
    );
    router(ctx)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_metrics_route_returns_json_suggestions() {
    let (status, body) = get(
        app(InMemoryProvider::new().with_metrics(vec![Metric::new("MyApp", "Latency")])),
        "/metrics?region=us-east-1&namespace=MyApp",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let suggestions: Vec<Suggestion> = serde_json::from_slice(&body).unwrap();
    assert_eq!(suggestions, vec![Suggestion::new("Latency")]);
}

#[tokio::test]
async fn test_resource_arns_route_encodes_triples() {
    let provider = InMemoryProvider::new().with_tagged_resources(vec![TaggedResource {
        arn: "arn:aws:sqs:us-east-1:123456789012:jobs".to_string(),
        tags: vec![Tag::new("Env", "prod")],
    }]);

    let (status, body) = get(
        app(provider),
        "/resource-arns?region=us-east-1&resourceType=sqs&tags=%7B%22Env%22%3A%5B%22prod%22%5D%7D",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "text": "arn:aws:sqs:us-east-1:123456789012:jobs",
            "value": "arn:aws:sqs:us-east-1:123456789012:jobs",
            "label": "arn:aws:sqs:us-east-1:123456789012:jobs"
        }])
    );
}

#[tokio::test]
async fn test_malformed_filter_is_bad_request() {
    let (status, body) = get(
        app(InMemoryProvider::new()),
        "/dimension-keys?region=us-east-1&namespace=AWS%2FEC2&dimensionFilters=%7Bnope",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.starts_with("malformed request: unable to parse dimension filters"));
}

#[tokio::test]
async fn test_missing_region_is_bad_request() {
    let (status, _) = get(app(InMemoryProvider::new()), "/ebs-volume-ids?instanceId=i-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_failures_map_to_status() {
    let throttled = InMemoryProvider::new().failing("ListMetrics", "ThrottlingException: Rate exceeded");
    let (status, _) = get(
        app(throttled),
        "/dimension-values?region=us-east-1&namespace=MyApp&dimensionKey=Service",
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let invalid = InMemoryProvider::new()
        .failing("DescribeInstances", "InvalidInstanceID.Malformed: Invalid id: \"x\"");
    let (status, _) = get(app(invalid), "/ebs-volume-ids?region=us-east-1&instanceId=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let denied = InMemoryProvider::new().failing("GetResources", "AccessDeniedException: no");
    let (status, body) = get(app(denied), "/resource-arns?region=us-east-1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body).unwrap().contains("access denied"));
}

#[tokio::test]
async fn test_rejected_filter_naming_network_is_bad_request() {
    let provider = InMemoryProvider::new().failing(
        "DescribeInstances",
        "InvalidParameterValue: The filter 'network-interface.bogus' is invalid",
    );
    let (status, _) = get(
        app(provider),
        "/ec2-instance-attribute?region=us-east-1&attributeName=InstanceId&filters=%7B%22network-interface.bogus%22%3A%5B%22x%22%5D%7D",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let provider = InMemoryProvider::new().failing(
        "GetResources",
        "InvalidParameterException: invalid tag key 'connection-pool'",
    );
    let (status, _) = get(app(provider), "/resource-arns?region=us-east-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = get(app(InMemoryProvider::new()), "/instances?region=us-east-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_starts_and_shuts_down() {
    let ctx = ResourceContext::new(
        DataSourceSettings::default(),
        ProviderClients::from_shared(Arc::new(InMemoryProvider::new())),
    );
    let mut server = ApiServer::start(ctx, "127.0.0.1:0").await.unwrap();

    assert_ne!(server.local_addr().port(), 0);
    assert!(server.base_url().starts_with("http://127.0.0.1:"));
    server.shutdown().await;
}
