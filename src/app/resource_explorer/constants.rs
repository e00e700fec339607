//! Built-in CloudWatch catalogue: known regions, namespaces, metrics and dimension keys.
//!
//! Everything here is immutable process-wide data. The lookup index is built lazily on
//! first access and never mutated afterwards, so concurrent readers need no locking.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Region name that callers send to mean "the data source's configured region"
pub const DEFAULT_REGION_ALIAS: &str = "default";

/// Regions known without asking EC2. Discovered regions are appended per call.
pub const REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-north-1",
    "eu-south-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-iso-east-1",
    "us-isob-east-1",
    "us-west-1",
    "us-west-2",
];

/// Static description of one built-in namespace
#[derive(Debug)]
pub struct NamespaceSpec {
    pub name: &'static str,
    pub metrics: &'static [&'static str],
    pub dimension_keys: &'static [&'static str],
}

/// Built-in namespaces, sorted by name
pub static NAMESPACES: &[NamespaceSpec] = &[
    NamespaceSpec {
        name: "AWS/ApiGateway",
        metrics: &[
            "4XXError",
            "5XXError",
            "CacheHitCount",
            "CacheMissCount",
            "Count",
            "IntegrationLatency",
            "Latency",
        ],
        dimension_keys: &["ApiId", "ApiName", "Method", "Resource", "Stage"],
    },
    NamespaceSpec {
        name: "AWS/ApplicationELB",
        metrics: &[
            "ActiveConnectionCount",
            "ClientTLSNegotiationErrorCount",
            "ConsumedLCUs",
            "HTTPCode_ELB_4XX_Count",
            "HTTPCode_ELB_5XX_Count",
            "HTTPCode_Target_2XX_Count",
            "HTTPCode_Target_4XX_Count",
            "HTTPCode_Target_5XX_Count",
            "HealthyHostCount",
            "NewConnectionCount",
            "ProcessedBytes",
            "RejectedConnectionCount",
            "RequestCount",
            "RequestCountPerTarget",
            "TargetResponseTime",
            "UnHealthyHostCount",
        ],
        dimension_keys: &["AvailabilityZone", "LoadBalancer", "TargetGroup"],
    },
    NamespaceSpec {
        name: "AWS/AutoScaling",
        metrics: &[
            "GroupDesiredCapacity",
            "GroupInServiceInstances",
            "GroupMaxSize",
            "GroupMinSize",
            "GroupPendingInstances",
            "GroupStandbyInstances",
            "GroupTerminatingInstances",
            "GroupTotalInstances",
        ],
        dimension_keys: &["AutoScalingGroupName"],
    },
    NamespaceSpec {
        name: "AWS/CloudFront",
        metrics: &[
            "4xxErrorRate",
            "5xxErrorRate",
            "BytesDownloaded",
            "BytesUploaded",
            "Requests",
            "TotalErrorRate",
        ],
        dimension_keys: &["DistributionId", "Region"],
    },
    NamespaceSpec {
        name: "AWS/DynamoDB",
        metrics: &[
            "ConditionalCheckFailedRequests",
            "ConsumedReadCapacityUnits",
            "ConsumedWriteCapacityUnits",
            "ProvisionedReadCapacityUnits",
            "ProvisionedWriteCapacityUnits",
            "ReadThrottleEvents",
            "ReturnedItemCount",
            "SuccessfulRequestLatency",
            "SystemErrors",
            "ThrottledRequests",
            "UserErrors",
            "WriteThrottleEvents",
        ],
        dimension_keys: &["GlobalSecondaryIndexName", "Operation", "StreamLabel", "TableName"],
    },
    NamespaceSpec {
        name: "AWS/EBS",
        metrics: &[
            "BurstBalance",
            "VolumeConsumedReadWriteOps",
            "VolumeIdleTime",
            "VolumeQueueLength",
            "VolumeReadBytes",
            "VolumeReadOps",
            "VolumeThroughputPercentage",
            "VolumeTotalReadTime",
            "VolumeTotalWriteTime",
            "VolumeWriteBytes",
            "VolumeWriteOps",
        ],
        dimension_keys: &["VolumeId"],
    },
    NamespaceSpec {
        name: "AWS/EC2",
        metrics: &[
            "CPUCreditBalance",
            "CPUCreditUsage",
            "CPUSurplusCreditBalance",
            "CPUSurplusCreditsCharged",
            "CPUUtilization",
            "DiskReadBytes",
            "DiskReadOps",
            "DiskWriteBytes",
            "DiskWriteOps",
            "EBSByteBalance%",
            "EBSIOBalance%",
            "EBSReadBytes",
            "EBSReadOps",
            "EBSWriteBytes",
            "EBSWriteOps",
            "MetadataNoToken",
            "NetworkIn",
            "NetworkOut",
            "NetworkPacketsIn",
            "NetworkPacketsOut",
            "StatusCheckFailed",
            "StatusCheckFailed_Instance",
            "StatusCheckFailed_System",
        ],
        dimension_keys: &["AutoScalingGroupName", "ImageId", "InstanceId", "InstanceType"],
    },
    NamespaceSpec {
        name: "AWS/ECS",
        metrics: &[
            "CPUReservation",
            "CPUUtilization",
            "GPUReservation",
            "MemoryReservation",
            "MemoryUtilization",
        ],
        dimension_keys: &["ClusterName", "ServiceName"],
    },
    NamespaceSpec {
        name: "AWS/EFS",
        metrics: &[
            "BurstCreditBalance",
            "ClientConnections",
            "DataReadIOBytes",
            "DataWriteIOBytes",
            "MetadataIOBytes",
            "PercentIOLimit",
            "PermittedThroughput",
            "StorageBytes",
            "TotalIOBytes",
        ],
        dimension_keys: &["FileSystemId", "StorageClass"],
    },
    NamespaceSpec {
        name: "AWS/ELB",
        metrics: &[
            "BackendConnectionErrors",
            "EstimatedALBActiveConnectionCount",
            "HTTPCode_Backend_2XX",
            "HTTPCode_Backend_4XX",
            "HTTPCode_Backend_5XX",
            "HTTPCode_ELB_4XX",
            "HTTPCode_ELB_5XX",
            "HealthyHostCount",
            "Latency",
            "RequestCount",
            "SpilloverCount",
            "SurgeQueueLength",
            "UnHealthyHostCount",
        ],
        dimension_keys: &["AvailabilityZone", "LoadBalancerName"],
    },
    NamespaceSpec {
        name: "AWS/ElastiCache",
        metrics: &[
            "BytesUsedForCache",
            "CPUUtilization",
            "CacheHits",
            "CacheMisses",
            "CurrConnections",
            "Evictions",
            "FreeableMemory",
            "NetworkBytesIn",
            "NetworkBytesOut",
            "ReplicationLag",
            "SwapUsage",
        ],
        dimension_keys: &["CacheClusterId", "CacheNodeId"],
    },
    NamespaceSpec {
        name: "AWS/Events",
        metrics: &[
            "DeadLetterInvocations",
            "FailedInvocations",
            "Invocations",
            "MatchedEvents",
            "ThrottledRules",
            "TriggeredRules",
        ],
        dimension_keys: &["EventBusName", "RuleName"],
    },
    NamespaceSpec {
        name: "AWS/Kinesis",
        metrics: &[
            "GetRecords.Bytes",
            "GetRecords.IteratorAgeMilliseconds",
            "GetRecords.Latency",
            "GetRecords.Records",
            "GetRecords.Success",
            "IncomingBytes",
            "IncomingRecords",
            "PutRecord.Bytes",
            "PutRecord.Latency",
            "PutRecord.Success",
            "PutRecords.Bytes",
            "PutRecords.Latency",
            "PutRecords.Records",
            "ReadProvisionedThroughputExceeded",
            "WriteProvisionedThroughputExceeded",
        ],
        dimension_keys: &["ShardId", "StreamName"],
    },
    NamespaceSpec {
        name: "AWS/Lambda",
        metrics: &[
            "ConcurrentExecutions",
            "DeadLetterErrors",
            "Duration",
            "Errors",
            "Invocations",
            "IteratorAge",
            "ProvisionedConcurrencyUtilization",
            "Throttles",
            "UnreservedConcurrentExecutions",
        ],
        dimension_keys: &["Alias", "ExecutedVersion", "FunctionName", "Resource"],
    },
    NamespaceSpec {
        name: "AWS/Logs",
        metrics: &[
            "DeliveryErrors",
            "DeliveryThrottling",
            "ForwardedBytes",
            "ForwardedLogEvents",
            "IncomingBytes",
            "IncomingLogEvents",
        ],
        dimension_keys: &["DestinationType", "FilterName", "LogGroupName"],
    },
    NamespaceSpec {
        name: "AWS/NATGateway",
        metrics: &[
            "ActiveConnectionCount",
            "BytesInFromDestination",
            "BytesInFromSource",
            "BytesOutToDestination",
            "BytesOutToSource",
            "ConnectionAttemptCount",
            "ConnectionEstablishedCount",
            "ErrorPortAllocation",
            "IdleTimeoutCount",
            "PacketsDropCount",
        ],
        dimension_keys: &["NatGatewayId"],
    },
    NamespaceSpec {
        name: "AWS/NetworkELB",
        metrics: &[
            "ActiveFlowCount",
            "ActiveFlowCount_TLS",
            "ConsumedLCUs",
            "HealthyHostCount",
            "NewFlowCount",
            "ProcessedBytes",
            "TCP_Client_Reset_Count",
            "TCP_ELB_Reset_Count",
            "TCP_Target_Reset_Count",
            "UnHealthyHostCount",
        ],
        dimension_keys: &["AvailabilityZone", "LoadBalancer", "TargetGroup"],
    },
    NamespaceSpec {
        name: "AWS/RDS",
        metrics: &[
            "BinLogDiskUsage",
            "BurstBalance",
            "CPUCreditBalance",
            "CPUCreditUsage",
            "CPUUtilization",
            "DatabaseConnections",
            "DiskQueueDepth",
            "FreeStorageSpace",
            "FreeableMemory",
            "NetworkReceiveThroughput",
            "NetworkTransmitThroughput",
            "ReadIOPS",
            "ReadLatency",
            "ReadThroughput",
            "ReplicaLag",
            "SwapUsage",
            "WriteIOPS",
            "WriteLatency",
            "WriteThroughput",
        ],
        dimension_keys: &[
            "DBClusterIdentifier",
            "DBInstanceIdentifier",
            "DatabaseClass",
            "EngineName",
            "Role",
        ],
    },
    NamespaceSpec {
        name: "AWS/Route53",
        metrics: &[
            "ChildHealthCheckHealthyCount",
            "ConnectionTime",
            "HealthCheckPercentageHealthy",
            "HealthCheckStatus",
            "SSLHandshakeTime",
            "TimeToFirstByte",
        ],
        dimension_keys: &["HealthCheckId", "Region"],
    },
    NamespaceSpec {
        name: "AWS/S3",
        metrics: &[
            "4xxErrors",
            "5xxErrors",
            "AllRequests",
            "BucketSizeBytes",
            "BytesDownloaded",
            "BytesUploaded",
            "FirstByteLatency",
            "GetRequests",
            "NumberOfObjects",
            "PutRequests",
            "TotalRequestLatency",
        ],
        dimension_keys: &["BucketName", "FilterId", "StorageType"],
    },
    NamespaceSpec {
        name: "AWS/SNS",
        metrics: &[
            "NumberOfMessagesPublished",
            "NumberOfNotificationsDelivered",
            "NumberOfNotificationsFailed",
            "NumberOfNotificationsFilteredOut",
            "PublishSize",
        ],
        dimension_keys: &["Application", "Country", "Platform", "SMSType", "TopicName"],
    },
    NamespaceSpec {
        name: "AWS/SQS",
        metrics: &[
            "ApproximateAgeOfOldestMessage",
            "ApproximateNumberOfMessagesDelayed",
            "ApproximateNumberOfMessagesNotVisible",
            "ApproximateNumberOfMessagesVisible",
            "NumberOfEmptyReceives",
            "NumberOfMessagesDeleted",
            "NumberOfMessagesReceived",
            "NumberOfMessagesSent",
            "SentMessageSize",
        ],
        dimension_keys: &["QueueName"],
    },
    NamespaceSpec {
        name: "AWS/States",
        metrics: &[
            "ExecutionThrottled",
            "ExecutionTime",
            "ExecutionsAborted",
            "ExecutionsFailed",
            "ExecutionsStarted",
            "ExecutionsSucceeded",
            "ExecutionsTimedOut",
        ],
        dimension_keys: &["ActivityArn", "LambdaFunctionArn", "StateMachineArn"],
    },
    NamespaceSpec {
        name: "CWAgent",
        metrics: &[
            "cpu_usage_idle",
            "cpu_usage_iowait",
            "cpu_usage_system",
            "cpu_usage_user",
            "disk_free",
            "disk_used_percent",
            "mem_available_percent",
            "mem_used_percent",
            "swap_used_percent",
        ],
        dimension_keys: &["InstanceId", "device", "fstype", "path"],
    },
];

static NAMESPACE_INDEX: Lazy<BTreeMap<&'static str, &'static NamespaceSpec>> =
    Lazy::new(|| NAMESPACES.iter().map(|spec| (spec.name, spec)).collect());

/// Look up a built-in namespace
pub fn namespace(name: &str) -> Option<&'static NamespaceSpec> {
    NAMESPACE_INDEX.get(name).copied()
}

pub fn is_known_namespace(name: &str) -> bool {
    NAMESPACE_INDEX.contains_key(name)
}

/// Built-in namespace names in sorted order
pub fn namespace_names() -> impl Iterator<Item = &'static str> {
    NAMESPACE_INDEX.keys().copied()
}

/// Known metric names for a built-in namespace
pub fn namespace_metrics(name: &str) -> Option<&'static [&'static str]> {
    namespace(name).map(|spec| spec.metrics)
}

/// Known dimension keys for a built-in namespace
pub fn namespace_dimension_keys(name: &str) -> Option<&'static [&'static str]> {
    namespace(name).map(|spec| spec.dimension_keys)
}
