//! Error taxonomy for resource resolution
//!
//! Handlers return the first error they hit; there is no partial-success shape.

use super::sdk_errors::{categorize_error, ErrorCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// Query parameters could not be turned into a typed request
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A backing AWS inventory call failed
    #[error("{service} {operation} failed ({}): {source:#}", .category.short_label())]
    Provider {
        service: &'static str,
        operation: &'static str,
        category: ErrorCategory,
        #[source]
        source: anyhow::Error,
    },

    /// The normalized suggestions could not be serialized
    #[error("unable to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ResourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ResourceError::MalformedRequest(message.into())
    }

    /// Wrap a facade failure, classifying it from the SDK error text
    pub fn provider(service: &'static str, operation: &'static str, source: anyhow::Error) -> Self {
        let category = categorize_error(&source, service, operation);
        ResourceError::Provider {
            service,
            operation,
            category,
            source,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ResourceError::MalformedRequest(_))
    }

    pub fn category(&self) -> Option<&ErrorCategory> {
        match self {
            ResourceError::Provider { category, .. } => Some(category),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_is_categorized() {
        let err = ResourceError::provider(
            "CloudWatch",
            "ListMetrics",
            anyhow::anyhow!("ThrottlingException: Rate exceeded"),
        );
        assert!(matches!(
            err.category(),
            Some(ErrorCategory::Throttled { .. })
        ));
        let message = err.to_string();
        assert!(message.starts_with("CloudWatch ListMetrics failed (throttled)"));
        assert!(message.contains("Rate exceeded"));
    }

    #[test]
    fn test_malformed_message() {
        let err = ResourceError::malformed("region is required");
        assert!(err.is_malformed());
        assert_eq!(err.to_string(), "malformed request: region is required");
        assert!(err.category().is_none());
    }
}
