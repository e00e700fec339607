//! AWS SDK error categorization for status mapping.
//!
//! The facade modules flatten SDK failures into `anyhow::Error` values whose text starts
//! with the AWS error code (see [`describe_sdk_error`]). This module reads that text back
//! and sorts it into transient failures (throttling, timeouts, network, service
//! unavailable) and non-retryable ones (permissions, validation), which the dispatch
//! surface turns into HTTP status codes.
//!
//! The SDK already retries transient errors with backoff; nothing here retries again.

use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use std::time::Duration;

/// Categorized error types for AWS SDK errors
#[derive(Debug, Clone)]
pub enum ErrorCategory {
    /// Request was throttled due to rate limiting
    Throttled {
        service: String,
        error_code: String,
        /// Hint from Retry-After header if available
        retry_after: Option<Duration>,
    },
    /// Request timed out
    Timeout {
        operation: String,
        duration: Option<Duration>,
    },
    /// Network connectivity issues
    NetworkError { message: String },
    /// AWS service temporarily unavailable
    ServiceUnavailable { service: String, message: String },
    /// Non-retryable error (permissions, validation, etc.)
    NonRetryable {
        code: String,
        message: String,
        is_permission_error: bool,
    },
}

impl ErrorCategory {
    /// Returns true if this error category is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Throttled { .. }
                | ErrorCategory::Timeout { .. }
                | ErrorCategory::NetworkError { .. }
                | ErrorCategory::ServiceUnavailable { .. }
        )
    }

    /// True when AWS rejected the request itself (bad filter, unknown instance ID)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ErrorCategory::NonRetryable {
                is_permission_error: false,
                ..
            }
        )
    }

    /// Short label for log lines and error bodies
    pub fn short_label(&self) -> &'static str {
        match self {
            ErrorCategory::Throttled { .. } => "throttled",
            ErrorCategory::Timeout { .. } => "timeout",
            ErrorCategory::NetworkError { .. } => "network",
            ErrorCategory::ServiceUnavailable { .. } => "unavailable",
            ErrorCategory::NonRetryable {
                is_permission_error: true,
                ..
            } => "access denied",
            ErrorCategory::NonRetryable { .. } => "error",
        }
    }
}

/// Render an SDK error as `Code: message`, falling back to the full error chain
///
/// Putting the code first keeps [`categorize_error`] accurate once the error has been
/// wrapped in `anyhow`.
pub fn describe_sdk_error<E>(error: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (error.code(), error.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(error).to_string(),
    }
}

/// Analyze an error and categorize it
///
/// This function examines error messages from anyhow::Error (which wraps SDK errors)
/// and categorizes them based on known AWS error patterns.
pub fn categorize_error(error: &anyhow::Error, service: &str, operation: &str) -> ErrorCategory {
    let error_str = format!("{:#}", error);
    categorize_error_string(&error_str, service, operation)
}

/// Categorize an error based on its string representation
///
/// The AWS error code decides when one is present. Message text is only matched for
/// errors without a code, such as dispatch failures.
pub fn categorize_error_string(error_str: &str, service: &str, operation: &str) -> ErrorCategory {
    match extract_error_code(error_str) {
        Some(code) => categorize_error_code(code, error_str, service, operation),
        None => categorize_error_text(error_str, service, operation),
    }
}

fn categorize_error_code(
    code: String,
    error_str: &str,
    service: &str,
    operation: &str,
) -> ErrorCategory {
    if is_throttling_code(&code) {
        return ErrorCategory::Throttled {
            service: service.to_string(),
            error_code: code,
            retry_after: None, // SDK doesn't expose Retry-After easily
        };
    }

    match code.as_str() {
        "TimeoutError" | "RequestTimeout" | "RequestTimeoutException" => ErrorCategory::Timeout {
            operation: operation.to_string(),
            duration: None,
        },
        "ServiceUnavailable"
        | "ServiceUnavailableException"
        | "Unavailable"
        | "InternalServerError"
        | "InternalServerException"
        | "InternalServiceFault"
        | "InternalError"
        | "InternalFailure" => ErrorCategory::ServiceUnavailable {
            service: service.to_string(),
            message: truncate_message(error_str, 100),
        },
        _ => {
            let is_permission_error = is_permission_code(&code);
            ErrorCategory::NonRetryable {
                code,
                message: truncate_message(error_str, 200),
                is_permission_error,
            }
        }
    }
}

fn is_throttling_code(code: &str) -> bool {
    code.contains("Throttl")
        || matches!(
            code,
            "TooManyRequestsException"
                | "RequestLimitExceeded"
                | "LimitExceededException"
                | "RateExceeded"
                | "SlowDown"
        )
}

fn is_permission_code(code: &str) -> bool {
    code.starts_with("AccessDenied")
        || code.starts_with("ExpiredToken")
        || code.starts_with("UnauthorizedOperation")
        || matches!(
            code,
            "UnauthorizedAccess"
                | "UnrecognizedClientException"
                | "AuthFailure"
                | "InvalidClientTokenId"
                | "SignatureDoesNotMatch"
                | "OptInRequired"
                | "CredentialsNotLoaded"
        )
}

fn categorize_error_text(error_str: &str, service: &str, operation: &str) -> ErrorCategory {
    if error_str.contains("Throttling")
        || error_str.contains("Rate exceeded")
        || error_str.contains("RequestLimitExceeded")
    {
        return ErrorCategory::Throttled {
            service: service.to_string(),
            error_code: "Throttling".to_string(),
            retry_after: None,
        };
    }

    // Timeout errors
    if error_str.contains("TimeoutError")
        || error_str.contains("timeout")
        || error_str.contains("timed out")
        || error_str.contains("deadline exceeded")
    {
        return ErrorCategory::Timeout {
            operation: operation.to_string(),
            duration: None,
        };
    }

    // Network/dispatch errors
    if error_str.contains("DispatchFailure")
        || error_str.contains("dispatch failure")
        || error_str.contains("connection")
        || error_str.contains("Connection")
        || error_str.contains("network")
        || error_str.contains("Network")
        || error_str.contains("DNS")
        || error_str.contains("socket")
    {
        return ErrorCategory::NetworkError {
            message: truncate_message(error_str, 100),
        };
    }

    if error_str.contains("Service Unavailable") || error_str.contains("service unavailable") {
        return ErrorCategory::ServiceUnavailable {
            service: service.to_string(),
            message: truncate_message(error_str, 100),
        };
    }

    // Credential resolution failures carry no AWS code
    let is_permission_error =
        error_str.contains("credentials") || error_str.contains("CredentialsNotLoaded");

    ErrorCategory::NonRetryable {
        code: if is_permission_error {
            "AccessDenied".to_string()
        } else {
            "Error".to_string()
        },
        message: truncate_message(error_str, 200),
        is_permission_error,
    }
}

/// Extract AWS error code from error message if present
fn extract_error_code(error_str: &str) -> Option<String> {
    // Common patterns:
    // "ThrottlingException: Rate exceeded"
    // "ListMetrics page failed: InvalidParameterValue: ..."
    // Error { code: "ValidationException", ...}

    // Pattern 1: ErrorName: message, possibly after a context prefix
    for segment in error_str.split(": ") {
        let candidate = segment.trim();
        if candidate.is_empty() || candidate.len() >= 50 || candidate.contains(' ') {
            continue;
        }
        if candidate.ends_with("Exception")
            || candidate.ends_with("Error")
            || candidate.ends_with("Fault")
            || candidate.chars().next().is_some_and(|c| c.is_uppercase())
        {
            let code = candidate.rsplit("::").next().unwrap_or(candidate);
            if !code.is_empty() {
                return Some(code.to_string());
            }
        }
    }

    // Pattern 2: code: "ErrorName" in debug output
    if let Some(start) = error_str.find("code:") {
        let after_code = &error_str[start + 5..];
        if let Some(quote_start) = after_code.find('"') {
            let after_quote = &after_code[quote_start + 1..];
            if let Some(quote_end) = after_quote.find('"') {
                let code = &after_quote[..quote_end];
                if !code.is_empty() && code.len() < 50 {
                    return Some(code.to_string());
                }
            }
        }
    }

    None
}

/// Truncate a message to max length (in characters), adding ellipsis if truncated
fn truncate_message(msg: &str, max_len: usize) -> String {
    if msg.chars().count() <= max_len {
        msg.to_string()
    } else {
        let kept: String = msg.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
