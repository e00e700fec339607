#![warn(clippy::all, rust_2018_idioms)]

/// Unified logging macros with file, module and line context
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
        tracing::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
        tracing::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/// Tracing-only variant, for per-call detail that should not reach the `log` facade
#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/*
Logging conventions for the resolver:

- log_* macros write to both `log` and `tracing`; trace_* macros write to tracing only.
- Every line is prefixed with [file:module:line].

Example output:
  [src/app/api_server.rs:cwsuggest::app::api_server:118] metrics resolved 12 suggestions

Levels:

TRACE: individual items inside a flattening loop, raw filter payloads
DEBUG: call state transitions (parsed, dispatched, normalized), SDK config construction,
       page counts from provider calls
INFO:  server start/stop, configuration summary
WARN:  client errors returned to callers (400), dropped filters
ERROR: provider failures mapped to 5xx, response encoding failures
*/
