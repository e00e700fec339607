//! cwsuggest - CloudWatch resource suggestions for query editors
//!
//! Answers the autocomplete lookups a CloudWatch query editor needs (regions,
//! namespaces, metrics, dimension keys and values, EC2 instance attributes, EBS volume
//! IDs, tagged-resource ARNs, log groups) as uniform `{text, value, label}` suggestions.
//!
//! # Architecture Overview
//!
//! - **Request parsing** ([`app::resource_explorer::request`]): query parameters into typed,
//!   classified requests
//! - **Provider facade** ([`app::resource_explorer::aws_services`]): async traits over
//!   CloudWatch, EC2, Resource Groups Tagging and CloudWatch Logs, with an in-memory double
//! - **Handlers** ([`app::resource_explorer::handlers`]): one flattening algorithm per
//!   lookup, reachable through [`app::resource_explorer::resolve`]
//! - **HTTP surface** ([`app::api_server`]): axum router mapping failures to status codes
#![warn(clippy::all, rust_2018_idioms)]

#[macro_use]
pub mod logging_macros;

pub mod app;
