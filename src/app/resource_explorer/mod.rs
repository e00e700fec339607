//! Resource-metadata suggestions for CloudWatch query editors.
//!
//! A request flows through [`request`] (parse and classify), one of the [`handlers`]
//! (query the [`aws_services`] facade and flatten), and [`normalizers`] (uniform
//! suggestion triples). [`resolve`] is the embeddable entry point; the HTTP surface in
//! `api_server` is a thin wrapper over it.

pub mod aws_services;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod normalizers;
pub mod request;
pub mod sdk_errors;
pub mod session;

pub use aws_services::{InMemoryProvider, ProviderClients};
pub use error::ResourceError;
pub use handlers::{resolve, ResourceKind};
pub use normalizers::Suggestion;
pub use request::{
    DimensionFilter, DimensionKeysRequest, DimensionKeysRequestType, DimensionValuesRequest,
    QueryParams, ResourceRequest,
};
pub use session::AwsSession;

use crate::app::config::DataSourceSettings;
use std::sync::Arc;

/// Per-datasource state every handler call receives
#[derive(Debug, Clone)]
pub struct ResourceContext {
    pub settings: Arc<DataSourceSettings>,
    pub clients: ProviderClients,
}

impl ResourceContext {
    pub fn new(settings: DataSourceSettings, clients: ProviderClients) -> Self {
        Self {
            settings: Arc::new(settings),
            clients,
        }
    }

    /// Production wiring: SDK clients built from the same settings
    pub fn aws(settings: DataSourceSettings) -> Self {
        let settings = Arc::new(settings);
        let clients = ProviderClients::aws(AwsSession::new(settings.clone()));
        Self { settings, clients }
    }

    /// Map the `default` alias to the configured default region
    pub fn resolve_region<'a>(&'a self, region: &'a str) -> &'a str {
        if region == constants::DEFAULT_REGION_ALIAS {
            &self.settings.default_region
        } else {
            region
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_region_alias() {
        let settings = DataSourceSettings {
            default_region: "eu-central-1".to_string(),
            ..Default::default()
        };
        let ctx = ResourceContext::new(
            settings,
            ProviderClients::from_shared(Arc::new(InMemoryProvider::new())),
        );
        assert_eq!(ctx.resolve_region("default"), "eu-central-1");
        assert_eq!(ctx.resolve_region("us-west-2"), "us-west-2");
    }
}
