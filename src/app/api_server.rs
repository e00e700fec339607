//! HTTP surface for resource suggestions
//!
//! Each lookup is `GET /<kind>?<params>` and answers with a JSON array of
//! `{text, value, label}` objects.
//!
//! ```text
//! Query editor                 cwsuggest
//! ┌──────────────┐            ┌──────────────────────────┐
//! │ picker       │  HTTP GET  │ route /:resource         │
//! │ autocomplete ├───────────►│ parse params             │
//! └──────────────┘            │ resolve(kind, ctx)       │
//!                             │ encode suggestions       │
//!                             └──────────────────────────┘
//! ```
//!
//! Status codes:
//!
//! - 200 with the suggestions on success
//! - 400 for malformed requests and requests AWS rejected as invalid
//! - 429 when AWS throttled the lookup
//! - 500 for permission, timeout, network and availability failures
//! - 404 for unknown lookups

#![warn(clippy::all, rust_2018_idioms)]

use crate::app::resource_explorer::sdk_errors::ErrorCategory;
use crate::app::resource_explorer::{
    resolve, QueryParams, ResourceContext, ResourceError, ResourceKind,
};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Running suggestion server
pub struct ApiServer {
    /// Address the server is listening on
    addr: SocketAddr,
    /// Server shutdown handle
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    /// Bind `listen_addr` and serve the router on a background task
    pub async fn start(ctx: ResourceContext, listen_addr: &str) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind(listen_addr).await?;
        let addr = listener.local_addr()?;

        info!("Suggestion server listening on http://{}", addr);

        let app = router(ctx);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = result {
                error!("Suggestion server failed: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("Suggestion server shutdown initiated");
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Suggestion server task ended abnormally: {}", e);
            }
        }
    }
}

/// Suggestion router: `GET /<kind>` for every [`ResourceKind`]
pub fn router(ctx: ResourceContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/:resource", get(handle_resource_request))
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn handle_resource_request(
    State(ctx): State<ResourceContext>,
    Path(resource): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(kind) = ResourceKind::from_path(&resource) else {
        warn!("Unknown resource lookup: {}", resource);
        return (StatusCode::NOT_FOUND, format!("unknown resource: {}", resource)).into_response();
    };

    let params = QueryParams::from_query_string(query.as_deref().unwrap_or_default());
    tracing::debug!("Received {} lookup", kind);

    let outcome = resolve(kind, &ctx, &params)
        .await
        .and_then(|suggestions| serde_json::to_vec(&suggestions).map_err(ResourceError::from));

    match outcome {
        Ok(body) => {
            tracing::debug!("Writing {} lookup response ({} bytes)", kind, body.len());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!("{} lookup failed: {}", kind, e);
            } else {
                warn!("{} lookup rejected: {}", kind, e);
            }
            (status, e.to_string()).into_response()
        }
    }
}

/// HTTP status for a failed lookup
pub fn status_for(error: &ResourceError) -> StatusCode {
    match error {
        ResourceError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        ResourceError::Provider { category, .. } => match category {
            ErrorCategory::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            c if c.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ResourceError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
