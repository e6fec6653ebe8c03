//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::forwarder::{Forwarder, TargetRegistry};
use crate::http::handlers::{forward_by_key, forward_by_target, list_targets};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TargetRegistry>,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new HTTP server around a registry and forwarder.
    pub fn new(config: &GatewayConfig, registry: TargetRegistry, forwarder: Forwarder) -> Self {
        let state = AppState {
            registry: Arc::new(registry),
            forwarder: Arc::new(forwarder),
        };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(list_targets))
            .route("/api", get(forward_by_key))
            .route("/test", get(forward_by_target))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        if config.cors.enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn server(cors: bool) -> GatewayServer {
        let mut config = GatewayConfig::default();
        config.cors.enabled = cors;
        let forwarder = Forwarder::from_config(&config, &Credentials::default()).unwrap();
        GatewayServer::new(&config, TargetRegistry::default(), forwarder)
    }

    async fn status_of(router: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        router.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_routes() {
        let router = server(true).router();
        assert_eq!(status_of(router.clone(), "/").await, StatusCode::OK);
        assert_eq!(status_of(router.clone(), "/api").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of(router.clone(), "/api?get=x").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(router.clone(), "/test?url=http://x.test").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(router, "/other").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let request = Request::builder()
            .uri("/")
            .header("origin", "https://x.test")
            .body(Body::empty())
            .unwrap();
        let response = server(false).router().oneshot(request).await.unwrap();
        assert!(!response.headers().contains_key("access-control-allow-origin"));
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }
}
