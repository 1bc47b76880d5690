//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health and fallback handlers
//! - Install the redirect gate in front of every route
//! - Wire up middleware (tracing, timeout, request ID, panic containment)
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::lifecycle::Shutdown;
use crate::redirect::{redirect_middleware, RedirectGate, RuleSetError};

/// HTTP server hosting the redirect gate.
pub struct HttpServer {
    router: Router,
    gate: RedirectGate,
}

impl HttpServer {
    /// Compile the redirect rules and build the router.
    ///
    /// Fails before anything is bound if a rule pattern is invalid.
    pub fn try_new(config: GateConfig) -> Result<Self, RuleSetError> {
        let gate = RedirectGate::new(config.redirect.to_options())?;

        tracing::info!(
            rules = gate.rules().len(),
            default_status = gate.rules().default_status().as_u16(),
            filter = gate.has_filter(),
            "Redirect rules compiled"
        );

        let router = Self::build_router(&config, gate.clone());
        Ok(Self { router, gate })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, gate: RedirectGate) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .layer(middleware::from_fn_with_state(gate, redirect_middleware))
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = self.gate.rules().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(Shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "ok\n"
}

/// Response for paths no redirect rule and no route claimed.
async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
