//! HTTP Gateway Routes
//!
//! Synchronous REST surface for browser clients that cannot speak gRPC.
//! Every route goes through [`GrpcBridge`], so the gateway holds no alert
//! state of its own.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
#[cfg(feature = "openapi")]
use axum::response::IntoResponse;
#[cfg(feature = "openapi")]
use axum::routing::get;
#[cfg(feature = "openapi")]
use axum::Json;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mayday_advice::AdvisoryProvider;

use crate::bridge::GrpcBridge;
use crate::config::GatewayConfig;

pub mod alert;
pub mod chat;
pub mod health;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct GatewayState {
    pub bridge: GrpcBridge,
    /// Advisory provider for chat; `None` means canned fallback advice.
    pub advice: Option<Arc<dyn AdvisoryProvider>>,
}

impl GatewayState {
    pub fn new(bridge: GrpcBridge, advice: Option<Arc<dyn AdvisoryProvider>>) -> Self {
        Self { bridge, advice }
    }
}

#[cfg(feature = "openapi")]
async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}

/// Assemble the full gateway router with tracing and CORS applied.
pub fn create_gateway_router(state: GatewayState, config: &GatewayConfig) -> Router {
    let router = Router::new()
        .nest("/api/alerts", alert::create_router())
        .nest("/api/chat", chat::create_router())
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    let router = router.route("/openapi.json", get(openapi_json));

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_origins))
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        tracing::info!("CORS: development mode, allowing all origins");
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
