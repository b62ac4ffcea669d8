//! MAYDAY Server
//!
//! Runs the gRPC alert service and the HTTP gateway in a single process.
//! The gateway talks to the gRPC side over a real channel, so it behaves the
//! same whether the alert service is in-process or remote.

use std::future::IntoFuture;
use std::sync::Arc;

use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use mayday_advice::{AdvisoryProvider, GeminiAdvisoryProvider};
use mayday_api::error::{ApiError, ApiResult};
use mayday_api::grpc::create_service;
use mayday_api::routes::{create_gateway_router, GatewayState};
use mayday_api::{seed_demo_alerts, AdviceConfig, GatewayConfig, GrpcBridge, RpcConfig};
use mayday_store::{AlertStore, InMemoryAlertStore};

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rpc_config = RpcConfig::from_env();
    let gateway_config = GatewayConfig::from_env();
    let advice_config = AdviceConfig::from_env();

    let store: Arc<dyn AlertStore> = Arc::new(InMemoryAlertStore::new());
    if gateway_config.seed_demo {
        seed_demo_alerts(store.as_ref()).map_err(ApiError::from)?;
    }

    let grpc_addr = rpc_config.addr();
    let grpc_listener = tokio::net::TcpListener::bind(&grpc_addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", grpc_addr, e)))?;
    tracing::info!(addr = %grpc_addr, "gRPC alert service listening");
    let grpc_server = Server::builder()
        .add_service(create_service(store.clone()))
        .serve_with_incoming(TcpListenerStream::new(grpc_listener));

    let bridge = GrpcBridge::connect_lazy(
        &gateway_config.grpc_endpoint,
        gateway_config.batch_deadline,
        gateway_config.chat_deadline,
    )?;

    let advice: Option<Arc<dyn AdvisoryProvider>> = match advice_config.api_key.clone() {
        Some(key) => Some(Arc::new(GeminiAdvisoryProvider::new(
            key,
            advice_config.model.clone(),
            advice_config.timeout,
        ))),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, chat replies will carry the fallback advisory");
            None
        }
    };

    let router = create_gateway_router(GatewayState::new(bridge, advice), &gateway_config);

    let http_addr = gateway_config.addr();
    let http_listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", http_addr, e)))?;
    tracing::info!(addr = %http_addr, "HTTP gateway listening");
    let http_server = axum::serve(http_listener, router).into_future();

    tokio::select! {
        result = grpc_server => {
            result.map_err(|e| ApiError::internal_error(format!("gRPC server failed: {}", e)))?;
        }
        result = http_server => {
            result.map_err(|e| ApiError::internal_error(format!("HTTP gateway failed: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
