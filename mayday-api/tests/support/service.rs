//! Shared helpers for integration tests: an in-process gRPC alert service on
//! an ephemeral port, a bridge wired to it, and response body extraction.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};

use mayday_api::bridge::GrpcBridge;
use mayday_api::grpc::create_service;
use mayday_api::grpc::proto::alert_service_client::AlertServiceClient;
use mayday_store::{AlertStore, InMemoryAlertStore};

/// Start the alert service on a fresh store and connect a client to it.
pub async fn spawn_alert_service() -> (Arc<dyn AlertStore>, AlertServiceClient<Channel>) {
    let store: Arc<dyn AlertStore> = Arc::new(InMemoryAlertStore::new());
    let client = spawn_alert_service_with(store.clone()).await;
    (store, client)
}

/// Start the alert service over the given store and connect a client to it.
pub async fn spawn_alert_service_with(store: Arc<dyn AlertStore>) -> AlertServiceClient<Channel> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(
        Server::builder()
            .add_service(create_service(store))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );

    connect_client(addr).await
}

async fn connect_client(addr: std::net::SocketAddr) -> AlertServiceClient<Channel> {
    let endpoint = format!("http://{}", addr);
    for _ in 0..50 {
        if let Ok(client) = AlertServiceClient::connect(endpoint.clone()).await {
            return client;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("gRPC test server at {} never came up", endpoint);
}

/// Start the alert service and wrap its client in a bridge with the
/// production deadlines.
pub async fn spawn_bridge() -> (Arc<dyn AlertStore>, GrpcBridge) {
    let (store, client) = spawn_alert_service().await;
    let bridge = GrpcBridge::from_client(client, Duration::from_secs(10), Duration::from_secs(5));
    (store, bridge)
}

/// Deserialize a handler response body.
pub async fn extract_json<T: serde::de::DeserializeOwned>(
    response: impl axum::response::IntoResponse,
) -> T {
    let response = response.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response JSON")
}
