//! Stream-to-Synchronous Bridging
//!
//! The gateway cannot hold an HTTP caller open for the lifetime of a gRPC
//! stream, so each stream-backed endpoint drives its call on a spawned task
//! and funnels the single outcome through a oneshot slot which the handler
//! awaits under a deadline. Deadline expiry fails only the HTTP response:
//! the spawned task keeps running and writes that already landed stay.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::{Channel, Endpoint};

use crate::error::{ApiError, ApiResult};
use crate::grpc::proto;
use crate::grpc::proto::alert_service_client::AlertServiceClient;

/// gRPC client wrapper shared by the gateway routes.
#[derive(Debug, Clone)]
pub struct GrpcBridge {
    client: AlertServiceClient<Channel>,
    batch_deadline: Duration,
    chat_deadline: Duration,
}

impl GrpcBridge {
    /// Dial the alert service lazily; the channel connects on first use.
    pub fn connect_lazy(
        endpoint_url: &str,
        batch_deadline: Duration,
        chat_deadline: Duration,
    ) -> ApiResult<Self> {
        let endpoint = Endpoint::from_shared(endpoint_url.to_string()).map_err(|e| {
            ApiError::invalid_input(format!("Invalid gRPC endpoint {}: {}", endpoint_url, e))
        })?;
        Ok(Self {
            client: AlertServiceClient::new(endpoint.connect_lazy()),
            batch_deadline,
            chat_deadline,
        })
    }

    /// Wrap an already-connected client. Tests use this with an in-process
    /// server on an ephemeral port.
    pub fn from_client(
        client: AlertServiceClient<Channel>,
        batch_deadline: Duration,
        chat_deadline: Duration,
    ) -> Self {
        Self {
            client,
            batch_deadline,
            chat_deadline,
        }
    }

    /// Unary create.
    pub async fn create_alert(
        &self,
        request: proto::CreateAlertRequest,
    ) -> ApiResult<proto::AlertRecord> {
        let mut client = self.client.clone();
        let response = client.create_alert(request).await?;
        Ok(response.into_inner())
    }

    /// Unary get by id.
    pub async fn get_alert(&self, alert_id: String) -> ApiResult<proto::AlertRecord> {
        let mut client = self.client.clone();
        let response = client.get_alert(proto::GetAlertRequest { alert_id }).await?;
        Ok(response.into_inner())
    }

    /// Unary status update.
    pub async fn update_alert_status(
        &self,
        alert_id: String,
        new_status: String,
    ) -> ApiResult<proto::AlertRecord> {
        let mut client = self.client.clone();
        let response = client
            .update_alert_status(proto::UpdateAlertStatusRequest {
                alert_id,
                new_status,
            })
            .await?;
        Ok(response.into_inner())
    }

    /// Drain the server stream into a Vec, preserving emission order.
    pub async fn list_alerts(&self, kind_filter: String) -> ApiResult<Vec<proto::AlertRecord>> {
        let mut client = self.client.clone();
        let response = client
            .list_alerts(proto::ListAlertsRequest { kind_filter })
            .await?;
        let mut stream = response.into_inner();

        let mut alerts = Vec::new();
        while let Some(record) = stream.message().await? {
            alerts.push(record);
        }
        Ok(alerts)
    }

    /// Push every item on one client-streaming call, then wait for the
    /// summary under the batch deadline.
    pub async fn batch_create_alerts(
        &self,
        items: Vec<proto::CreateAlertRequest>,
    ) -> ApiResult<proto::BatchSummary> {
        let mut client = self.client.clone();
        let (done_tx, done_rx) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = client.batch_create_alerts(tokio_stream::iter(items)).await;
            let _ = done_tx.send(outcome);
        });

        match tokio::time::timeout(self.batch_deadline, done_rx).await {
            Ok(Ok(outcome)) => Ok(outcome?.into_inner()),
            Ok(Err(_)) => Err(ApiError::transport_failure(
                "Batch call ended without a summary",
            )),
            // The spawned call keeps running; alerts it persisted stay.
            Err(_) => Err(ApiError::timeout("batch create")),
        }
    }

    /// Send one chat message on a bidirectional call and wait for the first
    /// reply under the chat deadline.
    pub async fn chat_once(&self, message: proto::ChatMessage) -> ApiResult<proto::ChatMessage> {
        let mut client = self.client.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        tokio::spawn(async move {
            // Buffer the single message up front; dropping the sender ends
            // the outbound stream once it is consumed.
            let (msg_tx, msg_rx) = mpsc::channel(1);
            let _ = msg_tx.send(message).await;
            drop(msg_tx);

            let outcome = async {
                let response = client.live_chat(ReceiverStream::new(msg_rx)).await?;
                let mut inbound = response.into_inner();
                match inbound.message().await? {
                    Some(reply) => Ok(reply),
                    None => Err(tonic::Status::aborted(
                        "Chat stream closed before a reply arrived",
                    )),
                }
            }
            .await;
            let _ = reply_tx.send(outcome);
        });

        match tokio::time::timeout(self.chat_deadline, reply_rx).await {
            Ok(Ok(outcome)) => Ok(outcome?),
            Ok(Err(_)) => Err(ApiError::transport_failure(
                "Chat call ended without a reply",
            )),
            Err(_) => Err(ApiError::timeout("live chat")),
        }
    }
}
