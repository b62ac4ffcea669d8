//! gRPC Service Implementation
//!
//! This module implements the AlertService defined in proto/mayday.proto:
//! three unary calls, a server-streamed listing, a client-streamed batch
//! intake, and a bidirectional chat loop. All handlers share one AlertStore
//! behind an Arc; chat persists nothing.

use std::pin::Pin;
use std::sync::Arc;

use chrono::Utc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tonic::{Request, Response, Status, Streaming};

use mayday_core::{
    batch_summary_message, chat_reply_text, Alert, AlertStatus, NewAlert, OPERATOR_SENDER_ID,
};
use mayday_store::AlertStore;

use crate::error::ApiError;

// Include the generated protobuf code
pub mod proto {
    tonic::include_proto!("mayday");
}

// Use proto types - domain types are referenced via mayday_core throughout
use proto::*;

// ============================================================================
// CONVERSION HELPERS
// ============================================================================

/// Convert ApiError to tonic Status
impl From<ApiError> for Status {
    fn from(err: ApiError) -> Self {
        match err.code {
            crate::error::ErrorCode::InvalidInput => Status::invalid_argument(err.message),
            crate::error::ErrorCode::AlertNotFound => Status::not_found(err.message),
            crate::error::ErrorCode::Timeout => Status::deadline_exceeded(err.message),
            crate::error::ErrorCode::TransportFailure => Status::aborted(err.message),
            crate::error::ErrorCode::UpstreamUnavailable => Status::unavailable(err.message),
            crate::error::ErrorCode::InternalError => Status::internal(err.message),
        }
    }
}

fn timestamp_to_millis(ts: &mayday_core::Timestamp) -> i64 {
    ts.timestamp_millis()
}

fn parse_alert_id(value: &str) -> Result<mayday_core::AlertId, Status> {
    value
        .parse()
        .map_err(|_| Status::invalid_argument("Invalid alert_id"))
}

fn alert_to_proto(alert: &Alert) -> AlertRecord {
    AlertRecord {
        alert_id: alert.alert_id.to_string(),
        kind: alert.kind.clone(),
        latitude: alert.latitude,
        longitude: alert.longitude,
        narrative: alert.narrative.clone(),
        reporter_id: alert.reporter_id.clone(),
        status: alert.status.to_string(),
        received_at: timestamp_to_millis(&alert.received_at),
    }
}

fn new_alert_from_proto(req: CreateAlertRequest) -> NewAlert {
    NewAlert {
        kind: req.kind,
        latitude: req.latitude,
        longitude: req.longitude,
        narrative: req.narrative,
        reporter_id: req.reporter_id,
    }
}

// ============================================================================
// ALERT SERVICE IMPLEMENTATION
// ============================================================================

/// Buffer size for the per-call outbound stream channels.
const STREAM_BUFFER: usize = 16;

pub struct AlertServiceImpl {
    store: Arc<dyn AlertStore>,
}

impl AlertServiceImpl {
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl alert_service_server::AlertService for AlertServiceImpl {
    async fn create_alert(
        &self,
        request: Request<CreateAlertRequest>,
    ) -> Result<Response<AlertRecord>, Status> {
        let new_alert = new_alert_from_proto(request.into_inner());
        new_alert
            .validate()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        let alert = self.store.create(new_alert).map_err(ApiError::from)?;
        tracing::info!(alert_id = %alert.alert_id, kind = %alert.kind, "alert created");

        Ok(Response::new(alert_to_proto(&alert)))
    }

    async fn get_alert(
        &self,
        request: Request<GetAlertRequest>,
    ) -> Result<Response<AlertRecord>, Status> {
        let req = request.into_inner();
        let id = parse_alert_id(&req.alert_id)?;

        let alert = self
            .store
            .get(id)
            .map_err(ApiError::from)?
            .ok_or_else(|| Status::not_found("Alert not found"))?;

        Ok(Response::new(alert_to_proto(&alert)))
    }

    async fn update_alert_status(
        &self,
        request: Request<UpdateAlertStatusRequest>,
    ) -> Result<Response<AlertRecord>, Status> {
        let req = request.into_inner();
        let id = parse_alert_id(&req.alert_id)?;
        let status = req
            .new_status
            .parse::<AlertStatus>()
            .map_err(Status::invalid_argument)?;

        let alert = self
            .store
            .update_status(id, status)
            .map_err(ApiError::from)?;
        tracing::info!(alert_id = %alert.alert_id, status = %alert.status, "alert status updated");

        Ok(Response::new(alert_to_proto(&alert)))
    }

    type ListAlertsStream = Pin<Box<dyn Stream<Item = Result<AlertRecord, Status>> + Send>>;

    async fn list_alerts(
        &self,
        request: Request<ListAlertsRequest>,
    ) -> Result<Response<Self::ListAlertsStream>, Status> {
        let req = request.into_inner();

        // One store pass before the first item goes out: a store failure
        // fails the whole call, never a half-emitted stream.
        let alerts = if req.kind_filter.is_empty() {
            self.store.list_all()
        } else {
            self.store.list_by_kind(&req.kind_filter)
        }
        .map_err(ApiError::from)?;
        tracing::debug!(count = alerts.len(), filter = %req.kind_filter, "listing alerts");

        let (tx, rx) = tokio::sync::mpsc::channel(STREAM_BUFFER);
        tokio::spawn(async move {
            for alert in alerts {
                if tx.send(Ok(alert_to_proto(&alert))).await.is_err() {
                    // Receiver dropped, client went away
                    break;
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    async fn batch_create_alerts(
        &self,
        request: Request<Streaming<CreateAlertRequest>>,
    ) -> Result<Response<BatchSummary>, Status> {
        let mut stream = request.into_inner();
        let mut accepted: i32 = 0;

        // Each item is persisted as it arrives; an inbound transport error
        // aborts the call without a summary, but writes that landed stay.
        while let Some(item) = stream.message().await? {
            let new_alert = new_alert_from_proto(item);
            if let Err(e) = new_alert.validate() {
                tracing::warn!(error = %e, "skipping invalid batch item");
                continue;
            }
            let alert = self.store.create(new_alert).map_err(ApiError::from)?;
            accepted += 1;
            tracing::debug!(alert_id = %alert.alert_id, accepted, "batch item persisted");
        }

        tracing::info!(accepted, "batch complete");
        Ok(Response::new(BatchSummary {
            alert_count: accepted,
            status_message: batch_summary_message(accepted),
        }))
    }

    type LiveChatStream = Pin<Box<dyn Stream<Item = Result<ChatMessage, Status>> + Send>>;

    async fn live_chat(
        &self,
        request: Request<Streaming<ChatMessage>>,
    ) -> Result<Response<Self::LiveChatStream>, Status> {
        let mut inbound = request.into_inner();
        let (tx, rx) = tokio::sync::mpsc::channel(STREAM_BUFFER);

        tokio::spawn(async move {
            loop {
                match inbound.message().await {
                    Ok(Some(message)) => {
                        tracing::debug!(sender_id = %message.sender_id, "chat message received");
                        let reply = ChatMessage {
                            sender_id: OPERATOR_SENDER_ID.to_string(),
                            text: chat_reply_text(&message.text),
                            sent_at: Utc::now().timestamp_millis(),
                        };
                        // Exactly one reply per message, sent before the next read
                        if tx.send(Ok(reply)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(status) => {
                        let _ = tx.send(Err(status)).await;
                        break;
                    }
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

// ============================================================================
// PUBLIC API - Service Constructor
// ============================================================================

/// Create the AlertService server backed by the given store.
pub fn create_service(
    store: Arc<dyn AlertStore>,
) -> alert_service_server::AlertServiceServer<AlertServiceImpl> {
    alert_service_server::AlertServiceServer::new(AlertServiceImpl::new(store))
}
