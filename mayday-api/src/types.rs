//! Gateway Wire Types
//!
//! JSON shapes exposed over HTTP. Field names follow the browser client's
//! camelCase contract (`alertId`, `senderCin`, `receivedTimestamp`), with
//! `type` standing in for the alert kind, so the DTOs here translate between
//! that contract and the protobuf field names.

use serde::{Deserialize, Serialize};

use crate::grpc::proto;

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// Payload for creating a single alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertDto {
    /// Alert category, e.g. "FIRE" or "ACCIDENT".
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-text details, may be empty.
    #[serde(default)]
    pub description: String,
    /// Reporter's citizen identification number.
    #[serde(default)]
    pub sender_cin: String,
}

/// One chat exchange from the caller's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    #[serde(default)]
    pub sender_cin: String,
    pub message: String,
    /// Unix epoch milliseconds; 0 when the caller leaves it out.
    #[serde(default)]
    pub timestamp: i64,
}

// ============================================================================
// RESPONSE BODIES
// ============================================================================

/// A stored alert as returned to HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub alert_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub sender_cin: String,
    pub status: String,
    /// Unix epoch milliseconds at intake.
    pub received_timestamp: i64,
}

/// Outcome of a batch submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BatchSummaryDto {
    pub alert_count: i32,
    pub status_message: String,
}

// ============================================================================
// PROTOBUF CONVERSIONS
// ============================================================================

impl From<proto::AlertRecord> for AlertDto {
    fn from(record: proto::AlertRecord) -> Self {
        Self {
            alert_id: record.alert_id,
            kind: record.kind,
            latitude: record.latitude,
            longitude: record.longitude,
            description: record.narrative,
            sender_cin: record.reporter_id,
            status: record.status,
            received_timestamp: record.received_at,
        }
    }
}

impl From<CreateAlertDto> for proto::CreateAlertRequest {
    fn from(dto: CreateAlertDto) -> Self {
        Self {
            kind: dto.kind,
            latitude: dto.latitude,
            longitude: dto.longitude,
            narrative: dto.description,
            reporter_id: dto.sender_cin,
        }
    }
}

impl From<proto::BatchSummary> for BatchSummaryDto {
    fn from(summary: proto::BatchSummary) -> Self {
        Self {
            alert_count: summary.alert_count,
            status_message: summary.status_message,
        }
    }
}

impl From<proto::ChatMessage> for ChatMessageDto {
    fn from(message: proto::ChatMessage) -> Self {
        Self {
            sender_cin: message.sender_id,
            message: message.text,
            timestamp: message.sent_at,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
