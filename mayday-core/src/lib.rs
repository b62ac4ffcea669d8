//! MAYDAY Core - Entity Types
//!
//! Pure data structures with no behavior beyond parsing and formatting.
//! All other crates depend on this. This crate contains ONLY data types,
//! status parsing, and the chat reply templates - no I/O, no async.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Alert identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type AlertId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 AlertId (timestamp-sortable).
pub fn new_alert_id() -> AlertId {
    Uuid::now_v7()
}

// ============================================================================
// ENUMS
// ============================================================================

/// Lifecycle status of an alert.
///
/// The machine is deliberately permissive: any member state may move to any
/// other member state. What is guarded is the SET - a status outside this
/// enum is rejected at the boundary and the stored value stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AlertStatus {
    /// Initial state for every accepted alert
    #[default]
    Pending,
    /// An operator has picked the alert up
    InProgress,
    /// Handled to completion
    Resolved,
    /// Withdrawn or discarded
    Cancelled,
}

// ============================================================================
// STRING CONVERSIONS
// ============================================================================

fn normalize_token(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AlertStatus::Pending => "PENDING",
            AlertStatus::InProgress => "IN_PROGRESS",
            AlertStatus::Resolved => "RESOLVED",
            AlertStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "pending" => Ok(AlertStatus::Pending),
            "inprogress" => Ok(AlertStatus::InProgress),
            "resolved" => Ok(AlertStatus::Resolved),
            "cancelled" | "canceled" => Ok(AlertStatus::Cancelled),
            _ => Err(format!("Invalid AlertStatus: {}", s)),
        }
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Alert - the central entity. One accepted emergency report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Alert {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub alert_id: AlertId,
    /// Free-form category tag (ACCIDENT, FIRE, MEDICAL, ...). Required, non-blank.
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form description; may be empty.
    pub narrative: String,
    /// Identifier of the submitting party; may be empty.
    pub reporter_id: String,
    pub status: AlertStatus,
    /// Assigned by the service at acceptance, never supplied by the caller.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub received_at: Timestamp,
}

/// Payload for creating an alert. Everything the caller supplies;
/// id, status, and timestamp are stamped at acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewAlert {
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub reporter_id: String,
}

impl NewAlert {
    /// Check the create invariants. `kind` is the only required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "kind".to_string(),
            });
        }
        Ok(())
    }
}

impl Alert {
    /// Stamp a validated payload into a full record: fresh UUIDv7 id,
    /// PENDING status, acceptance timestamp.
    pub fn from_new(new: NewAlert) -> Self {
        Alert {
            alert_id: new_alert_id(),
            kind: new.kind,
            latitude: new.latitude,
            longitude: new.longitude,
            narrative: new.narrative,
            reporter_id: new.reporter_id,
            status: AlertStatus::Pending,
            received_at: Utc::now(),
        }
    }
}

// ============================================================================
// CHAT REPLY TEMPLATES
// ============================================================================

/// Fixed sender id the operator side uses in chat replies.
pub const OPERATOR_SENDER_ID: &str = "00000000";

/// Keyword that escalates a chat message to the fire variant.
const FIRE_KEYWORD: &str = "fire";

/// Case-insensitive containment check for the fire keyword.
pub fn is_fire_report(text: &str) -> bool {
    text.to_lowercase().contains(FIRE_KEYWORD)
}

/// Deterministic operator reply for one incoming chat message.
pub fn chat_reply_text(incoming: &str) -> String {
    if is_fire_report(incoming) {
        "Operator: FIRE ALERT! Fire crews are on their way!".to_string()
    } else {
        format!(
            "Operator: received \"{}\". Stay calm, help is being arranged.",
            incoming
        )
    }
}

/// Summary line emitted after a batch upload completes.
pub fn batch_summary_message(accepted: i32) -> String {
    format!("Batch accepted: {} alerts recorded.", accepted)
}

// ============================================================================
// ERRORS
// ============================================================================

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Alert not found: {id}")]
    NotFound { id: AlertId },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Validation errors for caller-supplied payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Advisory backend errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdviceError {
    #[error("No advisory provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Request to {provider} timed out")]
    Timeout { provider: String },
}

/// Master error type for all MAYDAY errors.
#[derive(Debug, Clone, Error)]
pub enum MaydayError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Advice error: {0}")]
    Advice(#[from] AdviceError),
}

/// Result type alias for MAYDAY operations.
pub type MaydayResult<T> = Result<T, MaydayError>;

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
