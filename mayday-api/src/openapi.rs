//! OpenAPI Document
//!
//! Aggregates the annotated route handlers and wire types into the document
//! served at `/openapi.json`.

use utoipa::OpenApi;

use mayday_core::AlertStatus;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{alert, chat, health};
use crate::types::{AlertDto, BatchSummaryDto, ChatMessageDto, CreateAlertDto};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MAYDAY Gateway",
        version = "0.1.0",
        description = "Synchronous HTTP gateway over the MAYDAY emergency-alert gRPC service",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Alerts", description = "Record and track emergency alerts"),
        (name = "Chat", description = "Operator chat with advisory replies"),
        (name = "Health", description = "Service health probes")
    ),
    paths(
        alert::create_alert,
        alert::list_alerts,
        alert::get_alert,
        alert::update_alert_status,
        alert::batch_create_alerts,
        chat::chat,
        health::ping,
        health::liveness
    ),
    components(schemas(
        CreateAlertDto,
        AlertDto,
        BatchSummaryDto,
        ChatMessageDto,
        ApiError,
        ErrorCode,
        AlertStatus,
        health::HealthResponse,
        health::HealthStatus
    ))
)]
pub struct ApiDoc;
