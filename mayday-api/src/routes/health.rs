//! Health Endpoints
//!
//! Plain-text ping plus a JSON liveness probe. Neither touches the alert
//! store or the gRPC channel; they only report that the process is serving.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::GatewayState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Connectivity check used by the frontend on load.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is reachable", body = String)
    )
))]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// Liveness probe for orchestrators.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
))]
pub async fn liveness() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Process is alive".to_string()),
    })
}

pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn health_response_omits_absent_message() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            message: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "healthy");
        assert!(value.get("message").is_none());
    }
}
