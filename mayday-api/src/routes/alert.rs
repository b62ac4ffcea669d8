//! Alert Endpoints
//!
//! CRUD-style routes over the gRPC alert service. Single-alert calls map
//! one-to-one onto unary RPCs; the list route drains a server stream and the
//! batch route rides the client-streaming RPC through the bridge deadline.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

#[cfg(feature = "openapi")]
use crate::error::ApiError;
use crate::error::ApiResult;
use crate::grpc::proto;
use crate::types::{AlertDto, BatchSummaryDto, CreateAlertDto};

use super::GatewayState;

/// Query parameters for the list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListAlertsParams {
    /// Exact alert kind to keep; empty or absent returns everything.
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Record a single alert.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/alerts",
    tag = "Alerts",
    request_body = CreateAlertDto,
    responses(
        (status = 201, description = "Alert recorded", body = AlertDto),
        (status = 400, description = "Missing or malformed fields", body = ApiError),
        (status = 502, description = "Alert service unreachable", body = ApiError)
    )
))]
pub async fn create_alert(
    State(state): State<GatewayState>,
    Json(payload): Json<CreateAlertDto>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .bridge
        .create_alert(proto::CreateAlertRequest::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(AlertDto::from(record))))
}

/// List alerts in intake order, optionally filtered by kind.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    params(
        ("type" = Option<String>, Query, description = "Exact alert kind to keep")
    ),
    responses(
        (status = 200, description = "Alerts in intake order", body = Vec<AlertDto>),
        (status = 502, description = "Alert service unreachable", body = ApiError)
    )
))]
pub async fn list_alerts(
    State(state): State<GatewayState>,
    Query(params): Query<ListAlertsParams>,
) -> ApiResult<Json<Vec<AlertDto>>> {
    let records = state.bridge.list_alerts(params.kind).await?;
    Ok(Json(records.into_iter().map(AlertDto::from).collect()))
}

/// Fetch a single alert by id.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(
        ("id" = String, Path, description = "Alert identifier")
    ),
    responses(
        (status = 200, description = "The alert", body = AlertDto),
        (status = 404, description = "No alert with this id", body = ApiError),
        (status = 502, description = "Alert service unreachable", body = ApiError)
    )
))]
pub async fn get_alert(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlertDto>> {
    let record = state.bridge.get_alert(id).await?;
    Ok(Json(AlertDto::from(record)))
}

/// Replace an alert's status.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/alerts/{id}/status",
    tag = "Alerts",
    params(
        ("id" = String, Path, description = "Alert identifier")
    ),
    request_body(content = String, description = "New status, e.g. RESOLVED"),
    responses(
        (status = 200, description = "The updated alert", body = AlertDto),
        (status = 400, description = "Unknown status token", body = ApiError),
        (status = 404, description = "No alert with this id", body = ApiError),
        (status = 502, description = "Alert service unreachable", body = ApiError)
    )
))]
pub async fn update_alert_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    body: String,
) -> ApiResult<Json<AlertDto>> {
    // The frontend sends the status as a text/plain body, sometimes with
    // JSON-style quotes around it.
    let new_status = body.trim().trim_matches('"').trim().to_string();
    let record = state.bridge.update_alert_status(id, new_status).await?;
    Ok(Json(AlertDto::from(record)))
}

/// Record a whole array of alerts on one streaming call.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/alerts/batch",
    tag = "Alerts",
    request_body = Vec<CreateAlertDto>,
    responses(
        (status = 200, description = "Batch summary", body = BatchSummaryDto),
        (status = 502, description = "Alert service unreachable", body = ApiError),
        (status = 504, description = "Batch deadline expired", body = ApiError)
    )
))]
pub async fn batch_create_alerts(
    State(state): State<GatewayState>,
    Json(payload): Json<Vec<CreateAlertDto>>,
) -> ApiResult<Json<BatchSummaryDto>> {
    let items = payload
        .into_iter()
        .map(proto::CreateAlertRequest::from)
        .collect();
    let summary = state.bridge.batch_create_alerts(items).await?;
    Ok(Json(BatchSummaryDto::from(summary)))
}

pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/", post(create_alert).get(list_alerts))
        .route("/batch", post(batch_create_alerts))
        .route("/:id", get(get_alert))
        .route("/:id/status", put(update_alert_status))
}
