//! Chat Endpoint
//!
//! One HTTP request, one reply. The handler asks the advisory provider for
//! situation-specific guidance, then rides the message over the live chat
//! RPC so the exchange reaches the operator stream, and returns the advisory
//! text to the caller.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use mayday_advice::FALLBACK_ADVICE;
use mayday_core::AdviceError;

#[cfg(feature = "openapi")]
use crate::error::ApiError;
use crate::error::ApiResult;
use crate::grpc::proto;
use crate::types::ChatMessageDto;

use super::GatewayState;

/// Exchange one message with the emergency operator.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatMessageDto,
    responses(
        (status = 200, description = "Operator reply", body = ChatMessageDto),
        (status = 502, description = "Alert service unreachable", body = ApiError),
        (status = 504, description = "Chat deadline expired", body = ApiError)
    )
))]
pub async fn chat(
    State(state): State<GatewayState>,
    Json(payload): Json<ChatMessageDto>,
) -> ApiResult<Json<ChatMessageDto>> {
    let advisory = advisory_for(&state, &payload.message).await;

    let outgoing = proto::ChatMessage {
        sender_id: payload.sender_cin.clone(),
        text: payload.message.clone(),
        sent_at: Utc::now().timestamp_millis(),
    };

    // The RPC layer answers with the operator template; HTTP callers get
    // the advisory text instead.
    let mut reply = state.bridge.chat_once(outgoing).await?;
    reply.text = advisory;
    Ok(Json(ChatMessageDto::from(reply)))
}

/// Ask the configured provider for advice, falling back to the canned line
/// when no provider is set or the upstream call fails.
async fn advisory_for(state: &GatewayState, message: &str) -> String {
    let outcome = match state.advice.as_deref() {
        Some(provider) => provider.advise(message).await,
        None => Err(AdviceError::ProviderNotConfigured.into()),
    };

    match outcome {
        Ok(advice) => advice,
        Err(e) => {
            tracing::warn!(error = %e, "advisory unavailable, using fallback");
            FALLBACK_ADVICE.to_string()
        }
    }
}

pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/", post(chat))
}
