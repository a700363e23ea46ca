//! Webhook receiver.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use serde_json::Value;

use recordflow_core::context::RequestContext;
use recordflow_types::error::WebhookError;

use crate::http::error::AppError;
use crate::http::response::WebhookResponse;
use crate::state::AppState;

/// POST /webhook - Receive a record-change notification.
///
/// The body is read raw so that an unreadable or non-JSON delivery (for
/// example one over the body size limit) still produces the error envelope
/// instead of axum's own rejection.
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<WebhookResponse, AppError> {
    let body = body.map_err(|rejection| {
        tracing::error!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "failed to read webhook body"
        );
        WebhookError::Internal(format!("unreadable body: {}", rejection.body_text()))
    })?;

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "webhook body is not valid JSON");
        WebhookError::Internal(format!("invalid JSON body: {e}"))
    })?;

    let ctx = RequestContext::from_payload(&payload);
    let outcome = state.webhook_handler.handle(&ctx, &payload).await?;

    Ok(WebhookResponse::outcome(outcome))
}
