//! Response body returned to the webhook caller.
//!
//! Exactly one of:
//! ```json
//! {"status": "skipped"}
//! {"status": "done"}
//! {"status": "no_update_needed"}
//! {"error": "...", "status": "error"}
//! ```
//! Success statuses are sent with 200, the error body with 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use recordflow_types::webhook::WebhookOutcome;

/// Status value of the error body.
pub const ERROR_STATUS: &str = "error";

/// Webhook response body.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: &'static str,
}

impl WebhookResponse {
    pub fn outcome(outcome: WebhookOutcome) -> Self {
        Self {
            error: None,
            status: outcome.as_str(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            status: ERROR_STATUS,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.error.is_some() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::OK
        }
    }
}

impl IntoResponse for WebhookResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"error":"internal server error","status":"error"}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_body_has_only_status() {
        let resp = WebhookResponse::outcome(WebhookOutcome::Done);
        assert_eq!(serde_json::to_value(&resp).unwrap(), json!({"status": "done"}));
        assert_eq!(resp.status_code(), StatusCode::OK);
    }

    #[test]
    fn error_body_is_bad_gateway() {
        let resp = WebhookResponse::error("no matching configuration for app_id 999");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"error": "no matching configuration for app_id 999", "status": "error"})
        );
        assert_eq!(resp.status_code(), StatusCode::BAD_GATEWAY);
    }
}
