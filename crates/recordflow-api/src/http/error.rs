//! Application error type mapping to the webhook error body.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use recordflow_types::error::{INTERNAL_ERROR_MESSAGE, WebhookError};

use crate::http::response::WebhookResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub struct AppError(pub WebhookError);

impl From<WebhookError> for AppError {
    fn from(e: WebhookError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        WebhookResponse::error(self.0.public_message()).into_response()
    }
}

/// Response for a panicking handler; the panic payload never reaches the caller.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    WebhookResponse::error(INTERNAL_ERROR_MESSAGE).into_response()
}
