//! Per-request correlation context.
//!
//! `RequestContext` is created once per webhook delivery and passed by
//! reference to every component that logs, so each log line carries the
//! event's correlation id without any global logger state.

use serde_json::Value;
use tracing::Span;
use uuid::Uuid;

use recordflow_types::event::event_id_of;

/// Correlation data for one webhook delivery.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Locally generated id, unique per delivery (redeliveries differ).
    pub request_id: Uuid,
    /// The event's own id, or `"unknown"`.
    pub event_id: String,
}

impl RequestContext {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            event_id: event_id.into(),
        }
    }

    /// Build a context from a raw webhook payload.
    pub fn from_payload(payload: &Value) -> Self {
        Self::new(event_id_of(payload))
    }

    /// Span carrying both correlation ids.
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "webhook",
            event_id = %self.event_id,
            request_id = %self.request_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_from_payload_uses_event_id() {
        let ctx = RequestContext::from_payload(&json!({"id": "evt-1"}));
        assert_eq!(ctx.event_id, "evt-1");
    }

    #[test]
    fn context_defaults_to_unknown() {
        let ctx = RequestContext::from_payload(&json!({}));
        assert_eq!(ctx.event_id, "unknown");
    }

    #[test]
    fn each_context_gets_its_own_request_id() {
        let a = RequestContext::new("same");
        let b = RequestContext::new("same");
        assert_ne!(a.request_id, b.request_id);
    }
}
