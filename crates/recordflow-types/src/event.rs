//! Inbound webhook event from the source records system.
//!
//! The wire shape is `{id, app: {id}, record: {<field_code>: {value: ...}}}`.
//! Extraction never fails: missing pieces come back as `None` and the
//! pipeline decides what is fatal.

use serde_json::{Map, Value};

use crate::config::WebhookSettings;
use crate::ids::{AppId, RecordId};

/// Correlation tag used when the event carries no `id`.
pub const UNKNOWN_EVENT_ID: &str = "unknown";

/// A record as delivered in the webhook: field code -> `{value: ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The unwrapped `value` of a field.
    ///
    /// Absent fields, fields that are not objects, and fields without a
    /// `value` key all yield `None`.
    pub fn field_value(&self, field_code: &str) -> Option<&Value> {
        self.0.get(field_code)?.as_object()?.get("value")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A webhook event after extraction from the raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    /// Correlation id for diagnostics only; never used for logic.
    pub event_id: String,
    pub app_id: Option<AppId>,
    pub record_id: Option<RecordId>,
    pub record: Record,
    /// `code` of the user in the modifier field, when it has that shape.
    pub modifier_user_code: Option<String>,
}

impl WebhookEvent {
    /// Extract an event from a raw JSON payload.
    pub fn extract(payload: &Value, settings: &WebhookSettings) -> Self {
        let record = payload
            .get("record")
            .and_then(Value::as_object)
            .cloned()
            .map(Record::new)
            .unwrap_or_default();

        let app_id = payload
            .get("app")
            .and_then(|app| app.get("id"))
            .and_then(AppId::from_json);

        let record_id = record
            .field_value(&settings.record_id_field)
            .and_then(RecordId::from_json);

        // Any other modifier shape (plain string, null, missing) means "no code".
        let modifier_user_code = record
            .field_value(&settings.modifier_field)
            .and_then(|v| v.get("code"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            event_id: event_id_of(payload),
            app_id,
            record_id,
            record,
            modifier_user_code,
        }
    }

    /// Whether the last modifier is one of the configured system identities.
    pub fn is_system_modification(&self, settings: &WebhookSettings) -> bool {
        self.modifier_user_code
            .as_deref()
            .is_some_and(|code| settings.skip_modifier_codes.iter().any(|s| s == code))
    }
}

/// Read the correlation id from a raw payload, defaulting to `"unknown"`.
pub fn event_id_of(payload: &Value) -> String {
    match payload.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNKNOWN_EVENT_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_payload(modifier: &str) -> Value {
        json!({
            "id": "e1",
            "app": {"id": 42},
            "record": {
                "更新者": {"value": {"code": modifier, "name": "Someone"}},
                "$id": {"value": "7"},
                "q1": {"value": "hi"}
            }
        })
    }

    #[test]
    fn extract_full_event() {
        let settings = WebhookSettings::default();
        let event = WebhookEvent::extract(&scenario_payload("alice"), &settings);

        assert_eq!(event.event_id, "e1");
        assert_eq!(event.app_id, Some(AppId::new("42")));
        assert_eq!(event.record_id, Some(RecordId::new("7")));
        assert_eq!(event.modifier_user_code.as_deref(), Some("alice"));
        assert_eq!(event.record.field_value("q1"), Some(&json!("hi")));
        assert!(!event.is_system_modification(&settings));
    }

    #[test]
    fn administrator_modifier_is_system_modification() {
        let settings = WebhookSettings::default();
        let event = WebhookEvent::extract(&scenario_payload("Administrator"), &settings);
        assert!(event.is_system_modification(&settings));
    }

    #[test]
    fn missing_pieces_come_back_as_none() {
        let settings = WebhookSettings::default();
        let event = WebhookEvent::extract(&json!({}), &settings);

        assert_eq!(event.event_id, UNKNOWN_EVENT_ID);
        assert!(event.app_id.is_none());
        assert!(event.record_id.is_none());
        assert!(event.modifier_user_code.is_none());
        assert!(event.record.is_empty());
    }

    #[test]
    fn non_object_payload_extracts_nothing() {
        let settings = WebhookSettings::default();
        let event = WebhookEvent::extract(&json!(["not", "an", "event"]), &settings);
        assert!(event.app_id.is_none());
        assert!(event.record.is_empty());
    }

    #[test]
    fn malformed_modifier_never_skips() {
        let settings = WebhookSettings::default();
        for modifier in [json!("Administrator"), json!(null), json!({"code": 5}), json!([])] {
            let payload = json!({
                "app": {"id": 1},
                "record": {"更新者": {"value": modifier}, "$id": {"value": "1"}}
            });
            let event = WebhookEvent::extract(&payload, &settings);
            assert!(!event.is_system_modification(&settings), "modifier {modifier:?}");
        }
    }

    #[test]
    fn field_value_tolerates_odd_shapes() {
        let record = Record::new(
            json!({"plain": "x", "no_value": {"type": "TEXT"}, "null_value": {"value": null}})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert!(record.field_value("plain").is_none());
        assert!(record.field_value("no_value").is_none());
        assert_eq!(record.field_value("null_value"), Some(&Value::Null));
        assert!(record.field_value("absent").is_none());
    }

    #[test]
    fn numeric_event_id_is_stringified() {
        assert_eq!(event_id_of(&json!({"id": 12})), "12");
        assert_eq!(event_id_of(&json!({"id": null})), UNKNOWN_EVENT_ID);
    }
}
