//! Record update request for the source records system.
//!
//! Body shape: `{app, id, record: {<field_code>: {value: ...}}}`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ids::{AppId, RecordId};

/// A single field in the records API envelope format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEnvelope {
    pub value: Value,
}

/// Body of a record-update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    pub app: AppId,
    pub id: RecordId,
    pub record: BTreeMap<String, FieldEnvelope>,
}

impl UpdatePayload {
    /// Build an update body, dropping every field whose value is null.
    pub fn new(app: AppId, id: RecordId, fields: BTreeMap<String, Value>) -> Self {
        let record = fields
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(code, value)| (code, FieldEnvelope { value }))
            .collect();
        Self { app, id, record }
    }
}
