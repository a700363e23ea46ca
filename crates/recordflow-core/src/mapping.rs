//! Field mapping between source records and workflow payloads.
//!
//! Both directions are pure functions of their inputs:
//! - inbound mapping is total: every configured key appears, null when the
//!   source field is missing.
//! - outbound mapping is partial: only keys whose workflow output exists
//!   are kept.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use recordflow_types::event::Record;
use recordflow_types::workflow::WorkflowPayload;

/// Build the workflow request from a record and the pair's inbound map.
///
/// `field_map_in` maps workflow input key -> source field code.
pub fn build_workflow_input(
    record: &Record,
    field_map_in: &BTreeMap<String, String>,
    user: &str,
) -> WorkflowPayload {
    let inputs = field_map_in
        .iter()
        .map(|(workflow_key, field_code)| {
            let value = record.field_value(field_code).cloned().unwrap_or(Value::Null);
            (workflow_key.clone(), value)
        })
        .collect();
    WorkflowPayload::blocking(inputs, user)
}

/// Pick the record fields to write back from the workflow outputs.
///
/// `field_map_out` maps source field code -> workflow output key. Entries
/// whose output key is absent are dropped; an empty result means there is
/// nothing to update.
pub fn build_update_fields(
    outputs: &Map<String, Value>,
    field_map_out: &BTreeMap<String, String>,
) -> BTreeMap<String, Value> {
    field_map_out
        .iter()
        .filter_map(|(field_code, workflow_key)| {
            outputs
                .get(workflow_key)
                .map(|value| (field_code.clone(), value.clone()))
        })
        .collect()
}
