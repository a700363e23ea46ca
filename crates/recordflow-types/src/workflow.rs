//! Workflow engine request and result types.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// How the workflow engine should respond. Only blocking mode is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    Blocking,
}

/// Body of a workflow-execution request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowPayload {
    /// Workflow input key -> value (null when the source field was absent).
    pub inputs: BTreeMap<String, Value>,
    pub response_mode: ResponseMode,
    /// Fixed caller identity.
    pub user: String,
}

impl WorkflowPayload {
    pub fn blocking(inputs: BTreeMap<String, Value>, user: impl Into<String>) -> Self {
        Self {
            inputs,
            response_mode: ResponseMode::Blocking,
            user: user.into(),
        }
    }
}

/// The part of a workflow response the bridge consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowResult {
    pub outputs: Map<String, Value>,
}

impl WorkflowResult {
    /// Pick `data.outputs` out of a workflow response.
    ///
    /// Everything else in the response is ignored. A response without an
    /// `outputs` object yields empty outputs.
    pub fn from_response(body: &Value) -> Self {
        let outputs = body
            .get("data")
            .and_then(|data| data.get("outputs"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self { outputs }
    }
}
