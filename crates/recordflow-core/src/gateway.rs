//! Ports to the two external services.
//!
//! Implementations live in recordflow-infra and are expected to wrap each
//! request in [`crate::retry::ResilientCaller`], so a returned `CallError`
//! is already final.

use std::collections::BTreeMap;
use std::future::Future;

use secrecy::SecretString;
use serde_json::Value;

use recordflow_types::error::CallError;
use recordflow_types::ids::{AppId, RecordId};
use recordflow_types::workflow::{WorkflowPayload, WorkflowResult};

use crate::context::RequestContext;

/// Executes a workflow synchronously.
pub trait WorkflowEngine: Send + Sync {
    /// Run the workflow with `payload`, authenticating with `api_key`.
    fn invoke(
        &self,
        ctx: &RequestContext,
        api_key: &SecretString,
        payload: &WorkflowPayload,
    ) -> impl Future<Output = Result<WorkflowResult, CallError>> + Send;
}

/// Writes field updates back to a source record.
pub trait RecordStore: Send + Sync {
    /// Update `record_id` in `app_id` with `fields`. Null-valued fields are
    /// not sent. Returns the service's acknowledgement body.
    fn update_record(
        &self,
        ctx: &RequestContext,
        app_id: &AppId,
        record_id: &RecordId,
        fields: BTreeMap<String, Value>,
        token: &SecretString,
    ) -> impl Future<Output = Result<Value, CallError>> + Send;
}
