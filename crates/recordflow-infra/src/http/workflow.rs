//! HttpWorkflowEngine -- [`WorkflowEngine`] over the workflow `run` API.
//!
//! `POST {endpoint}` with `Authorization: Bearer <api_key>` and a blocking
//! payload; the response's `data.outputs` becomes the [`WorkflowResult`].
//! The endpoint is shared by all pairs; only the API key differs.

use secrecy::{ExposeSecret, SecretString};

use recordflow_core::context::RequestContext;
use recordflow_core::gateway::WorkflowEngine;
use recordflow_core::retry::ResilientCaller;
use recordflow_types::config::RetryConfig;
use recordflow_types::error::{CallError, UpstreamService};
use recordflow_types::workflow::{WorkflowPayload, WorkflowResult};

use super::send_json;

/// Workflow engine client.
pub struct HttpWorkflowEngine {
    client: reqwest::Client,
    endpoint: String,
    policy: RetryConfig,
}

impl HttpWorkflowEngine {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, policy: RetryConfig) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            policy,
        }
    }
}

impl WorkflowEngine for HttpWorkflowEngine {
    async fn invoke(
        &self,
        _ctx: &RequestContext,
        api_key: &SecretString,
        payload: &WorkflowPayload,
    ) -> Result<WorkflowResult, CallError> {
        tracing::info!(endpoint = %self.endpoint, "calling workflow engine");

        let body = ResilientCaller::call(&self.policy, UpstreamService::WorkflowEngine, || {
            send_json(
                self.client
                    .post(&self.endpoint)
                    .bearer_auth(api_key.expose_secret())
                    .json(payload),
            )
        })
        .await?;

        tracing::debug!(response = %body, "workflow engine responded");
        Ok(WorkflowResult::from_response(&body))
    }
}
