//! Webhook handler: the request pipeline.
//!
//! ```text
//! Received -> Validated -> PairResolved -> Mapped -> WorkflowCalled
//!          -> (UpdateNeeded -> Done | NoUpdateNeeded)
//! ```
//!
//! Edits made by a configured system identity short-circuit to `Skipped`
//! before anything else is checked, which breaks the loop of the bridge's
//! own write-backs being delivered again as webhooks. Every failure ends
//! the pipeline with a [`WebhookError`]; the update is only attempted after
//! the workflow call fully succeeded.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use recordflow_types::config::WebhookSettings;
use recordflow_types::error::WebhookError;
use recordflow_types::event::WebhookEvent;
use recordflow_types::webhook::WebhookOutcome;

use crate::context::RequestContext;
use crate::gateway::{RecordStore, WorkflowEngine};
use crate::mapping::{build_update_fields, build_workflow_input};
use crate::registry::PairRegistry;

/// Orchestrates one webhook delivery end to end.
pub struct WebhookHandler<W, R> {
    registry: Arc<PairRegistry>,
    settings: WebhookSettings,
    workflow_user: String,
    engine: W,
    store: R,
}

impl<W: WorkflowEngine, R: RecordStore> WebhookHandler<W, R> {
    pub fn new(
        registry: Arc<PairRegistry>,
        settings: WebhookSettings,
        workflow_user: impl Into<String>,
        engine: W,
        store: R,
    ) -> Self {
        Self {
            registry,
            settings,
            workflow_user: workflow_user.into(),
            engine,
            store,
        }
    }

    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    /// Process a raw webhook payload.
    ///
    /// Runs inside the context's span, so every log line of the delivery
    /// carries its correlation ids.
    pub async fn handle(
        &self,
        ctx: &RequestContext,
        payload: &Value,
    ) -> Result<WebhookOutcome, WebhookError> {
        async {
            let result = self.process(ctx, payload).await;
            match &result {
                Ok(outcome) => tracing::info!(status = %outcome, "webhook processed"),
                Err(e) => tracing::error!(error = %e, "webhook processing failed"),
            }
            result
        }
        .instrument(ctx.span())
        .await
    }

    async fn process(
        &self,
        ctx: &RequestContext,
        payload: &Value,
    ) -> Result<WebhookOutcome, WebhookError> {
        tracing::debug!(%payload, "webhook received");

        let event = WebhookEvent::extract(payload, &self.settings);

        if event.is_system_modification(&self.settings) {
            tracing::info!(
                modifier = event.modifier_user_code.as_deref().unwrap_or_default(),
                "skipping update made by system identity"
            );
            return Ok(WebhookOutcome::Skipped);
        }

        let (Some(app_id), Some(record_id)) = (event.app_id.as_ref(), event.record_id.as_ref())
        else {
            return Err(WebhookError::InvalidPayload);
        };

        let pair = self
            .registry
            .find_pair(app_id)
            .ok_or_else(|| WebhookError::PairNotFound(app_id.clone()))?;

        let workflow_input = build_workflow_input(&event.record, &pair.field_map_in, &self.workflow_user);
        tracing::debug!(inputs = ?workflow_input.inputs, "built workflow input");

        let result = self
            .engine
            .invoke(ctx, &pair.workflow_api_key, &workflow_input)
            .await?;
        tracing::debug!(outputs = ?result.outputs, "workflow result received");

        let fields = build_update_fields(&result.outputs, &pair.field_map_out);
        if fields.is_empty() {
            return Ok(WebhookOutcome::NoUpdateNeeded);
        }

        self.store
            .update_record(ctx, pair.target_app_id(), record_id, fields, &pair.source_token)
            .await?;
        tracing::info!(app_id = %pair.target_app_id(), record_id = %record_id, "record updated");

        Ok(WebhookOutcome::Done)
    }
}
