//! Application state wiring the pipeline together.
//!
//! The webhook handler is generic over its collaborators; AppState pins it
//! to the concrete reqwest clients from recordflow-infra.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use recordflow_core::handler::WebhookHandler;
use recordflow_core::registry::PairRegistry;
use recordflow_infra::config::load_config;
use recordflow_infra::http::{HttpRecordStore, HttpWorkflowEngine, build_client};
use recordflow_types::config::BridgeConfig;

/// Concrete type alias for the handler pinned to infra implementations.
pub type ConcreteWebhookHandler = WebhookHandler<HttpWorkflowEngine, HttpRecordStore>;

/// Shared, read-only state for all requests.
#[derive(Clone)]
pub struct AppState {
    pub webhook_handler: Arc<ConcreteWebhookHandler>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the config file and wire the pipeline.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_config(config_path).await?;
        Self::from_config(config)
    }

    /// Wire the pipeline from an already loaded config.
    pub fn from_config(config: BridgeConfig) -> anyhow::Result<Self> {
        let BridgeConfig {
            records,
            workflow,
            retry,
            webhook,
            pairs,
        } = config;

        let registry = Arc::new(PairRegistry::from_pairs(pairs)?);

        // One client for both services; connections are reused across requests.
        let client = build_client()?;
        let engine = HttpWorkflowEngine::new(client.clone(), workflow.endpoint, retry.clone());
        let store = HttpRecordStore::new(client, records.base_url, retry);

        let webhook_handler = WebhookHandler::new(registry, webhook, workflow.user, engine, store);

        Ok(Self {
            webhook_handler: Arc::new(webhook_handler),
            started_at: Utc::now(),
        })
    }
}
