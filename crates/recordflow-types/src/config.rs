//! Bridge configuration types.
//!
//! `BridgeConfig` is the top-level config file: the records API base URL,
//! the workflow endpoint, retry policy, webhook field conventions and the
//! list of integration pairs. Everything except `records` and `pairs` has
//! defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pair::IntegrationPair;

/// Default workflow-execution endpoint shared by all pairs.
pub const DEFAULT_WORKFLOW_ENDPOINT: &str = "https://api.dify.ai/v1/workflows/run";

/// Top-level configuration for the bridge.
#[derive(Debug, Deserialize)]
pub struct BridgeConfig {
    /// Source records system connection.
    #[serde(alias = "kintone")]
    pub records: RecordsConfig,

    /// Workflow engine connection.
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Retry policy applied to every outbound call.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Field conventions of the inbound webhook.
    #[serde(default)]
    pub webhook: WebhookSettings,

    /// Configured integration pairs.
    #[serde(default)]
    pub pairs: Vec<IntegrationPair>,
}

/// Connection settings for the source records system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Base URL, e.g. `https://example.cybozu.com`.
    pub base_url: String,
}

/// Connection settings for the workflow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Caller identity sent as `user` in every workflow request.
    #[serde(default = "default_user")]
    pub user: String,
}

fn default_endpoint() -> String {
    DEFAULT_WORKFLOW_ENDPOINT.to_string()
}

fn default_user() -> String {
    "kintone-dify-webhook".to_string()
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user: default_user(),
        }
    }
}

/// Fixed-delay retry policy for outbound calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts including the first (default 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait between attempts in milliseconds (default 2000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-attempt timeout in milliseconds (default 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    2_000
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Field codes and identities the webhook pipeline relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSettings {
    /// Field holding the record identifier.
    #[serde(default = "default_record_id_field")]
    pub record_id_field: String,

    /// Field holding the last modifier (a user reference with `code`).
    #[serde(default = "default_modifier_field")]
    pub modifier_field: String,

    /// Modifier codes whose edits are ignored to prevent update loops.
    #[serde(default = "default_skip_modifier_codes")]
    pub skip_modifier_codes: Vec<String>,
}

fn default_record_id_field() -> String {
    "$id".to_string()
}

fn default_modifier_field() -> String {
    "更新者".to_string()
}

fn default_skip_modifier_codes() -> Vec<String> {
    vec!["Administrator".to_string()]
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            record_id_field: default_record_id_field(),
            modifier_field: default_modifier_field(),
            skip_modifier_codes: default_skip_modifier_codes(),
        }
    }
}
