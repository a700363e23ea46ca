//! HttpRecordStore -- [`RecordStore`] over the records REST API.
//!
//! `PUT {base_url}/k/v1/record.json` authenticated with the pair's static
//! `X-Cybozu-API-Token`. Fields are wrapped as `{value: ...}`; null values
//! are dropped by [`UpdatePayload::new`] before the body is built.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use recordflow_core::context::RequestContext;
use recordflow_core::gateway::RecordStore;
use recordflow_core::retry::ResilientCaller;
use recordflow_types::config::RetryConfig;
use recordflow_types::error::{CallError, UpstreamService};
use recordflow_types::ids::{AppId, RecordId};
use recordflow_types::update::UpdatePayload;

use super::send_json;

/// Header carrying the records API token.
pub const API_TOKEN_HEADER: &str = "X-Cybozu-API-Token";

/// Path of the single-record endpoint, relative to the base URL.
const RECORD_PATH: &str = "/k/v1/record.json";

/// Records API client.
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
    policy: RetryConfig,
}

impl HttpRecordStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, policy: RetryConfig) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            policy,
        }
    }

    fn record_url(&self) -> String {
        format!("{}{}", self.base_url, RECORD_PATH)
    }
}

impl RecordStore for HttpRecordStore {
    async fn update_record(
        &self,
        _ctx: &RequestContext,
        app_id: &AppId,
        record_id: &RecordId,
        fields: BTreeMap<String, Value>,
        token: &SecretString,
    ) -> Result<Value, CallError> {
        let body = UpdatePayload::new(app_id.clone(), record_id.clone(), fields);
        let url = self.record_url();
        tracing::info!(
            app_id = %app_id,
            record_id = %record_id,
            fields = body.record.len(),
            "updating record"
        );

        ResilientCaller::call(&self.policy, UpstreamService::RecordsUpdate, || {
            send_json(
                self.client
                    .put(&url)
                    .header(API_TOKEN_HEADER, token.expose_secret())
                    .json(&body),
            )
        })
        .await
    }
}
