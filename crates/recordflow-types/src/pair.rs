//! Integration pair: one source application bound to a workflow.
//!
//! A pair carries the credentials for both external services and the two
//! field mappings that drive the round trip:
//! - `field_map_in`: workflow input key -> source field code
//! - `field_map_out`: source field code -> workflow output key

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::ids::AppId;

/// A configured integration between a source application and a workflow.
///
/// Secrets are held as [`SecretString`] and never show up in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct IntegrationPair {
    /// Application whose webhooks this pair handles.
    #[serde(alias = "kintone_app_id")]
    pub app_id: AppId,

    /// Application the write-back targets. Defaults to `app_id`.
    #[serde(default)]
    pub update_app_id: Option<AppId>,

    /// Bearer token for the workflow engine.
    #[serde(alias = "dify_api_key", deserialize_with = "deserialize_secret")]
    pub workflow_api_key: SecretString,

    /// Static API token for the records API.
    #[serde(alias = "kintone_token", deserialize_with = "deserialize_secret")]
    pub source_token: SecretString,

    /// Workflow input key -> source field code.
    #[serde(alias = "kintone_to_dify", default)]
    pub field_map_in: BTreeMap<String, String>,

    /// Source field code -> workflow output key.
    #[serde(alias = "dify_to_kintone", default)]
    pub field_map_out: BTreeMap<String, String>,
}

impl IntegrationPair {
    /// The application the record update is written to.
    pub fn target_app_id(&self) -> &AppId {
        self.update_app_id.as_ref().unwrap_or(&self.app_id)
    }
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}
