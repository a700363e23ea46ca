//! Bridge configuration loader.
//!
//! Reads the config file given on the command line and deserializes it into
//! [`BridgeConfig`]. The format follows the extension: `.yaml`/`.yml` or
//! `.toml`. Unlike optional settings files, a missing or invalid bridge
//! config is fatal: without pairs there is nothing to serve.

use std::path::Path;

use recordflow_types::config::BridgeConfig;
use recordflow_types::error::ConfigError;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Load, parse and validate the bridge config at `path`.
pub async fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let config = parse_config(&content, format).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    let config = validate(config)?;
    tracing::info!(
        path = %path.display(),
        pairs = config.pairs.len(),
        "loaded bridge configuration"
    );
    Ok(config)
}

/// Parse config text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<BridgeConfig, String> {
    match format {
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Check invariants serde cannot express and normalize the base URL.
///
/// Duplicate app ids are rejected later, when the registry is built.
pub fn validate(mut config: BridgeConfig) -> Result<BridgeConfig, ConfigError> {
    let base_url = config.records.base_url.trim().trim_end_matches('/').to_string();
    if base_url.is_empty() {
        return Err(ConfigError::Invalid("records.base_url must not be empty".to_string()));
    }
    config.records.base_url = base_url;

    if config.workflow.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid("workflow.endpoint must not be empty".to_string()));
    }

    if config.retry.max_attempts == 0 {
        return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".to_string()));
    }

    if config.retry.timeout_ms == 0 {
        return Err(ConfigError::Invalid("retry.timeout_ms must be greater than 0".to_string()));
    }

    if config.pairs.is_empty() {
        tracing::warn!("no integration pairs configured; every webhook will be rejected");
    }

    Ok(config)
}
