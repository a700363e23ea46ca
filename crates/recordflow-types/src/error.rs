use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::ids::AppId;

/// External service an outbound call was made to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    WorkflowEngine,
    RecordsUpdate,
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamService::WorkflowEngine => f.write_str("Workflow Engine error"),
            UpstreamService::RecordsUpdate => f.write_str("Source Records System update error"),
        }
    }
}

/// Failure of a single outbound attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("connection error: {0}")]
    Transport(String),

    #[error("attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl AttemptError {
    /// Best diagnostic text: the response body when the failure carried one,
    /// otherwise the error description.
    pub fn diagnostic(&self) -> String {
        match self {
            AttemptError::Status { status, body } if body.trim().is_empty() => {
                format!("HTTP {status}")
            }
            AttemptError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Final failure of an outbound call after all attempts were used.
#[derive(Debug, Error)]
#[error("{service}: {detail}")]
pub struct CallError {
    pub service: UpstreamService,
    /// Number of attempts made.
    pub attempts: u32,
    /// Diagnostic text of the last attempt.
    pub detail: String,
}

/// Errors that end webhook processing with an error response.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("invalid payload: app_id or record_id not found")]
    InvalidPayload,

    #[error("no matching configuration for app_id {0}")]
    PairNotFound(AppId),

    #[error(transparent)]
    Upstream(#[from] CallError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Message returned to callers for anything unanticipated.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

impl WebhookError {
    /// Message safe to return to the webhook caller.
    ///
    /// Internal errors are reduced to a generic message; their detail only
    /// goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            WebhookError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors from loading or validating the bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("duplicate pair for app_id {0}")]
    DuplicatePair(AppId),
}
