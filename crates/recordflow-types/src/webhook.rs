//! Successful outcomes of webhook processing.

use std::fmt;

use serde::Serialize;

/// Terminal status of a webhook that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// The event was produced by a system identity and ignored.
    Skipped,
    /// The workflow ran and the record was updated.
    Done,
    /// The workflow ran but produced none of the mapped outputs.
    NoUpdateNeeded,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Skipped => "skipped",
            WebhookOutcome::Done => "done",
            WebhookOutcome::NoUpdateNeeded => "no_update_needed",
        }
    }
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
