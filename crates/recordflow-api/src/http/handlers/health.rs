//! Liveness endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health - Report liveness and the number of configured pairs.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "pairs": state.webhook_handler.registry().len(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}
