use axum::{extract::State, Json};
use serde_json::Value;

use crate::app_state::AppState;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let status = state.engine.server_info();
    Json(serde_json::json!({
        "status": "healthy",
        "server": status.name,
        "version": status.version,
        "initialized": status.initialized,
        "tools_count": status.tools_count,
    }))
}
