use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app_state::AppState;

/// Server information endpoint.
pub async fn server_info(State(state): State<AppState>) -> Json<Value> {
    let config = state.api_config.read().await;
    Json(serde_json::json!({
        "server": state.engine.server_info(),
        "config": {
            "api_url": config.api_url,
            "api_key": config.masked_key(),
            "debug": state.options.debug,
        },
        "started_at": state.started_at,
    }))
}

#[derive(Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSummary>,
}

#[derive(Serialize)]
pub struct ParameterSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
}

#[derive(Serialize)]
pub struct ToolsResponse {
    pub total: usize,
    pub tools: Vec<ToolSummary>,
}

/// Plain listing of all registered tools, outside the JSON-RPC envelope.
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    let tools: Vec<ToolSummary> = state
        .engine
        .registry()
        .list()
        .iter()
        .map(|binding| {
            let definition = binding.definition();
            ToolSummary {
                name: definition.name().to_string(),
                description: definition.description().to_string(),
                parameters: definition
                    .parameters()
                    .iter()
                    .map(|p| ParameterSummary {
                        name: p.name().to_string(),
                        param_type: p.param_type().to_string(),
                        required: p.is_required(),
                    })
                    .collect(),
            }
        })
        .collect();

    Json(ToolsResponse {
        total: tools.len(),
        tools,
    })
}

/// Request body for replacing the ERP credentials.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

/// Replace the ERP API credentials at runtime.
#[allow(clippy::missing_errors_doc)]
pub async fn update_credentials(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let (Some(api_url), Some(api_key)) = (
        req.api_url.filter(|s| !s.is_empty()),
        req.api_key.filter(|s| !s.is_empty()),
    ) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Both api_url and api_key are required" })),
        ));
    };

    let mut config = state.api_config.write().await;
    config.update_credentials(api_url, api_key);
    for problem in config.validate() {
        tracing::warn!(%problem, "Updated credentials look invalid");
    }
    tracing::info!(api_url = %config.api_url, "API credentials updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "API credentials updated",
        "api_url": config.api_url,
    })))
}

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Endpoint not found",
            "available_endpoints": [
                "/mcp (POST) - Main MCP JSON-RPC endpoint",
                "/health (GET) - Health check",
                "/info (GET) - Server information",
                "/tools (GET) - List all tools",
                "/config/credentials (POST) - Update API credentials"
            ]
        })),
    )
}
