use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and introspection
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::server_info))
        .route("/tools", get(handlers::list_tools))
        // MCP JSON-RPC endpoint
        .route("/mcp", post(handlers::mcp_request))
        // Aliases for clients that post each method to its own URL
        .route("/mcp/initialize", post(handlers::mcp_request))
        .route("/mcp/list_tools", post(handlers::mcp_request))
        .route("/mcp/call_tool", post(handlers::mcp_request))
        // Runtime credential update
        .route("/config/credentials", post(handlers::update_credentials))
        .fallback(handlers::not_found)
        // CORS: allow any origin (browser-based MCP clients)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
