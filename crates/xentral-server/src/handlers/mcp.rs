use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

/// Handle an MCP JSON-RPC request body.
///
/// Responses are returned inline as `200 application/json`; notifications get
/// `202 Accepted` with no body.
pub async fn mcp_request(State(state): State<AppState>, body: Bytes) -> Response {
    let output = state.engine.handle(&body).await;
    let status = if output.is_empty() {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };

    if state.options.log_requests {
        tracing::info!(
            request_bytes = body.len(),
            response_bytes = output.len(),
            status = status.as_u16(),
            "MCP request"
        );
    }

    if output.is_empty() {
        return status.into_response();
    }
    ([(header::CONTENT_TYPE, "application/json")], output).into_response()
}
