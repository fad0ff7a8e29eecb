//! The MCP protocol engine: parse, validate, route, dispatch, encode.
//!
//! One call to [`ProtocolEngine::handle`] processes one request body from
//! start to finish. Every failure mode ends in a JSON-RPC error response;
//! nothing escapes to the transport except the encoded bytes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use xentral_core::Arguments;

use crate::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, RequestId, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND, TOOL_EXECUTION_ERROR, TOOL_NOT_FOUND,
};
use crate::protocol::{
    CallToolResult, InitializeResult, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::registry::ToolRegistry;
use crate::schema::ToolListing;

/// Encoded fallback used when even the internal-error response cannot be serialized.
const INTERNAL_ERROR_BODY: &[u8] =
    br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal server error"}}"#;

/// Faults inside the engine itself. Never shown to clients in detail.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to serialize {context}: {source}")]
    Serialize {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Introspection snapshot for health and info endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub tools_count: usize,
    pub initialized: bool,
}

/// Transport-agnostic MCP request handler.
pub struct ProtocolEngine {
    info: ServerInfo,
    registry: Arc<ToolRegistry>,
    initialized: AtomicBool,
}

impl ProtocolEngine {
    pub fn new(info: ServerInfo, registry: Arc<ToolRegistry>) -> Self {
        Self {
            info,
            registry,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Whether an `initialize` request has been served.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn server_info(&self) -> ServerStatus {
        ServerStatus {
            name: self.info.name.clone(),
            version: self.info.version.clone(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            tools_count: self.registry.len(),
            initialized: self.is_initialized(),
        }
    }

    /// Handle one raw request body. An empty result means "send nothing".
    pub async fn handle(&self, raw: &[u8]) -> Vec<u8> {
        let response = match self.handle_message(raw).await {
            Ok(Some(response)) => response,
            Ok(None) => return Vec::new(),
            Err(fault) => {
                tracing::error!(error = %fault, "Unexpected error handling MCP request");
                JsonRpcResponse::error(None, INTERNAL_ERROR, "Internal server error")
            }
        };

        match serde_json::to_vec(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode MCP response");
                INTERNAL_ERROR_BODY.to_vec()
            }
        }
    }

    /// Parse and dispatch a request body without encoding the response.
    ///
    /// # Errors
    ///
    /// Only engine faults; protocol and tool errors are returned as error
    /// responses.
    pub async fn handle_message(
        &self,
        raw: &[u8],
    ) -> Result<Option<JsonRpcResponse>, EngineError> {
        match JsonRpcRequest::parse(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "Rejected MCP request");
                Ok(Some(err.into_response()))
            }
        }
    }

    /// Route an already-validated request.
    ///
    /// Requests without an `id` field are executed but their response is
    /// dropped, as are all `notifications/*` methods.
    ///
    /// # Errors
    ///
    /// Only engine faults.
    pub async fn dispatch(
        &self,
        request: JsonRpcRequest,
    ) -> Result<Option<JsonRpcResponse>, EngineError> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Received MCP notification");
            return Ok(None);
        }

        let has_id = request.has_id();
        let id = request.response_id();
        tracing::debug!(method = %request.method, "Dispatching MCP request");

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id)?,
            "tools/list" => self.list_tools(id)?,
            "tools/call" => self.call_tool(id, request.params).await?,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method '{other}' not found"),
            ),
        };

        if !has_id {
            tracing::debug!(method = %request.method, "Request without id, response dropped");
            return Ok(None);
        }
        Ok(Some(response))
    }

    fn initialize(&self, id: Option<RequestId>) -> Result<JsonRpcResponse, EngineError> {
        self.initialized.store(true, Ordering::Release);
        tracing::info!("MCP session initialized");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: self.info.clone(),
        };
        Ok(JsonRpcResponse::success(id, to_value("initialize result", &result)?))
    }

    fn list_tools(&self, id: Option<RequestId>) -> Result<JsonRpcResponse, EngineError> {
        let tools: Vec<ToolListing> = self
            .registry
            .list()
            .iter()
            .map(|binding| ToolListing::from(binding.definition()))
            .collect();
        tracing::info!(count = tools.len(), "Listing MCP tools");

        let result = ListToolsResult { tools };
        Ok(JsonRpcResponse::success(id, to_value("tool list", &result)?))
    }

    async fn call_tool(
        &self,
        id: Option<RequestId>,
        params: Option<Value>,
    ) -> Result<JsonRpcResponse, EngineError> {
        let Some(Value::Object(mut params)) = params else {
            return Ok(JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "call_tool requires parameters",
            ));
        };

        let name = match params.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    "tool name is required",
                ))
            }
        };

        let Some(binding) = self.registry.lookup(&name) else {
            tracing::warn!(tool = %name, "Unknown MCP tool requested");
            return Ok(JsonRpcResponse::error(
                id,
                TOOL_NOT_FOUND,
                format!("Tool '{name}' not found"),
            ));
        };

        let arguments = match params.remove("arguments") {
            None | Some(Value::Null) => Arguments::new(),
            Some(Value::Object(arguments)) => arguments,
            Some(_) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    "tool arguments must be an object",
                ))
            }
        };

        tracing::info!(tool = %name, "MCP tool call");
        tracing::debug!(tool = %name, arguments = ?arguments, "Tool arguments");

        // Run on its own task so a panic surfaces as a JoinError, not an unwind.
        let task = tokio::spawn(async move { binding.execute(arguments).await });

        match task.await {
            Ok(Ok(text)) => {
                let result = CallToolResult::text(text);
                Ok(JsonRpcResponse::success(id, to_value("tool result", &result)?))
            }
            Ok(Err(err)) => {
                tracing::warn!(tool = %name, error = %err, "Tool execution failed");
                Ok(JsonRpcResponse::error_with_data(
                    id,
                    TOOL_EXECUTION_ERROR,
                    format!("Tool execution failed: {err}"),
                    serde_json::json!({ "tool": name }),
                ))
            }
            Err(join) => {
                tracing::error!(tool = %name, error = %join, "Tool execution aborted");
                Ok(JsonRpcResponse::error_with_data(
                    id,
                    TOOL_EXECUTION_ERROR,
                    format!("Tool execution failed: {join}"),
                    serde_json::json!({ "tool": name }),
                ))
            }
        }
    }
}

fn to_value<T: Serialize>(context: &'static str, value: &T) -> Result<Value, EngineError> {
    serde_json::to_value(value).map_err(|source| EngineError::Serialize { context, source })
}
