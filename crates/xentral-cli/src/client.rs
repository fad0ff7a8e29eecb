use reqwest::Client;
use serde_json::{Map, Value};

use xentral_core::Arguments;
use xentral_mcp::protocol::{CallToolResult, InitializeResult};
use xentral_mcp::{JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};

/// JSON-RPC client for the MCP HTTP endpoint.
pub struct McpClient {
    http: Client,
    server_url: String,
}

impl McpClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, method: &str, params: Option<Map<String, Value>>) -> anyhow::Result<Value> {
        let request = JsonRpcRequest::new(uuid::Uuid::new_v4().to_string(), method, params);
        tracing::debug!(method, "Sending MCP request");

        let response: JsonRpcResponse = self
            .http
            .post(format!("{}/mcp", self.server_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.into_result()?)
    }

    async fn notify(&self, method: &str) -> anyhow::Result<()> {
        let notification = serde_json::json!({ "jsonrpc": "2.0", "method": method });
        self.http
            .post(format!("{}/mcp", self.server_url))
            .json(&notification)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Perform the `initialize` handshake and acknowledge it.
    pub async fn initialize(&self) -> anyhow::Result<InitializeResult> {
        let params = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "xentral-cli",
                "version": env!("CARGO_PKG_VERSION"),
            }
        });
        let params = match params {
            Value::Object(map) => Some(map),
            _ => None,
        };

        let result = self.request("initialize", params).await?;
        let result: InitializeResult = serde_json::from_value(result)?;
        self.notify("notifications/initialized").await?;
        Ok(result)
    }

    /// Tool listings as returned by `tools/list`.
    pub async fn list_tools(&self) -> anyhow::Result<Vec<Value>> {
        let result = self.request("tools/list", None).await?;
        match result.get("tools") {
            Some(Value::Array(tools)) => Ok(tools.clone()),
            _ => anyhow::bail!("malformed tools/list result"),
        }
    }

    /// Call a tool and return its text output.
    pub async fn call_tool(&self, name: &str, arguments: Arguments) -> anyhow::Result<String> {
        let mut params = Map::new();
        params.insert("name".to_string(), Value::from(name));
        params.insert("arguments".to_string(), Value::Object(arguments));

        let result = self.request("tools/call", Some(params)).await?;
        let result: CallToolResult = serde_json::from_value(result)?;
        Ok(result.joined_text())
    }

    /// The server's `/info` document.
    pub async fn info(&self) -> anyhow::Result<Value> {
        Ok(self
            .http
            .get(format!("{}/info", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
