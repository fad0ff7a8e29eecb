use async_trait::async_trait;
use serde_json::Value;

use xentral_core::{Arguments, ExecutableTool, ToolDefinition, ToolError};

use crate::args::check_arguments;
use crate::client::{Query, XentralClient};

/// Filtered, paginated listing of one ERP collection.
pub struct SearchTool {
    definition: ToolDefinition,
    endpoint: &'static str,
    filters: &'static [(&'static str, &'static str)],
    client: XentralClient,
}

impl SearchTool {
    /// `filters` maps argument names to the API's filter keys.
    pub fn new(
        definition: ToolDefinition,
        endpoint: &'static str,
        filters: &'static [(&'static str, &'static str)],
        client: XentralClient,
    ) -> Self {
        Self {
            definition,
            endpoint,
            filters,
            client,
        }
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Query parameters for a call, in filter, pagination, sort order.
    pub fn query(&self, arguments: &Arguments) -> Query {
        let mut query = Query::default();
        query.filters(arguments, self.filters);
        query.pagination(arguments);
        query.sorting(arguments);
        query
    }
}

#[async_trait]
impl ExecutableTool for SearchTool {
    async fn execute(&self, arguments: Arguments) -> Result<String, ToolError> {
        check_arguments(&self.definition, &arguments)?;

        let query = self.query(&arguments);
        let payload = self.client.get(self.endpoint, &query).await?;

        let raw = arguments.get("raw").and_then(Value::as_bool).unwrap_or(false);
        render(&payload, raw)
    }
}

/// Render an API payload as text. `raw` returns the full response body.
fn render(payload: &Value, raw: bool) -> Result<String, ToolError> {
    let pretty = |v: &Value| {
        serde_json::to_string_pretty(v).map_err(|e| ToolError::Other(e.to_string()))
    };

    if raw {
        return pretty(payload);
    }

    match payload.get("data").and_then(Value::as_array) {
        Some(items) if items.is_empty() => Ok("No records found.".to_string()),
        Some(items) => {
            let total = payload
                .pointer("/meta/total")
                .and_then(Value::as_u64)
                .unwrap_or(items.len() as u64);
            Ok(format!(
                "Found {total} record(s):\n{}",
                pretty(&Value::Array(items.clone()))?
            ))
        }
        None => pretty(payload),
    }
}
