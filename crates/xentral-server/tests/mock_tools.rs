use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use xentral_core::{Arguments, ExecutableTool, ParamType, ToolDefinition, ToolError, ToolParameter};
use xentral_mcp::ToolRegistry;

/// Returns a greeting for the `city` argument.
pub struct MockWeather;

#[async_trait]
impl ExecutableTool for MockWeather {
    async fn execute(&self, arguments: Arguments) -> Result<String, ToolError> {
        let city = arguments
            .get("city")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::MissingArgument("city".to_string()))?;
        Ok(format!("Sunny in {city}"))
    }
}

/// Always fails with an upstream error.
pub struct MockFailing;

#[async_trait]
impl ExecutableTool for MockFailing {
    async fn execute(&self, _arguments: Arguments) -> Result<String, ToolError> {
        Err(ToolError::Upstream {
            status: 503,
            body: "ERP maintenance".to_string(),
        })
    }
}

pub fn weather_definition(description: &str) -> ToolDefinition {
    ToolDefinition::new(
        "weather",
        description,
        vec![
            ToolParameter::new("city", ParamType::String, "City").required(),
            ToolParameter::new("limit", ParamType::Integer, "Results Limit"),
        ],
    )
    .unwrap()
}

pub fn mock_registry() -> Arc<ToolRegistry> {
    let registry = Arc::new(ToolRegistry::new());
    registry.register(weather_definition("Current weather"), Arc::new(MockWeather));
    registry.register(
        ToolDefinition::new("flaky", "Fails every time", vec![]).unwrap(),
        Arc::new(MockFailing),
    );
    registry
}
