use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ToolError;

/// Arguments of a tool call, keyed by parameter name.
pub type Arguments = Map<String, Value>;

/// Executable capability bound to a tool definition.
#[async_trait]
pub trait ExecutableTool: Send + Sync {
    /// Run the tool and return its textual result.
    async fn execute(&self, arguments: Arguments) -> Result<String, ToolError>;
}
