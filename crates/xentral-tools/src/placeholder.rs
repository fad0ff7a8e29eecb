use async_trait::async_trait;

use xentral_core::{Arguments, ExecutableTool, ToolError};

/// A planned tool that is advertised but not implemented yet.
pub struct PlaceholderTool {
    name: String,
}

impl PlaceholderTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ExecutableTool for PlaceholderTool {
    async fn execute(&self, arguments: Arguments) -> Result<String, ToolError> {
        let mut text = format!(
            "{} - tool not yet implemented\nThis tool is planned for a future release.\n",
            self.name
        );

        if !arguments.is_empty() {
            text.push_str("\nReceived parameters:\n");
            for (key, value) in &arguments {
                text.push_str(&format!("  - {key}: {value}\n"));
            }
        }
        Ok(text)
    }
}
