/// Errors raised while building tool definitions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tool name must not be empty")]
    EmptyToolName,

    #[error("parameter name must not be empty in tool '{0}'")]
    EmptyParameterName(String),

    #[error("duplicate parameter '{param}' in tool '{tool}'")]
    DuplicateParameter { tool: String, param: String },
}

/// Failure of a single tool execution.
///
/// These are routine outcomes reported back to the client, never engine faults.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("tool is not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("API request failed: {0}")]
    Request(String),

    #[error("{0}")]
    Other(String),
}

impl ToolError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
